//! JSON rendering of recognized regions for stdout.

use digup_ocr::RecognizedTextRegion;

/// Printed whenever there is nothing to report or anything went wrong.
pub const EMPTY_RESULT: &str = "[]";

/// Renders regions as a single-line JSON array. Falls back to `[]` if
/// encoding fails.
pub fn render(regions: &[RecognizedTextRegion]) -> String {
    serde_json::to_string(regions).unwrap_or_else(|e| {
        tracing::debug!("json encoding failed: {e}");
        EMPTY_RESULT.to_string()
    })
}
