//! The load, recognize, transform sequence for one image.

use std::path::Path;

use digup_ocr::{engine_for, to_regions, EngineConfig, LoadedImage, OcrError, RecognizedTextRegion};
use tracing::debug;

/// Recognizes text in the image at `path`. The image is decoded before a
/// backend is chosen, so an unreadable file is always reported as a load
/// error.
pub async fn run(path: &Path, config: &EngineConfig) -> Result<Vec<RecognizedTextRegion>, OcrError> {
    let image = LoadedImage::open(path)?;
    let engine = engine_for(config)?;

    let observations = engine.recognize(&image).await?;
    debug!(engine = engine.name(), count = observations.len(), "recognition finished");

    Ok(to_regions(&observations, image.dimensions()))
}
