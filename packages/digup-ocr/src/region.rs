use serde::Serialize;

/// Pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Bounding box as fractions of the image size, origin at the bottom-left
/// corner. `y` is the distance of the box's lower edge from the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One raw result unit reported by an engine, usually a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub text: String,
    pub confidence: f32,
    pub bounding_box: NormalizedBox,
}

impl Observation {
    /// Builds an observation from the engine's top candidate; an absent
    /// candidate becomes empty text.
    pub fn new(text: Option<String>, confidence: f32, bounding_box: NormalizedBox) -> Self {
        Self {
            text: text.unwrap_or_default(),
            confidence,
            bounding_box,
        }
    }
}

/// A recognized text line in pixel coordinates, origin at the top-left
/// corner. This is the record printed by the helper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedTextRegion {
    pub text: String,
    pub confidence: f32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
