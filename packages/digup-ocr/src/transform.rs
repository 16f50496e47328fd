//! Conversion from engine coordinates (normalized, bottom-left origin) to
//! pixel coordinates with a top-left origin.

use crate::region::{ImageDimensions, NormalizedBox, Observation, RecognizedTextRegion};

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl NormalizedBox {
    /// Restricts the box to the unit square. In-range boxes are unchanged.
    pub fn clamped(self) -> Self {
        let x = unit(self.x);
        let y = unit(self.y);
        Self {
            x,
            y,
            width: unit(self.width).min(1.0 - x),
            height: unit(self.height).min(1.0 - y),
        }
    }

    /// Builds a normalized box from a top-left origin pixel rectangle.
    pub fn from_top_left_pixels(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        dims: ImageDimensions,
    ) -> Self {
        let w = f64::from(dims.width.max(1));
        let h = f64::from(dims.height.max(1));
        Self {
            x: left / w,
            y: (h - top - height) / h,
            width: width / w,
            height: height / h,
        }
        .clamped()
    }
}

/// Scales and vertically flips one observation into a pixel-space region.
pub fn to_region(observation: &Observation, dims: ImageDimensions) -> RecognizedTextRegion {
    let bbox = observation.bounding_box.clamped();
    let w = f64::from(dims.width);
    let h = f64::from(dims.height);

    RecognizedTextRegion {
        text: observation.text.clone(),
        confidence: clamp_confidence(observation.confidence),
        x: bbox.x * w,
        y: (1.0 - bbox.y - bbox.height) * h,
        width: bbox.width * w,
        height: bbox.height * h,
    }
}

/// Converts observations in engine order; no re-sorting happens here.
pub fn to_regions(observations: &[Observation], dims: ImageDimensions) -> Vec<RecognizedTextRegion> {
    observations.iter().map(|o| to_region(o, dims)).collect()
}

pub(crate) fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
