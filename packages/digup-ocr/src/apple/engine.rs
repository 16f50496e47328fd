use async_trait::async_trait;
use tracing::debug;

use crate::config::RecognitionOptions;
use crate::engine::{OcrEngine, OcrError};
use crate::loader::LoadedImage;
use crate::region::Observation;

use super::ffi;

pub struct VisionOcrEngine {
    options: RecognitionOptions,
}

impl VisionOcrEngine {
    pub fn new(options: RecognitionOptions) -> Self {
        Self { options }
    }
}

impl Default for VisionOcrEngine {
    fn default() -> Self {
        Self::new(RecognitionOptions::default())
    }
}

#[async_trait]
impl OcrEngine for VisionOcrEngine {
    async fn recognize(&self, image: &LoadedImage) -> Result<Vec<Observation>, OcrError> {
        let dims = image.dimensions();
        let pixels = image.pixels().as_raw().clone();
        let options = self.options;
        debug!(?options, "running vision text request");

        tokio::task::spawn_blocking(move || {
            ffi::recognize_rgba(&pixels, dims.width, dims.height, options)
        })
        .await
        .map_err(|e| OcrError::EngineError(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "Apple Vision"
    }
}
