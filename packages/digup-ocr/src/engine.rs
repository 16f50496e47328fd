use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::loader::LoadedImage;
use crate::region::Observation;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("cannot load image at {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("engine error: {0}")]
    EngineError(String),
}

/// A text recognizer. Implementations report observations in the order the
/// underlying engine produced them, with normalized bottom-left boxes.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &LoadedImage) -> Result<Vec<Observation>, OcrError>;

    fn name(&self) -> &'static str;
}
