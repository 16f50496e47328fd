//! # digup-ocr
//!
//! Engine-agnostic text recognition for screenshots. Images are decoded with
//! the `image` crate, handed to a platform OCR backend, and the backend's
//! normalized bottom-left boxes are converted to top-left pixel regions.
//!
//! Backends:
//!
//! - **Apple Vision** (macOS): `VNRecognizeTextRequest` through a small Swift
//!   bridge compiled by `build.rs`.
//! - **Tesseract** (everywhere): the `tesseract` executable, driven over
//!   stdin/stdout.

pub mod config;
pub mod engine;
pub mod loader;
pub mod region;
pub mod tesseract;
pub mod transform;

#[cfg(target_os = "macos")]
pub mod apple;

pub use config::{EngineConfig, EngineKind, RecognitionLevel, RecognitionOptions};
pub use engine::{OcrEngine, OcrError};
pub use loader::LoadedImage;
pub use region::{ImageDimensions, NormalizedBox, Observation, RecognizedTextRegion};
pub use tesseract::TesseractOcrEngine;
pub use transform::{to_region, to_regions};

#[cfg(target_os = "macos")]
pub use apple::VisionOcrEngine;

/// Builds the backend selected by `config`.
pub fn engine_for(config: &EngineConfig) -> Result<Box<dyn OcrEngine>, OcrError> {
    match config.kind {
        EngineKind::Tesseract => Ok(Box::new(TesseractOcrEngine::new(
            config.tesseract_program.clone(),
            config.recognition,
        ))),
        EngineKind::Vision | EngineKind::Auto => vision_engine(config),
    }
}

#[cfg(target_os = "macos")]
fn vision_engine(config: &EngineConfig) -> Result<Box<dyn OcrEngine>, OcrError> {
    Ok(Box::new(VisionOcrEngine::new(config.recognition)))
}

#[cfg(not(target_os = "macos"))]
fn vision_engine(config: &EngineConfig) -> Result<Box<dyn OcrEngine>, OcrError> {
    match config.kind {
        EngineKind::Auto => Ok(Box::new(TesseractOcrEngine::new(
            config.tesseract_program.clone(),
            config.recognition,
        ))),
        _ => Err(OcrError::Unsupported(
            "Apple Vision is only available on macOS".into(),
        )),
    }
}
