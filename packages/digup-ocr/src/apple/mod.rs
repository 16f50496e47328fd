//! Apple Vision backend, available on macOS only.

mod engine;
mod ffi;

pub use engine::VisionOcrEngine;
