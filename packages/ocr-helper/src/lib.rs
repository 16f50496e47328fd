//! # ocr-helper
//!
//! Library half of the `ocr_helper` binary: takes one image path, runs OCR
//! through [`digup_ocr`] and prints a JSON array of recognized lines:
//!
//! ```text
//! [{"text":"File","confidence":0.5,"x":12.0,"y":4.0,"width":30.0,"height":14.0}]
//! ```
//!
//! Coordinates are pixels with the origin at the image's top-left corner.

pub mod cli;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use cli::{Args, Invocation, USAGE};
pub use output::{render, EMPTY_RESULT};
pub use pipeline::run;
