use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, ImageReader, RgbaImage};
use tracing::debug;

use crate::engine::OcrError;
use crate::region::ImageDimensions;

/// A decoded image held as 8-bit RGBA pixels.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    pixels: RgbaImage,
}

impl LoadedImage {
    /// Reads and decodes the image at `path`. The format is sniffed from the
    /// file contents, not the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OcrError> {
        let path = path.as_ref();
        let load_err = |source: ImageError| OcrError::ImageLoad {
            path: path.to_path_buf(),
            source,
        };

        let decoded = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| load_err(ImageError::IoError(e)))?
            .decode()
            .map_err(load_err)?;

        let pixels = decoded.into_rgba8();
        debug!(
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "decoded image"
        );

        Ok(Self {
            path: path.to_path_buf(),
            pixels,
        })
    }

    pub fn from_pixels(path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Re-encodes the pixel buffer as PNG, for engines that take a file
    /// stream rather than raw pixels.
    pub fn to_png(&self) -> Result<Vec<u8>, OcrError> {
        let mut out = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| OcrError::InvalidInput(format!("cannot encode png: {e}")))?;
        Ok(out)
    }
}
