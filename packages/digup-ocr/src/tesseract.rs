//! Cross-platform backend driving the `tesseract` executable.
//!
//! The decoded image is streamed to tesseract as PNG on stdin and TSV is read
//! back from stdout. TSV reports one row per word with a top-left pixel box;
//! words are grouped into lines so results match the line-level observations
//! of the other backends.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{RecognitionLevel, RecognitionOptions};
use crate::engine::{OcrEngine, OcrError};
use crate::loader::LoadedImage;
use crate::region::{ImageDimensions, NormalizedBox, Observation};
use crate::transform::clamp_confidence;

const WORD_LEVEL: &str = "5";

pub struct TesseractOcrEngine {
    program: PathBuf,
    options: RecognitionOptions,
}

impl TesseractOcrEngine {
    pub fn new(program: impl Into<PathBuf>, options: RecognitionOptions) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    fn args(&self) -> Vec<&'static str> {
        let mut args = vec!["stdin", "stdout", "--oem"];
        args.push(match self.options.level {
            RecognitionLevel::Fast => "1",
            RecognitionLevel::Accurate => "3",
        });
        if !self.options.language_correction {
            args.extend(["-c", "load_system_dawg=0", "-c", "load_freq_dawg=0"]);
        }
        args.push("tsv");
        args
    }
}

impl Default for TesseractOcrEngine {
    fn default() -> Self {
        Self::new("tesseract", RecognitionOptions::default())
    }
}

#[async_trait]
impl OcrEngine for TesseractOcrEngine {
    async fn recognize(&self, image: &LoadedImage) -> Result<Vec<Observation>, OcrError> {
        let dims = image.dimensions();
        if dims.width == 0 || dims.height == 0 {
            return Ok(Vec::new());
        }
        let png = image.to_png()?;

        let args = self.args();
        debug!(program = %self.program.display(), ?args, "spawning tesseract");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                OcrError::EngineError(format!(
                    "failed to run {}: {e}",
                    self.program.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::EngineError("tesseract stdin unavailable".into()))?;
        let feed = async move {
            let result = stdin.write_all(&png).await;
            drop(stdin);
            result
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|e| OcrError::EngineError(e.to_string()))?;

        if !output.status.success() {
            return Err(OcrError::EngineError(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed.map_err(|e| OcrError::EngineError(format!("writing image to tesseract: {e}")))?;

        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "tesseract diagnostics");
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout), dims))
    }

    fn name(&self) -> &'static str {
        "Tesseract"
    }
}

#[derive(Default)]
struct LineBuilder {
    words: Vec<String>,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    confidence_sum: f32,
}

impl LineBuilder {
    fn push(&mut self, word: &str, left: f64, top: f64, width: f64, height: f64, confidence: f32) {
        if self.words.is_empty() {
            self.left = left;
            self.top = top;
            self.right = left + width;
            self.bottom = top + height;
        } else {
            self.left = self.left.min(left);
            self.top = self.top.min(top);
            self.right = self.right.max(left + width);
            self.bottom = self.bottom.max(top + height);
        }
        self.words.push(word.to_string());
        self.confidence_sum += confidence;
    }

    fn finish(self, dims: ImageDimensions) -> Observation {
        let confidence = self.confidence_sum / self.words.len() as f32 / 100.0;
        Observation {
            text: self.words.join(" "),
            confidence: clamp_confidence(confidence),
            bounding_box: NormalizedBox::from_top_left_pixels(
                self.left,
                self.top,
                self.right - self.left,
                self.bottom - self.top,
                dims,
            ),
        }
    }
}

/// Groups TSV word rows into lines, keeping the order in which lines first
/// appear. Rows that are not words, have no text, or carry a negative
/// confidence are skipped.
pub(crate) fn parse_tsv(tsv: &str, dims: ImageDimensions) -> Vec<Observation> {
    let mut index: HashMap<[&str; 4], usize> = HashMap::new();
    let mut lines: Vec<LineBuilder> = Vec::new();

    // level page block par line word left top width height conf text
    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.splitn(12, '\t').collect();
        if cols.len() < 12 || cols[0] != WORD_LEVEL {
            continue;
        }
        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }

        let parsed = (
            cols[6].parse::<f64>(),
            cols[7].parse::<f64>(),
            cols[8].parse::<f64>(),
            cols[9].parse::<f64>(),
            cols[10].parse::<f32>(),
        );
        let (Ok(left), Ok(top), Ok(width), Ok(height), Ok(conf)) = parsed else {
            warn!(row, "skipping malformed tesseract row");
            continue;
        };
        if conf < 0.0 {
            continue;
        }

        let key = [cols[1], cols[2], cols[3], cols[4]];
        let slot = *index.entry(key).or_insert_with(|| {
            lines.push(LineBuilder::default());
            lines.len() - 1
        });
        lines[slot].push(text, left, top, width, height, conf);
    }

    lines.into_iter().map(|line| line.finish(dims)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn dims() -> ImageDimensions {
        ImageDimensions {
            width: 200,
            height: 100,
        }
    }

    fn tsv(rows: &[&str]) -> String {
        std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_words_are_grouped_into_lines() {
        let input = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t200\t100\t-1\t",
            "4\t1\t1\t1\t1\t0\t20\t10\t40\t10\t-1\t",
            "5\t1\t1\t1\t1\t1\t20\t10\t15\t10\t90\tHello",
            "5\t1\t1\t1\t1\t2\t40\t12\t20\t8\t70\tworld",
            "5\t1\t1\t1\t2\t1\t20\t50\t30\t10\t50\tnext",
        ]);
        let obs = parse_tsv(&input, dims());
        assert_eq!(obs.len(), 2);

        assert_eq!(obs[0].text, "Hello world");
        assert!((obs[0].confidence - 0.8).abs() < 1e-6);
        let b = obs[0].bounding_box;
        assert!((b.x - 0.1).abs() < 1e-9);
        assert!((b.width - 0.2).abs() < 1e-9);
        assert!((b.height - 0.1).abs() < 1e-9);
        // top 10px, height 10px in a 100px image: lower edge 80px from bottom
        assert!((b.y - 0.8).abs() < 1e-9);

        assert_eq!(obs[1].text, "next");
        assert!((obs[1].confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_line_order_follows_first_appearance() {
        let input = tsv(&[
            "5\t1\t2\t1\t1\t1\t0\t80\t10\t10\t90\tlater",
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t90\tearlier",
            "5\t1\t2\t1\t1\t2\t20\t80\t10\t10\t90\tstill-later",
        ]);
        let obs = parse_tsv(&input, dims());
        let texts: Vec<_> = obs.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["later still-later", "earlier"]);
    }

    #[test]
    fn test_blank_and_negative_rows_skipped() {
        let input = tsv(&[
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t95\t   ",
            "5\t1\t1\t1\t1\t2\t0\t0\t10\t10\t-1\tghost",
            "5\t1\t1\t1\t1\t3\tx\t0\t10\t10\t95\tbroken",
        ]);
        assert!(parse_tsv(&input, dims()).is_empty());
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_tsv("", dims()).is_empty());
        assert!(parse_tsv(HEADER, dims()).is_empty());
    }

    #[test]
    fn test_fast_mode_args() {
        let engine = TesseractOcrEngine::default();
        assert_eq!(
            engine.args(),
            [
                "stdin",
                "stdout",
                "--oem",
                "1",
                "-c",
                "load_system_dawg=0",
                "-c",
                "load_freq_dawg=0",
                "tsv"
            ]
        );
    }

    #[test]
    fn test_accurate_mode_args() {
        let engine = TesseractOcrEngine::new(
            "tesseract",
            RecognitionOptions {
                level: RecognitionLevel::Accurate,
                language_correction: true,
            },
        );
        assert_eq!(engine.args(), ["stdin", "stdout", "--oem", "3", "tsv"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_engine_error() {
        let engine = TesseractOcrEngine::new(
            "/nonexistent/bin/tesseract",
            RecognitionOptions::default(),
        );
        let image = LoadedImage::from_pixels(
            "blank.png",
            RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255])),
        );
        let err = engine.recognize(&image).await.unwrap_err();
        assert!(matches!(err, OcrError::EngineError(_)));
        assert!(err.to_string().contains("failed to run"));
    }
}
