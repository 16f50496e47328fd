//! Command line arguments backing the `ocr_helper` binary.
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use digup_ocr::{EngineConfig, EngineKind, RecognitionLevel, RecognitionOptions};
use std::ffi::OsString;
use std::path::PathBuf;

/// Printed to stderr when no image path is given.
pub const USAGE: &str = "Usage: ocr_helper <image_path>";

#[derive(Parser, Debug)]
#[command(
    name = "ocr_helper",
    about = "Recognize text in an image and print the lines as JSON",
    version
)]
pub struct Args {
    /// Image to recognize
    pub image_path: Option<PathBuf>,

    /// Ignored, as are any further positional arguments
    #[arg(hide = true)]
    pub extra: Vec<OsString>,

    /// OCR backend
    #[arg(long, value_enum, env = "OCR_HELPER_ENGINE", default_value_t = EngineArg::Auto)]
    pub engine: EngineArg,

    /// Use the accurate recognition level instead of the fast one
    #[arg(long)]
    pub accurate: bool,

    /// Let the engine apply language correction
    #[arg(long)]
    pub language_correction: bool,

    /// Path to the tesseract executable
    #[arg(long, env = "OCR_HELPER_TESSERACT", default_value = "tesseract")]
    pub tesseract_bin: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineArg {
    Auto,
    Vision,
    Tesseract,
}

impl From<EngineArg> for EngineKind {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Auto => EngineKind::Auto,
            EngineArg::Vision => EngineKind::Vision,
            EngineArg::Tesseract => EngineKind::Tesseract,
        }
    }
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        let level = if self.accurate {
            RecognitionLevel::Accurate
        } else {
            RecognitionLevel::Fast
        };
        EngineConfig {
            kind: self.engine.into(),
            recognition: RecognitionOptions {
                level,
                language_correction: self.language_correction,
            },
            tesseract_program: self.tesseract_bin.clone(),
        }
    }
}

/// What the binary should do for a given command line.
#[derive(Debug)]
pub enum Invocation {
    /// No image path: print [`USAGE`] and exit 1.
    Usage,
    Recognize {
        image_path: PathBuf,
        config: EngineConfig,
        verbose: bool,
        /// Set when the options could not be parsed and the first argument
        /// is being used as the image path with default settings.
        parse_error: Option<String>,
    },
}

impl Invocation {
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::from_args(std::env::args_os())
    }

    /// Resolves a command line. Only `--help` and `--version` come back as
    /// `Err`, for clap to print. Any other parse failure falls back to the
    /// first argument as the image path, so callers still get JSON.
    pub fn from_args<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

        match Args::try_parse_from(&argv) {
            Ok(args) => Ok(match args.image_path.clone() {
                Some(image_path) => Invocation::Recognize {
                    image_path,
                    config: args.engine_config(),
                    verbose: args.verbose,
                    parse_error: None,
                },
                None => Invocation::Usage,
            }),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(e)
            }
            Err(e) => Ok(match argv.get(1) {
                Some(first) => Invocation::Recognize {
                    image_path: PathBuf::from(first),
                    config: EngineConfig::default(),
                    verbose: false,
                    parse_error: Some(first_line(&e.to_string())),
                },
                None => Invocation::Usage,
            }),
        }
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim().to_string()
}
