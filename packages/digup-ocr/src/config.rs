use std::path::PathBuf;

/// Which backend performs recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Apple Vision on macOS, tesseract everywhere else.
    #[default]
    Auto,
    Vision,
    Tesseract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognitionLevel {
    #[default]
    Fast,
    Accurate,
}

/// Recognition knobs shared by every backend. The default trades accuracy
/// for speed: fast level, no language correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecognitionOptions {
    pub level: RecognitionLevel,
    pub language_correction: bool,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub kind: EngineKind,
    pub recognition: RecognitionOptions,
    /// Executable used by the tesseract backend.
    pub tesseract_program: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Auto,
            recognition: RecognitionOptions::default(),
            tesseract_program: PathBuf::from("tesseract"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_prefer_speed() {
        let config = EngineConfig::default();
        assert_eq!(config.kind, EngineKind::Auto);
        assert_eq!(config.recognition.level, RecognitionLevel::Fast);
        assert!(!config.recognition.language_correction);
        assert_eq!(config.tesseract_program, PathBuf::from("tesseract"));
    }
}
