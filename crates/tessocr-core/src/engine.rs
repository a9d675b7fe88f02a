use std::path::Path;
use std::process::Command;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{OcrError, Result};
use crate::recognizer::{Recognizer, RecognizerSettings};

/// OCR engine trait for plain-text recognition of image files
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract the text of an image file
    async fn recognize_file(&self, path: &str) -> Result<String>;

    /// Get the name of the OCR engine
    fn name(&self) -> &str;
}

/// Tesseract command-line engine.
///
/// Each call builds a fresh [`Recognizer`] from the shared settings and runs
/// it on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    settings: RecognizerSettings,
}

impl TesseractEngine {
    pub fn new(settings: RecognizerSettings) -> Result<Self> {
        if !binary_available(&settings.binary) {
            return Err(OcrError::BinaryNotFound {
                binary: settings.binary.clone(),
            });
        }

        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RecognizerSettings {
        &self.settings
    }

    /// First line of `<binary> --version`, e.g. `tesseract 5.3.0`.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.settings.binary)
            .arg("--version")
            .output()
            .map_err(|source| OcrError::Spawn {
                binary: self.settings.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::ProcessFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Older releases print the banner on stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize_file(&self, path: &str) -> Result<String> {
        let recognizer = Recognizer::from_settings(path, &self.settings);
        tokio::task::spawn_blocking(move || recognizer.recognize())
            .await
            .map_err(|e| OcrError::Join(e.to_string()))?
    }

    fn name(&self) -> &str {
        "Tesseract OCR"
    }
}

/// Explicit paths must exist; bare names are looked up with `which`.
fn binary_available(binary: &str) -> bool {
    if binary.contains(std::path::MAIN_SEPARATOR) || binary.contains('/') {
        return Path::new(binary).is_file();
    }

    let found = Command::new("which")
        .arg(binary)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);
    debug!("which {} -> {}", binary, found);
    found
}
