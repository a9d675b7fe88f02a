//! Single-image recognition through the tesseract command-line tool.
//!
//! A [`Recognizer`] is built once per image, configured through chained
//! setters, then consumed by [`Recognizer::recognize`]. The scratch files it
//! creates (whitelist config, text output) live only for that one call.

use std::fs;
use std::path::{Path, PathBuf};

use tessocr_config::TesseractConfig;
use tracing::{debug, info, warn};

use crate::command::TesseractCommand;
use crate::error::{OcrError, Result};
use crate::temp_dir::{image_base_name, resolve_temp_dir};
use crate::whitelist::{build_whitelist, config_directive, CharList};

/// Program spawned when no binary override is given.
pub const DEFAULT_BINARY: &str = "tesseract";

/// Settings shared by every recognition an engine runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerSettings {
    pub binary: String,
    pub language: Option<String>,
    pub whitelist: Option<String>,
    pub temp_dir: Option<PathBuf>,
    /// Append a UUID to the output name so concurrent runs on images with the
    /// same base name do not overwrite each other.
    pub unique_output: bool,
    pub keep_output: bool,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            language: None,
            whitelist: None,
            temp_dir: None,
            unique_output: false,
            keep_output: false,
        }
    }
}

impl From<&TesseractConfig> for RecognizerSettings {
    fn from(config: &TesseractConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            language: config.language.clone().filter(|l| !l.is_empty()),
            whitelist: config.whitelist.clone().filter(|w| !w.is_empty()),
            temp_dir: config.temp_dir_path(),
            unique_output: config.unique_output,
            keep_output: config.keep_output,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recognizer {
    image_path: String,
    settings: RecognizerSettings,
}

impl Recognizer {
    /// No validation happens here; a missing image surfaces when tesseract runs.
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            settings: RecognizerSettings::default(),
        }
    }

    pub fn from_settings(image_path: impl Into<String>, settings: &RecognizerSettings) -> Self {
        Self {
            image_path: image_path.into(),
            settings: settings.clone(),
        }
    }

    /// An empty code clears the language so no `-l` is passed.
    pub fn language(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.settings.language = (!code.is_empty()).then_some(code);
        self
    }

    /// Restrict recognition to the given characters.
    ///
    /// Every list is flattened in order, so `["AB"]` followed by `['C', 'D']`
    /// yields `ABCD`. A later call replaces the earlier whitelist; an empty
    /// result clears it.
    pub fn whitelist<I>(mut self, lists: I) -> Self
    where
        I: IntoIterator,
        I::Item: CharList,
    {
        let whitelist = build_whitelist(lists);
        self.settings.whitelist = (!whitelist.is_empty()).then_some(whitelist);
        self
    }

    pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.temp_dir = Some(path.into());
        self
    }

    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.settings.binary = binary.into();
        self
    }

    pub fn unique_output(mut self, unique: bool) -> Self {
        self.settings.unique_output = unique;
        self
    }

    pub fn keep_output(mut self, keep: bool) -> Self {
        self.settings.keep_output = keep;
        self
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn settings(&self) -> &RecognizerSettings {
        &self.settings
    }

    /// Derive the invocation without touching the filesystem.
    ///
    /// The config file path is chosen here but only written by `recognize`.
    pub fn command(&self) -> TesseractCommand {
        let temp_dir = resolve_temp_dir(self.settings.temp_dir.as_deref());

        let config_file = self
            .settings
            .whitelist
            .as_ref()
            .map(|_| PathBuf::from(format!("{}{}.conf", temp_dir, rand::random::<u32>())));

        let base_name = image_base_name(&self.image_path);
        let output_base = if self.settings.unique_output {
            format!("{}{}-{}", temp_dir, base_name, uuid::Uuid::new_v4())
        } else {
            format!("{}{}", temp_dir, base_name)
        };

        TesseractCommand {
            binary: self.settings.binary.clone(),
            image: self.image_path.clone(),
            language: self.settings.language.clone(),
            output_base,
            config_file,
        }
    }

    /// Run tesseract and return the trimmed recognized text.
    ///
    /// Blocks until the child process exits. The config file, and the output
    /// file unless `keep_output` is set, are removed whether or not
    /// recognition succeeded.
    pub fn recognize(self) -> Result<String> {
        let command = self.command();
        info!("Recognizing text in {}", self.image_path);

        if let (Some(path), Some(whitelist)) = (command.config_file(), &self.settings.whitelist) {
            write_config_file(path, whitelist)?;
        }

        let result = self.run(&command);

        if let Some(path) = command.config_file() {
            remove_scratch_file(path);
        }
        if !self.settings.keep_output {
            remove_scratch_file(&command.output_file());
        }

        let text = result?;
        info!("Recognized {} chars from {}", text.len(), self.image_path);
        Ok(text)
    }

    fn run(&self, command: &TesseractCommand) -> Result<String> {
        debug!("Running: {}", command);

        let output = command
            .to_process()
            .output()
            .map_err(|source| OcrError::Spawn {
                binary: command.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::ProcessFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let output_file = command.output_file();
        debug!("Reading output from {}", output_file.display());
        let text = fs::read_to_string(&output_file).map_err(|source| OcrError::OutputRead {
            path: output_file.clone(),
            source,
        })?;

        Ok(text.trim().to_string())
    }
}

fn write_config_file(path: &Path, whitelist: &str) -> Result<()> {
    debug!("Writing whitelist config to {}", path.display());
    fs::write(path, config_directive(whitelist)).map_err(|source| OcrError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Missing files are fine; tesseract may have failed before writing output.
fn remove_scratch_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}
