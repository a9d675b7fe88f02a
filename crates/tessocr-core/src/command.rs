use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A fully derived tesseract invocation.
///
/// Arguments are passed to the child process as-is (no shell), so image or
/// temp paths containing spaces need no quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractCommand {
    pub binary: String,
    pub image: String,
    pub language: Option<String>,
    /// Output path without extension; tesseract appends `.txt`.
    pub output_base: String,
    pub config_file: Option<PathBuf>,
}

impl TesseractCommand {
    /// Arguments in the order tesseract expects them.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.image.clone()];
        if let Some(language) = &self.language {
            args.push("-l".to_string());
            args.push(language.clone());
        }
        args.push(self.output_base.clone());
        if let Some(config_file) = &self.config_file {
            args.push("nobatch".to_string());
            args.push(config_file.to_string_lossy().into_owned());
        }
        args
    }

    /// Where tesseract writes the recognized text.
    pub fn output_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.txt", self.output_base))
    }

    pub fn to_process(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(self.args());
        command
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

impl fmt::Display for TesseractCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.binary, self.image)?;
        if let Some(language) = &self.language {
            write!(f, " -l {}", language)?;
        }
        write!(f, " {}", self.output_base)?;
        if let Some(config_file) = &self.config_file {
            write!(f, " nobatch {}", config_file.display())?;
        }
        Ok(())
    }
}
