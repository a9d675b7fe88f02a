//! CLI argument parsing for tessocr.

use clap::Parser;
use std::path::PathBuf;
use tessocr_config::ConfigOverrides;

#[derive(Parser, Clone, Debug)]
#[command(name = "tessocr")]
#[command(about = "Extract text from images with the tesseract OCR engine")]
#[command(version)]
pub struct Cli {
    /// Images to recognize, processed one after another
    #[arg(value_name = "IMAGE", required_unless_present = "check")]
    pub images: Vec<String>,

    /// Language code passed to tesseract (e.g. eng, deu, eng+fra)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Characters tesseract may recognize; repeat to append more
    #[arg(short, long, value_name = "CHARS")]
    pub whitelist: Vec<String>,

    /// Directory for temporary files (defaults to the OS temp directory)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Path to the tesseract binary
    #[arg(long, value_name = "PATH")]
    pub tesseract: Option<String>,

    /// Add a unique token to output file names
    #[arg(long, overrides_with = "no_unique_output")]
    pub unique_output: bool,

    /// Use plain output file names even if the config enables unique ones
    #[arg(long, overrides_with = "unique_output")]
    pub no_unique_output: bool,

    /// Keep tesseract's .txt output files after reading them
    #[arg(long, overrides_with = "no_keep_output")]
    pub keep_output: bool,

    /// Remove output files even if the config keeps them
    #[arg(long, overrides_with = "keep_output")]
    pub no_keep_output: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the engine name and tesseract version, then exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            binary: self.tesseract.clone(),
            language: self.language.clone(),
            whitelist: (!self.whitelist.is_empty()).then(|| self.whitelist.concat()),
            temp_dir: self
                .temp_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
            unique_output: flag_override(self.unique_output, self.no_unique_output),
            keep_output: flag_override(self.keep_output, self.no_keep_output),
        }
    }
}

fn flag_override(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
