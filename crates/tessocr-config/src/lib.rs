use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations searched, in order, when no explicit config path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "./tessocr.toml",
    "~/.config/tessocr/config.toml",
    "~/.tessocr.toml",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tesseract: TesseractConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesseractConfig {
    /// Program to spawn; a bare name is resolved through PATH
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Language code passed as `-l`, e.g. "eng" or "deu+fra"
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub whitelist: Option<String>,
    /// Scratch directory; `~` is expanded. Defaults to the OS temp dir.
    #[serde(default)]
    pub temp_dir: Option<String>,
    #[serde(default)]
    pub unique_output: bool,
    #[serde(default)]
    pub keep_output: bool,
}

fn default_binary() -> String {
    "tesseract".to_string()
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            language: None,
            whitelist: None,
            temp_dir: None,
            unique_output: false,
            keep_output: false,
        }
    }
}

impl TesseractConfig {
    pub fn temp_dir_path(&self) -> Option<PathBuf> {
        self.temp_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }
}

/// Values given on the command line; `None` leaves the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub binary: Option<String>,
    pub language: Option<String>,
    pub whitelist: Option<String>,
    pub temp_dir: Option<String>,
    pub unique_output: Option<bool>,
    pub keep_output: Option<bool>,
}

impl Config {
    /// Load from `config_path`, or the first existing default location.
    ///
    /// An explicit path that does not exist is an error; when none of the
    /// default locations exist the built-in defaults are used.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = match config_path {
            Some(path) => {
                let expanded = shellexpand::tilde(path).to_string();
                if !Path::new(&expanded).exists() {
                    anyhow::bail!("Config file not found: {}", expanded);
                }
                Some(expanded)
            }
            None => Self::find_default_config(),
        };

        match path {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_default_config() -> Option<String> {
        DEFAULT_CONFIG_PATHS.iter().find_map(|path| {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                Some(expanded_path.to_string())
            } else {
                None
            }
        })
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    pub fn load_with_overrides(config_path: Option<&str>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::load(config_path)?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let tesseract = &mut self.tesseract;

        if let Some(binary) = overrides.binary {
            tesseract.binary = binary;
        }
        if let Some(language) = overrides.language {
            tesseract.language = Some(language);
        }
        if let Some(whitelist) = overrides.whitelist {
            tesseract.whitelist = Some(whitelist);
        }
        if let Some(temp_dir) = overrides.temp_dir {
            tesseract.temp_dir = Some(temp_dir);
        }
        if let Some(unique_output) = overrides.unique_output {
            tesseract.unique_output = unique_output;
        }
        if let Some(keep_output) = overrides.keep_output {
            tesseract.keep_output = keep_output;
        }
    }
}
