use std::path::{Path, PathBuf};

use datamask_engine::{DEFAULT_FUZZY_THRESHOLD, MaskOptions};
use datamask_engine::model::DEFAULT_SHORT_TEXT_MAX_CHARS;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Settings file picked up from the working directory when `--config` is absent.
pub const SETTINGS_FILE: &str = "datamask.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskSettings {
    pub fuzzy_threshold: u8,
    pub short_text_max_chars: usize,
    pub seed: Option<u64>,
    pub out_dir: PathBuf,
    pub log_json: bool,
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            short_text_max_chars: DEFAULT_SHORT_TEXT_MAX_CHARS,
            seed: None,
            out_dir: PathBuf::from("masked"),
            log_json: false,
        }
    }
}

impl MaskSettings {
    pub fn parse(content: &str) -> Result<Self, CliError> {
        let settings: MaskSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn mask_options(&self) -> MaskOptions {
        MaskOptions {
            fuzzy_threshold: self.fuzzy_threshold,
            short_text_max_chars: self.short_text_max_chars,
            ..MaskOptions::default()
        }
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.fuzzy_threshold > 100 {
            return Err(CliError::InvalidConfig(format!(
                "fuzzy_threshold must be between 0 and 100, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.short_text_max_chars < 2 {
            return Err(CliError::InvalidConfig(
                "short_text_max_chars must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from an explicit path, else from `./datamask.toml` when it
/// exists, else defaults. An explicit path that does not exist is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<MaskSettings, CliError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(SETTINGS_FILE);
            if !path.exists() {
                return Ok(MaskSettings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)?;
    MaskSettings::parse(&content)
}
