// File: ./src/config.rs
// Handles preference loading, saving, and defaults.
use crate::context::AppContext;
use crate::error::ApplyError;
use crate::model::{BufferPercent, StatFamily};
use crate::storage::FileStore;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;

/// Stored user preferences. Every field is optional on disk; a missing value
/// leaves the corresponding feature off.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Percentage kept as text, exactly as the user typed it. Empty disables it.
    pub min_buffer: String,
    pub generic_attributes: bool,
    pub generic_elemental_resists: bool,
    pub clear_before_apply: bool,
}

/// Switches for the optional pipeline stages of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineOptions {
    pub buffer: Option<BufferPercent>,
    pub group_attributes: bool,
    pub group_resistances: bool,
    pub clear_before_apply: bool,
}

impl PipelineOptions {
    pub fn groups(&self, family: StatFamily) -> bool {
        match family {
            StatFamily::Attributes => self.group_attributes,
            StatFamily::ElementalResistances => self.group_resistances,
        }
    }
}

impl Preferences {
    pub const KEYS: [&'static str; 4] = [
        "min_buffer",
        "generic_attributes",
        "generic_elemental_resists",
        "clear_before_apply",
    ];

    /// Load preferences using an explicit context.
    /// A missing file yields defaults; unreadable or malformed files are errors.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No preferences at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let prefs: Preferences = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(prefs)
    }

    /// Save preferences using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        FileStore::atomic_write(&path, toml_str)
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Updates one setting from its textual form, as typed on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "min_buffer" => {
                BufferPercent::parse(value)?;
                self.min_buffer = value.trim().to_string();
            }
            "generic_attributes" => self.generic_attributes = parse_flag(key, value)?,
            "generic_elemental_resists" => {
                self.generic_elemental_resists = parse_flag(key, value)?
            }
            "clear_before_apply" => self.clear_before_apply = parse_flag(key, value)?,
            _ => bail!(
                "Unknown preference '{}'. Known keys: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions, ApplyError> {
        Ok(PipelineOptions {
            buffer: BufferPercent::parse(&self.min_buffer)?,
            group_attributes: self.generic_attributes,
            group_resistances: self.generic_elemental_resists,
            clear_before_apply: self.clear_before_apply,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("Preference '{}' expects true or false, got '{}'", key, other),
    }
}
