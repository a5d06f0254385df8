/// Display settings consumed by the address table
///
/// The table reads its flags on every render call through [`ConfigStore`],
/// so toggling a setting takes effect on the next repaint.

use std::cell::Cell;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Show complete addresses instead of the chunked short form
pub const SHOW_FULL_ADDRESSES: &str = "show_full_addresses";

/// Key-value settings provider
pub trait ConfigStore {
    /// `None` when the key is unknown to this provider
    fn get_bool(&self, key: &str) -> Option<bool>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    show_full_addresses: Cell<bool>,
}

impl Settings {
    pub fn new(show_full_addresses: bool) -> Self {
        Self {
            show_full_addresses: Cell::new(show_full_addresses),
        }
    }

    /// Load settings from environment variables
    ///
    /// Environment variables:
    /// - `SHOW_FULL_ADDRESSES`: "true"/"1"/"yes"/"on" or "false"/"0"/"no"/"off"
    ///   (default: false)
    pub fn from_env() -> Self {
        let show_full = match env::var("SHOW_FULL_ADDRESSES") {
            Ok(value) => parse_flag(&value).unwrap_or_else(|| {
                log::warn!("Unknown SHOW_FULL_ADDRESSES value '{}', defaulting to false", value);
                false
            }),
            Err(_) => false,
        };
        log::info!("Show full addresses: {}", show_full);
        Self::new(show_full)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let settings = toml::from_str(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn show_full_addresses(&self) -> bool {
        self.show_full_addresses.get()
    }

    pub fn set_show_full_addresses(&self, value: bool) {
        self.show_full_addresses.set(value);
    }
}

impl ConfigStore for Settings {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            SHOW_FULL_ADDRESSES => Some(self.show_full_addresses.get()),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
