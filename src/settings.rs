//! Server settings.
//!
//! Read from a TOML file, then adjusted by environment variables:
//! - `KLIPPER_CONFIGURATOR_CONFIG` - settings file path
//! - `KLIPPER_CONFIGURATOR_BIND` - listen address, e.g. `0.0.0.0:8080`
//! - `KLIPPER_CONFIGURATOR_CATALOG` - catalog TOML replacing the embedded one

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::{default_catalog, load_catalog, PresetCatalog};

pub const CONFIG_ENV: &str = "KLIPPER_CONFIGURATOR_CONFIG";
pub const BIND_ENV: &str = "KLIPPER_CONFIGURATOR_BIND";
pub const CATALOG_ENV: &str = "KLIPPER_CONFIGURATOR_CATALOG";

const APP_DIR: &str = "klipper-configurator";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub bind_address: SocketAddr,
    /// `None` serves the embedded catalog
    pub catalog_path: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            catalog_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings from the environment.
    ///
    /// Uses the file named by `KLIPPER_CONFIGURATOR_CONFIG`, else
    /// `<config dir>/klipper-configurator/config.toml` if it exists, else
    /// defaults. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(default_settings_path);

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {:?}", path))?;
        let settings: Settings =
            toml::from_str(&content).with_context(|| format!("Invalid settings {:?}", path))?;
        debug!("Read settings from {:?}", path);
        Ok(settings)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV).filter(|s| !s.is_empty()) {
            self.bind_address = bind
                .parse()
                .with_context(|| format!("{} is not a socket address: {}", BIND_ENV, bind))?;
        }
        if let Some(catalog) = lookup(CATALOG_ENV).filter(|s| !s.is_empty()) {
            self.catalog_path = Some(PathBuf::from(catalog));
        }
        Ok(())
    }

    /// Load the configured catalog, falling back to the embedded one.
    pub fn catalog(&self) -> Result<PresetCatalog> {
        match &self.catalog_path {
            Some(path) => load_catalog(path),
            None => Ok(default_catalog()),
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join(APP_DIR).join("config.toml");
    path.exists().then_some(path)
}
