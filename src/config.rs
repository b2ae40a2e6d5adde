// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpreter configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`InterpreterConfig::load`]
pub const CONFIG_FILE: &str = "rwx.toml";

/// Settings for one [`Interpreter`](crate::ast::Interpreter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Suffix appended to diffuse texture names
    pub texture_extension: String,
    /// Upper bound on the vertex count of a `polygon`
    pub max_polygon_vertices: usize,
    /// Accept unique keyword prefixes such as `vert` for `vertex`
    pub allow_abbreviations: bool,
    /// Give each clump its own vertex buffer
    pub clump_local_vertices: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            texture_extension: ".jpg".to_string(),
            max_polygon_vertices: 1024,
            allow_abbreviations: true,
            clump_local_vertices: false,
        }
    }
}

impl InterpreterConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid interpreter configuration")
    }

    /// Load `rwx.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `RWX_*` overrides; unparsable values are logged and ignored
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(extension) = var("RWX_TEXTURE_EXTENSION") {
            self.texture_extension = extension;
        }

        if let Some(max) = var("RWX_MAX_POLYGON_VERTICES") {
            match max.parse() {
                Ok(max) => self.max_polygon_vertices = max,
                Err(_) => log::warn!("ignoring RWX_MAX_POLYGON_VERTICES={max:?}"),
            }
        }

        if let Some(local) = var("RWX_CLUMP_LOCAL_VERTICES") {
            match local.parse() {
                Ok(local) => self.clump_local_vertices = local,
                Err(_) => log::warn!("ignoring RWX_CLUMP_LOCAL_VERTICES={local:?}"),
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Diffuse texture file name for a name as written in the script
    pub fn texture_file(&self, name: &str) -> String {
        format!("{name}{}", self.texture_extension)
    }
}
