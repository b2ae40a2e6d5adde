// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! RWX file importer

use crate::ast::Interpreter;
use crate::config::InterpreterConfig;
use crate::error::RwxError;
use crate::geometry::Scene;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read an .rwx file and interpret it into a scene
pub fn import_rwx_file(path: impl AsRef<Path>, config: &InterpreterConfig) -> Result<Scene> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| RwxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    Interpreter::new(config.clone())
        .with_source_name(path.display().to_string())
        .interpret(&source)
        .with_context(|| format!("Failed to interpret RWX file: {}", path.display()))
}
