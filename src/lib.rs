// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe RWX Interpreter
//!
//! Reads RenderWare script (.rwx) scene descriptions and produces polygon
//! meshes with per-mesh material snapshots. Handles nested transform and
//! material scopes, clumps, and instanced protos.

pub mod ast;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use ast::{Directive, Interpreter, Keyword, TransformOp};
pub use config::InterpreterConfig;
pub use error::{Diagnostic, RwxError, RwxResult, ScopeKind, Severity};
pub use geometry::{BoundingBox, Face, Material, Mesh, Primitive, Scene, Vertex};
pub use io::{import_rwx_file, parse_rwx};

use anyhow::{Context, Result};
use std::path::Path;

/// Main entry point for interpreting an RWX script with default settings
pub fn interpret(source: &str) -> Result<Scene> {
    Interpreter::default()
        .interpret(source)
        .context("Failed to interpret RWX source")
}

/// Interpret an RWX file with default settings
pub fn interpret_file(path: impl AsRef<Path>) -> Result<Scene> {
    import_rwx_file(path, &InterpreterConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_triangle() {
        let result = interpret("vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 1 2 3");
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_is_recoverable() {
        let err = interpret("materialend").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RwxError>(),
            Some(RwxError::UnbalancedScope {
                scope: ScopeKind::Material,
                ..
            })
        ));
    }
}
