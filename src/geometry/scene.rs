// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpreter output: ordered meshes plus non-fatal diagnostics

use super::{BoundingBox, Mesh};
use crate::error::{Diagnostic, Severity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Everything produced by one successful parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Scene {
    pub fn new(meshes: Vec<Mesh>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            meshes,
            diagnostics,
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Bounds of every mesh combined
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for mesh in &self.meshes {
            bbox.merge(&mesh.bounding_box());
        }
        bbox
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
    }

    /// Serialize the scene as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scene")
    }
}
