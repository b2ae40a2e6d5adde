// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face emission into the pending mesh

use super::{Material, Mesh, Vertex};
use crate::error::{RwxError, RwxResult};
use nalgebra::Matrix4;

/// Accumulates faces for the mesh currently being built.
///
/// Indices are resolved against the scope's raw vertex buffer and transformed
/// with the matrix current at emission time, not at vertex declaration.
#[derive(Debug, Default)]
pub struct Assembler {
    pending: Mesh,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve 1-based `indices` and append one face to the pending mesh
    pub fn emit_face(
        &mut self,
        scope_vertices: &[Vertex],
        indices: &[usize],
        transform: &Matrix4<f64>,
        tag: Option<u32>,
        line: usize,
    ) -> RwxResult<()> {
        let resolved = indices
            .iter()
            .map(|&index| {
                index
                    .checked_sub(1)
                    .and_then(|i| scope_vertices.get(i))
                    .map(|vertex| vertex.transformed(transform))
                    .ok_or(RwxError::IndexOutOfRange {
                        line,
                        index,
                        available: scope_vertices.len(),
                    })
            })
            .collect::<RwxResult<Vec<_>>>()?;

        self.pending.push_face(resolved, tag);
        Ok(())
    }

    pub fn has_faces(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Close the pending mesh with `material`, or `None` if no faces were emitted
    pub fn finish(&mut self, material: &Material) -> Option<Mesh> {
        if !self.has_faces() {
            return None;
        }
        let mut mesh = std::mem::take(&mut self.pending);
        mesh.material = material.clone();
        Some(mesh)
    }
}
