// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Named geometry templates and their instancing

use crate::error::{RwxError, RwxResult};
use crate::geometry::{Material, Mesh};
use nalgebra::Matrix4;
use std::collections::HashMap;

/// Registry of protos for one parse.
///
/// Meshes are stored in proto-local space. `defining` is the stack of names
/// whose definitions are still open; instancing any of them is rejected.
#[derive(Debug, Default)]
pub struct ProtoRegistry {
    protos: HashMap<String, Vec<Mesh>>,
    defining: Vec<String>,
}

impl ProtoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_definition(&mut self, name: &str) {
        self.defining.push(name.to_string());
    }

    /// Pop the innermost open definition
    pub fn end_definition(&mut self) -> Option<String> {
        self.defining.pop()
    }

    pub fn is_defining(&self, name: &str) -> bool {
        self.defining.iter().any(|open| open == name)
    }

    pub fn open_definitions(&self) -> usize {
        self.defining.len()
    }

    /// Store meshes under `name`, returning the ones it replaces
    pub fn register(&mut self, name: String, meshes: Vec<Mesh>) -> Option<Vec<Mesh>> {
        self.protos.insert(name, meshes)
    }

    pub fn get(&self, name: &str) -> Option<&[Mesh]> {
        self.protos.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.protos.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.protos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protos.is_empty()
    }

    /// Copy a proto's meshes placed by `transform`.
    ///
    /// When `material` is given it replaces each mesh's own snapshot.
    pub fn instantiate(
        &self,
        name: &str,
        transform: &Matrix4<f64>,
        material: Option<&Material>,
        line: usize,
    ) -> RwxResult<Vec<Mesh>> {
        if self.is_defining(name) {
            return Err(RwxError::RecursiveProto {
                line,
                name: name.to_string(),
            });
        }
        let meshes = self.get(name).ok_or_else(|| RwxError::UnknownProto {
            line,
            name: name.to_string(),
        })?;

        Ok(meshes
            .iter()
            .map(|mesh| {
                let mut placed = mesh.clone();
                placed.transform(transform);
                if let Some(material) = material {
                    placed.material = material.clone();
                }
                placed
            })
            .collect())
    }
}
