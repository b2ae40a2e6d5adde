// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Transform, material and vertex scope state

use super::TransformOp;
use crate::error::ScopeKind;
use crate::geometry::{Material, Vertex};
use nalgebra::Matrix4;

/// Everything a proto definition saves and restores.
///
/// Clump boundaries leave transforms and materials untouched; only
/// `protobegin`/`protoend` swap the whole value out.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeState {
    pub transform: Matrix4<f64>,
    /// Saved matrices with the line of the `transformbegin` that saved them
    transform_stack: Vec<(usize, Matrix4<f64>)>,
    pub material: Material,
    material_stack: Vec<(usize, Material)>,
    pub vertices: Vec<Vertex>,
    /// Parent vertex buffers of open clumps, when clumps scope vertices
    clump_vertices: Vec<Vec<Vertex>>,
    clump_lines: Vec<usize>,
}

impl ScopeState {
    pub fn new() -> Self {
        Self {
            transform: Matrix4::identity(),
            transform_stack: Vec::new(),
            material: Material::default(),
            material_stack: Vec::new(),
            vertices: Vec::new(),
            clump_vertices: Vec::new(),
            clump_lines: Vec::new(),
        }
    }

    /// Right-multiply an operation onto the current matrix
    pub fn apply(&mut self, op: &TransformOp) {
        self.transform *= op.to_matrix();
    }

    pub fn reset_transform(&mut self) {
        self.transform = Matrix4::identity();
    }

    pub fn push_transform(&mut self, line: usize) {
        self.transform_stack.push((line, self.transform));
    }

    /// Restore the matrix saved by the matching push; `false` if none
    pub fn pop_transform(&mut self) -> bool {
        match self.transform_stack.pop() {
            Some((_, saved)) => {
                self.transform = saved;
                true
            }
            None => false,
        }
    }

    pub fn push_material(&mut self, line: usize) {
        self.material_stack.push((line, self.material.clone()));
    }

    /// Restore the material saved by the matching push; `false` if none
    pub fn pop_material(&mut self) -> bool {
        match self.material_stack.pop() {
            Some((_, saved)) => {
                self.material = saved;
                true
            }
            None => false,
        }
    }

    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    pub fn material_depth(&self) -> usize {
        self.material_stack.len()
    }

    /// Append a vertex and return its 1-based index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len()
    }

    pub fn open_clump(&mut self, line: usize, local_vertices: bool) {
        self.clump_lines.push(line);
        if local_vertices {
            self.clump_vertices.push(std::mem::take(&mut self.vertices));
        }
    }

    /// Close the innermost clump; `false` if no clump is open
    pub fn close_clump(&mut self, local_vertices: bool) -> bool {
        if self.clump_lines.pop().is_none() {
            return false;
        }
        if local_vertices {
            if let Some(parent) = self.clump_vertices.pop() {
                self.vertices = parent;
            }
        }
        true
    }

    pub fn clump_depth(&self) -> usize {
        self.clump_lines.len()
    }

    /// Lines of `clumpbegin`s not yet closed, outermost first
    pub fn open_clumps(&self) -> &[usize] {
        &self.clump_lines
    }

    /// The earliest `transformbegin` or `materialbegin` still open
    pub fn unterminated(&self) -> Option<(ScopeKind, usize)> {
        let transform = self
            .transform_stack
            .first()
            .map(|(line, _)| (ScopeKind::Transform, *line));
        let material = self
            .material_stack
            .first()
            .map(|(line, _)| (ScopeKind::Material, *line));
        match (transform, material) {
            (Some(t), Some(m)) => Some(if m.1 < t.1 { m } else { t }),
            (t, m) => t.or(m),
        }
    }
}

impl Default for ScopeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_transform_stack_discards_nested_edits() {
        let mut scope = ScopeState::new();
        scope.apply(&TransformOp::Translate(Vector3::new(1.0, 0.0, 0.0)));
        let before = scope.transform;

        scope.push_transform(2);
        scope.apply(&TransformOp::Scale(Vector3::new(3.0, 3.0, 3.0)));
        assert_ne!(scope.transform, before);

        assert!(scope.pop_transform());
        assert_eq!(scope.transform, before);
        assert!(!scope.pop_transform());
    }

    #[test]
    fn test_operations_compose_by_right_multiplication() {
        let mut scope = ScopeState::new();
        scope.apply(&TransformOp::Translate(Vector3::new(5.0, 0.0, 0.0)));
        scope.apply(&TransformOp::Scale(Vector3::new(2.0, 2.0, 2.0)));

        // scale applies first to the vertex, then the translation
        let p = scope.transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Point3::new(7.0, 0.0, 0.0));

        scope.reset_transform();
        assert_eq!(scope.transform, Matrix4::identity());
    }

    #[test]
    fn test_material_stack() {
        let mut scope = ScopeState::new();
        scope.push_material(1);
        scope.material.ambient = 0.1;
        assert_eq!(scope.material_depth(), 1);
        assert!(scope.pop_material());
        assert_eq!(scope.material.ambient, 1.0);
        assert!(!scope.pop_material());
    }

    #[test]
    fn test_clump_vertex_scoping() {
        let mut scope = ScopeState::new();
        assert_eq!(scope.add_vertex(Vertex::new(Point3::origin())), 1);

        scope.open_clump(2, true);
        assert!(scope.vertices.is_empty());
        scope.add_vertex(Vertex::new(Point3::new(1.0, 1.0, 1.0)));
        scope.add_vertex(Vertex::new(Point3::new(2.0, 2.0, 2.0)));
        assert!(scope.close_clump(true));
        assert_eq!(scope.vertices.len(), 1);

        scope.open_clump(5, false);
        scope.add_vertex(Vertex::new(Point3::new(1.0, 1.0, 1.0)));
        assert!(scope.close_clump(false));
        assert_eq!(scope.vertices.len(), 2);

        assert!(!scope.close_clump(false));
        assert_eq!(scope.clump_depth(), 0);
    }

    #[test]
    fn test_unterminated_reports_earliest_open_scope() {
        let mut scope = ScopeState::new();
        assert_eq!(scope.unterminated(), None);

        scope.push_material(4);
        scope.push_transform(9);
        assert_eq!(scope.unterminated(), Some((ScopeKind::Material, 4)));

        scope.pop_material();
        assert_eq!(scope.unterminated(), Some((ScopeKind::Transform, 9)));

        scope.open_clump(11, false);
        assert_eq!(scope.open_clumps(), &[11]);
    }
}
