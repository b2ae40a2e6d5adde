// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::{BoundingBox, Material};
use nalgebra::{Matrix4, Point2, Point3};
use serde::{Deserialize, Serialize};

/// Vertex with position and optional texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub uv: Option<Point2<f64>>,
}

impl Vertex {
    pub fn new(position: Point3<f64>) -> Self {
        Self { position, uv: None }
    }

    pub fn with_uv(position: Point3<f64>, uv: Point2<f64>) -> Self {
        Self {
            position,
            uv: Some(uv),
        }
    }

    /// Copy of this vertex with its position mapped through `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Self {
        Self {
            position: matrix.transform_point(&self.position),
            uv: self.uv,
        }
    }
}

/// Polygon face referencing vertices of its owning mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
    /// Optional `tag` value from the script; carried but not interpreted
    pub tag: Option<u32>,
}

impl Face {
    pub fn new(indices: Vec<usize>, tag: Option<u32>) -> Self {
        Self { indices, tag }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_quad(&self) -> bool {
        self.indices.len() == 4
    }

    /// Split into triangles.
    ///
    /// Quads `(a, b, c, d)` become `(a, b, c)` and `(c, d, a)`; larger polygons
    /// are fanned from their first index.
    pub fn triangulate(&self) -> Vec<[usize; 3]> {
        let idx = &self.indices;
        match idx.len() {
            0..=2 => Vec::new(),
            3 => vec![[idx[0], idx[1], idx[2]]],
            4 => vec![[idx[0], idx[1], idx[2]], [idx[2], idx[3], idx[0]]],
            n => (1..n - 1).map(|i| [idx[0], idx[i], idx[i + 1]]).collect(),
        }
    }
}

/// Polygon soup with a single material.
///
/// Every face owns its own vertices; no vertex is referenced by two faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub material: Material,
}

impl Mesh {
    pub fn new(material: Material) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            material,
        }
    }

    pub fn empty() -> Self {
        Self::new(Material::default())
    }

    /// Append a face built from private copies of `vertices`
    pub fn push_face(&mut self, vertices: impl IntoIterator<Item = Vertex>, tag: Option<u32>) {
        let start = self.vertices.len();
        self.vertices.extend(vertices);
        let indices = (start..self.vertices.len()).collect();
        self.faces.push(Face::new(indices, tag));
    }

    /// Transform all vertices by a matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = vertex.transformed(matrix);
        }
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after canonical triangulation
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|face| face.len().saturating_sub(2))
            .sum()
    }

    /// All faces triangulated, as indices into `vertices`
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces.iter().flat_map(Face::triangulate).collect()
    }

    pub fn has_uvs(&self) -> bool {
        self.vertices.iter().any(|vertex| vertex.uv.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Positions of a face's vertices in order, or `None` if the face
    /// references a vertex this mesh does not have
    pub fn face_positions(&self, face: &Face) -> Option<Vec<Point3<f64>>> {
        face.indices
            .iter()
            .map(|&index| self.vertices.get(index).map(|vertex| vertex.position))
            .collect()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn triangle_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0)),
            Vertex::with_uv(Point3::new(0.0, 1.0, 0.0), Point2::new(0.0, 1.0)),
        ]
    }

    #[test]
    fn test_push_face_copies_vertices() {
        let mut mesh = Mesh::empty();
        mesh.push_face(triangle_vertices(), None);
        mesh.push_face(triangle_vertices(), Some(4));

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
        assert_eq!(mesh.faces[1].indices, vec![3, 4, 5]);
        assert_eq!(mesh.faces[1].tag, Some(4));
        assert!(mesh.has_uvs());
    }

    #[test]
    fn test_quad_triangulation_uses_canonical_diagonal() {
        let face = Face::new(vec![10, 11, 12, 13], None);
        assert!(face.is_quad());
        assert_eq!(face.triangulate(), vec![[10, 11, 12], [12, 13, 10]]);
    }

    #[test]
    fn test_polygon_fan_triangulation() {
        let face = Face::new(vec![0, 1, 2, 3, 4], None);
        assert_eq!(face.triangulate(), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);

        let mut mesh = Mesh::empty();
        mesh.faces.push(face);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_transform_moves_positions_keeps_uvs() {
        let mut mesh = Mesh::empty();
        mesh.push_face(triangle_vertices(), None);
        mesh.transform(&Matrix4::new_translation(&Vector3::new(0.0, 0.0, 3.0)));

        assert_eq!(mesh.vertices[0].position, Point3::new(0.0, 0.0, 3.0));
        assert_eq!(mesh.vertices[2].uv, Some(Point2::new(0.0, 1.0)));

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(0.0, 0.0, 3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn test_face_positions_rejects_foreign_face() {
        let mut mesh = Mesh::empty();
        mesh.push_face(triangle_vertices(), None);

        let outline = mesh.face_positions(&mesh.faces[0]).unwrap();
        assert_eq!(outline[1], Point3::new(1.0, 0.0, 0.0));
        assert!(mesh.face_positions(&Face::new(vec![0, 1, 7], None)).is_none());
    }
}
