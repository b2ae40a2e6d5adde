// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end interpretation of small scripts

use approx::assert_relative_eq;
use nalgebra::Point3;
use polyframe_rwx::{interpret, Mesh, RwxError, ScopeKind};

fn positions(mesh: &Mesh) -> Vec<Point3<f64>> {
    mesh.vertices.iter().map(|v| v.position).collect()
}

/// Spatial triangles of a mesh after canonical triangulation
fn triangle_positions(mesh: &Mesh) -> Vec<[Point3<f64>; 3]> {
    mesh.triangles()
        .into_iter()
        .map(|[a, b, c]| {
            [
                mesh.vertices[a].position,
                mesh.vertices[b].position,
                mesh.vertices[c].position,
            ]
        })
        .collect()
}

#[test]
fn test_plain_triangle() {
    let scene = interpret("vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 1 2 3\n").unwrap();

    assert_eq!(scene.mesh_count(), 1);
    let mesh = &scene.meshes[0];
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(
        positions(mesh),
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn test_scale_applies_to_emitted_vertices() {
    let scene =
        interpret("scale 2 2 2\nvertex 1 0 0\nvertex 0 1 0\nvertex 0 0 1\ntriangle 1 2 3\n").unwrap();

    assert_eq!(
        positions(&scene.meshes[0]),
        vec![
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ]
    );
}

#[test]
fn test_unknown_directive_is_skipped() {
    let plain = interpret("vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 1 2 3\n").unwrap();
    let scene =
        interpret("foobar 1 2 3\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\ntriangle 1 2 3\n")
            .unwrap();

    assert_eq!(scene.meshes, plain.meshes);
    assert_eq!(scene.diagnostics.len(), 1);
    assert_eq!(scene.diagnostics[0].line, 1);
    assert!(scene.diagnostics[0].message.contains("foobar"));
}

#[test]
fn test_proto_is_placed_at_instance_transform() {
    let source = "\
protobegin Foo
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
triangle 1 2 3
protoend
translate 5 0 0
protoinstance Foo
";
    let scene = interpret(source).unwrap();

    assert_eq!(scene.mesh_count(), 1);
    assert_eq!(
        positions(&scene.meshes[0]),
        vec![
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(5.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn test_unbalanced_transformend_aborts() {
    let err = interpret("vertex 0 0 0\ntransformend\n").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RwxError>(),
        Some(RwxError::UnbalancedScope {
            line: 2,
            scope: ScopeKind::Transform
        })
    ));
}

#[test]
fn test_lone_carriage_return_advances_line() {
    let err = interpret("vertex 0 0 0\rtransformend").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RwxError>(),
        Some(RwxError::UnbalancedScope { line: 2, .. })
    ));
}

#[test]
fn test_faces_never_share_vertices() {
    let mut source = String::from("vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nvertex 1 1 0\n");
    for _ in 0..5 {
        source.push_str("triangle 1 2 3\ntriangle 2 4 3\n");
    }
    let scene = interpret(&source).unwrap();

    let mesh = &scene.meshes[0];
    assert_eq!(mesh.face_count(), 10);
    assert_eq!(mesh.vertex_count(), 30);

    let mut seen = std::collections::HashSet::new();
    for face in &mesh.faces {
        assert_eq!(face.len(), 3);
        for &index in &face.indices {
            assert!(seen.insert(index), "vertex {index} shared");
        }
    }
}

#[test]
fn test_transform_scope_isolates() {
    let source = "\
translate 1 0 0
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
triangle 1 2 3
transformbegin
rotate 0 0 1 90
scale 3 3 3
triangle 1 2 3
transformend
triangle 1 2 3
";
    let scene = interpret(source).unwrap();
    let tris = triangle_positions(&scene.meshes[0]);
    assert_eq!(tris.len(), 3);

    assert_eq!(tris[0], tris[2]);
    // (1,0,0) scaled by 3, rotated a quarter turn, then offset by the outer translate
    assert_relative_eq!(tris[1][1], Point3::new(1.0, 3.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_material_scope_isolates() {
    let source = "\
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
surface 0.2 0.3 0.4
color 0 0 1
clumpbegin
materialbegin
color 1 0 0
ambient 0.9
texture stone
triangle 1 2 3
clumpend
materialend
clumpbegin
triangle 1 2 3
clumpend
";
    let scene = interpret(source).unwrap();
    assert_eq!(scene.mesh_count(), 2);

    let inner = &scene.meshes[0].material;
    assert_eq!(inner.color, nalgebra::Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(inner.ambient, 0.9);
    assert_eq!(inner.texture.as_deref(), Some("stone.jpg"));

    let outer = &scene.meshes[1].material;
    assert_eq!(outer.color, nalgebra::Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(outer.ambient, 0.2);
    assert_eq!(outer.diffuse, 0.3);
    assert_eq!(outer.specular, 0.4);
    assert!(outer.texture.is_none());
}

#[test]
fn test_quad_matches_two_triangles() {
    let vertices = "vertex 0 0 0\nvertex 2 0 0\nvertex 2 1 0\nvertex 0 1 0\nrotate 1 0 0 30\n";
    let quad = interpret(&format!("{vertices}quad 1 2 3 4\n")).unwrap();
    let tris = interpret(&format!("{vertices}triangle 1 2 3\ntriangle 3 4 1\n")).unwrap();

    assert_eq!(quad.meshes[0].face_count(), 1);
    assert!(quad.meshes[0].faces[0].is_quad());
    assert_eq!(
        triangle_positions(&quad.meshes[0]),
        triangle_positions(&tris.meshes[0])
    );
}

#[test]
fn test_transform_is_read_at_face_time() {
    let source = "\
vertex 1 0 0
translate 0 0 5
vertex 0 1 0
vertex 0 0 1
triangle 1 2 3
";
    let scene = interpret(source).unwrap();
    assert_eq!(
        positions(&scene.meshes[0]),
        vec![
            Point3::new(1.0, 0.0, 5.0),
            Point3::new(0.0, 1.0, 5.0),
            Point3::new(0.0, 0.0, 6.0),
        ]
    );
}

#[test]
fn test_explicit_transform_and_identity() {
    let source = "\
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
translate 9 9 9
transform 1 0 0 2  0 1 0 0  0 0 1 0  0 0 0 1
triangle 1 2 3
identity
triangle 1 2 3
";
    let scene = interpret(source).unwrap();
    let tris = triangle_positions(&scene.meshes[0]);
    assert_eq!(tris[0][0], Point3::new(2.0, 0.0, 0.0));
    assert_eq!(tris[1][0], Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn test_polygon_fan() {
    let source = "\
vertex 0 0 0
vertex 1 0 0
vertex 2 1 0
vertex 1 2 0
vertex 0 1 0
polygon 5 1 2 3 4 5 tag 3
";
    let scene = interpret(source).unwrap();
    let mesh = &scene.meshes[0];
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.faces[0].tag, Some(3));
    assert_eq!(mesh.triangle_count(), 3);

    let outline = mesh.face_positions(&mesh.faces[0]).unwrap();
    assert_eq!(outline.len(), 5);
    assert_eq!(outline[2], Point3::new(2.0, 1.0, 0.0));
}

#[test]
fn test_typical_model_layout() {
    let source = "\
# exported model
ModelBegin
  ClumpBegin
    Color 0.5 0.5 0.5
    Surface 0.3 0.7 0.0
    Vertex -1 0 -1 UV 0 0
    Vertex 1 0 -1 UV 1 0
    Vertex 1 0 1 UV 1 1
    Vertex -1 0 1 UV 0 1
    Texture ground
    Quad 1 2 3 4
  ClumpEnd
ModelEnd
";
    let scene = interpret(source).unwrap();
    assert_eq!(scene.mesh_count(), 1);
    let mesh = &scene.meshes[0];
    assert!(mesh.has_uvs());
    assert_eq!(mesh.material.texture.as_deref(), Some("ground.jpg"));
    assert!(scene.diagnostics.is_empty());

    let bbox = scene.bounding_box();
    assert_eq!(bbox.min, Point3::new(-1.0, 0.0, -1.0));
    assert_eq!(bbox.max, Point3::new(1.0, 0.0, 1.0));
}
