// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Directive definitions produced by the dispatcher

use crate::geometry::{Color, Primitive, Vertex};
use crate::utils::math::{axis_rotation, deg_to_rad};
use nalgebra::{Matrix4, Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Every directive name the grammar recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    ModelBegin,
    ModelEnd,
    ClumpBegin,
    ClumpEnd,
    ProtoBegin,
    ProtoEnd,
    ProtoInstance,
    ProtoInstanceGeometry,
    Vertex,
    Triangle,
    Quad,
    Polygon,
    Block,
    Cone,
    Cylinder,
    Disc,
    Hemisphere,
    Sphere,
    Identity,
    Translate,
    Rotate,
    Scale,
    Transform,
    TransformBegin,
    TransformEnd,
    TransformJoint,
    Ambient,
    Diffuse,
    Specular,
    Color,
    Surface,
    Opacity,
    Texture,
    MaterialBegin,
    MaterialEnd,
    AddMaterialMode,
    RemoveMaterialMode,
    MaterialMode,
    MaterialModes,
    AddTextureMode,
    RemoveTextureMode,
    TextureMode,
    TextureModes,
    TextureAddressMode,
    TextureMipmapState,
    TextureDithering,
    TextureGammaCorrection,
    GeometrySampling,
    LightSampling,
    AxisAlignment,
    Collision,
    Hints,
    AddHint,
    RemoveHint,
    Trace,
    Tag,
    Include,
    IncludeGeometry,
}

impl Keyword {
    /// Canonical lowercase spelling
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::ModelBegin => "modelbegin",
            Keyword::ModelEnd => "modelend",
            Keyword::ClumpBegin => "clumpbegin",
            Keyword::ClumpEnd => "clumpend",
            Keyword::ProtoBegin => "protobegin",
            Keyword::ProtoEnd => "protoend",
            Keyword::ProtoInstance => "protoinstance",
            Keyword::ProtoInstanceGeometry => "protoinstancegeometry",
            Keyword::Vertex => "vertex",
            Keyword::Triangle => "triangle",
            Keyword::Quad => "quad",
            Keyword::Polygon => "polygon",
            Keyword::Block => "block",
            Keyword::Cone => "cone",
            Keyword::Cylinder => "cylinder",
            Keyword::Disc => "disc",
            Keyword::Hemisphere => "hemisphere",
            Keyword::Sphere => "sphere",
            Keyword::Identity => "identity",
            Keyword::Translate => "translate",
            Keyword::Rotate => "rotate",
            Keyword::Scale => "scale",
            Keyword::Transform => "transform",
            Keyword::TransformBegin => "transformbegin",
            Keyword::TransformEnd => "transformend",
            Keyword::TransformJoint => "transformjoint",
            Keyword::Ambient => "ambient",
            Keyword::Diffuse => "diffuse",
            Keyword::Specular => "specular",
            Keyword::Color => "color",
            Keyword::Surface => "surface",
            Keyword::Opacity => "opacity",
            Keyword::Texture => "texture",
            Keyword::MaterialBegin => "materialbegin",
            Keyword::MaterialEnd => "materialend",
            Keyword::AddMaterialMode => "addmaterialmode",
            Keyword::RemoveMaterialMode => "removematerialmode",
            Keyword::MaterialMode => "materialmode",
            Keyword::MaterialModes => "materialmodes",
            Keyword::AddTextureMode => "addtexturemode",
            Keyword::RemoveTextureMode => "removetexturemode",
            Keyword::TextureMode => "texturemode",
            Keyword::TextureModes => "texturemodes",
            Keyword::TextureAddressMode => "textureaddressmode",
            Keyword::TextureMipmapState => "texturemipmapstate",
            Keyword::TextureDithering => "texturedithering",
            Keyword::TextureGammaCorrection => "texturegammacorrection",
            Keyword::GeometrySampling => "geometrysampling",
            Keyword::LightSampling => "lightsampling",
            Keyword::AxisAlignment => "axisalignment",
            Keyword::Collision => "collision",
            Keyword::Hints => "hints",
            Keyword::AddHint => "addhint",
            Keyword::RemoveHint => "removehint",
            Keyword::Trace => "trace",
            Keyword::Tag => "tag",
            Keyword::Include => "include",
            Keyword::IncludeGeometry => "includegeometry",
        }
    }
}

/// One parsed line of an RWX script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    ModelBegin,
    ModelEnd,
    ClumpBegin,
    ClumpEnd,
    ProtoBegin(String),
    ProtoEnd,
    /// Place a proto; `geometry_only` keeps the current material instead of the proto's
    ///
    /// The pending mesh is closed first, so instanced meshes follow earlier faces in output order.
    ProtoInstance {
        name: String,
        geometry_only: bool,
    },

    Vertex(Vertex),
    Triangle {
        indices: [usize; 3],
        tag: Option<u32>,
    },
    Quad {
        indices: [usize; 4],
        uv: Option<Point2<f64>>,
        tag: Option<u32>,
    },
    Polygon {
        indices: Vec<usize>,
        tag: Option<u32>,
    },
    Primitive(Primitive),

    Identity,
    Transform(TransformOp),
    /// Replace the current matrix outright
    SetTransform(Matrix4<f64>),
    TransformBegin,
    TransformEnd,

    Ambient(f64),
    Diffuse(f64),
    Specular(f64),
    Color(Color),
    Surface {
        ambient: f64,
        diffuse: f64,
        specular: f64,
    },
    Opacity(f64),
    /// `name` is `None` for `texture NULL`
    Texture {
        name: Option<String>,
        mask: Option<String>,
        bump: Option<String>,
    },
    MaterialBegin,
    MaterialEnd,

    /// Recognized directive with no effect on interpreter state
    Ignored {
        keyword: Keyword,
        arguments: Vec<String>,
    },
}

/// Transformation operations composed onto the current matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Translate(Vector3<f64>),
    /// Rotate about every axis whose flag is nonzero, in x, y, z order
    Rotate {
        axes: Vector3<f64>,
        degrees: f64,
    },
    Scale(Vector3<f64>),
}

impl TransformOp {
    /// Convert transformation to a 4x4 matrix
    pub fn to_matrix(&self) -> Matrix4<f64> {
        match self {
            TransformOp::Translate(v) => Matrix4::new_translation(v),
            TransformOp::Rotate { axes, degrees } => {
                let radians = deg_to_rad(*degrees);
                let mut m = Matrix4::identity();
                if axes.x != 0.0 {
                    m *= axis_rotation(&Vector3::x_axis(), radians);
                }
                if axes.y != 0.0 {
                    m *= axis_rotation(&Vector3::y_axis(), radians);
                }
                if axes.z != 0.0 {
                    m *= axis_rotation(&Vector3::z_axis(), radians);
                }
                m
            }
            TransformOp::Scale(s) => Matrix4::new_nonuniform_scaling(s),
        }
    }
}
