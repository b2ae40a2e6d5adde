// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, materials and face assembly

mod assembler;
mod bbox;
mod material;
mod mesh;
mod primitives;
mod scene;

pub use assembler::Assembler;
pub use bbox::BoundingBox;
pub use material::{Color, Material};
pub use mesh::{Face, Mesh, Vertex};
pub use primitives::Primitive;
pub use scene::Scene;
