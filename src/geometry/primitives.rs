// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitive directives.
//!
//! RWX scripts can request solids by name. They are recognized and their
//! parameters recorded, but no polygons are generated for them.

use serde::{Deserialize, Serialize};

/// Geometric primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Block {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cone {
        height: f64,
        radius: f64,
        sides: u32,
    },
    Cylinder {
        height: f64,
        bottom_radius: f64,
        top_radius: f64,
        sides: u32,
    },
    Disc {
        offset: f64,
        radius: f64,
        sides: u32,
    },
    Hemisphere {
        radius: f64,
        density: u32,
    },
    Sphere {
        radius: f64,
        density: u32,
    },
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Block { .. } => "block",
            Self::Cone { .. } => "cone",
            Self::Cylinder { .. } => "cylinder",
            Self::Disc { .. } => "disc",
            Self::Hemisphere { .. } => "hemisphere",
            Self::Sphere { .. } => "sphere",
        }
    }
}
