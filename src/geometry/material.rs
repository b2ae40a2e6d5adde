// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Surface material state

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// RGB color with components in 0..1
pub type Color = Vector3<f64>;

/// Material snapshot attached to every mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub color: Color,
    pub opacity: f64,
    /// Diffuse texture file name, extension included
    pub texture: Option<String>,
    /// Bump map name as written in the script
    pub bump: Option<String>,
}

impl Material {
    pub fn new() -> Self {
        Self {
            ambient: 1.0,
            diffuse: 1.0,
            specular: 1.0,
            color: Color::new(1.0, 1.0, 1.0),
            opacity: 1.0,
            texture: None,
            bump: None,
        }
    }

    /// Set ambient, diffuse and specular factors at once
    pub fn set_surface(&mut self, ambient: f64, diffuse: f64, specular: f64) {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
    }

    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
