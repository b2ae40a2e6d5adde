// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Homogeneous rotation about a unit axis
pub fn axis_rotation(axis: &Unit<Vector3<f64>>, radians: f64) -> Matrix4<f64> {
    Rotation3::from_axis_angle(axis, radians).to_homogeneous()
}

/// Build a matrix from 16 values in row-major order
pub fn matrix_from_rows(values: &[f64; 16]) -> Matrix4<f64> {
    Matrix4::from_row_slice(values)
}
