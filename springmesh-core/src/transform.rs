/// Homogeneous 4x4 transforms: view, projection and viewport matrices
use std::fmt;

use nalgebra as na;

use crate::error::{Error, Result};
use crate::vector::Vector3;

/// Below this length the up/forward cross product is treated as parallel.
const DEGENERATE_CROSS: f64 = 1e-12;

/// A 4x4 transform addressed row-major as `(row, col)`.
///
/// Matrices compose right to left: `a.mul(&b)` applied to a point first
/// applies `b`, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4(na::Matrix4<f64>);

impl Matrix4 {
    /// Build from 16 entries listed row by row.
    #[rustfmt::skip]
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let [r0, r1, r2, r3] = rows;
        Self(na::Matrix4::new(
            r0[0], r0[1], r0[2], r0[3],
            r1[0], r1[1], r1[2], r1[3],
            r2[0], r2[1], r2[2], r2[3],
            r3[0], r3[1], r3[2], r3[3],
        ))
    }

    pub fn identity() -> Self {
        Self(na::Matrix4::identity())
    }

    /// Translation by `offset`, stored in the last column.
    pub fn translation(offset: Vector3) -> Self {
        Self(na::Matrix4::new_translation(&offset.to_na()))
    }

    /// Off-axis perspective projection (OpenGL form) mapping the frustum
    /// `[left, right] x [bottom, top]` at depth `near`..`far` to clip space.
    pub fn perspective(near: f64, far: f64, left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self::from_rows([
            [2.0 * near / (right - left), 0.0, (right + left) / (right - left), 0.0],
            [0.0, 2.0 * near / (top - bottom), (top + bottom) / (top - bottom), 0.0],
            [0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near)],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Maps clip space `[-1, 1]^3` to `[0, width] x [0, height]` with depth
    /// remapped to `[0, 1]`.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::from_rows([
            [width / 2.0, 0.0, 0.0, width / 2.0],
            [0.0, height / 2.0, 0.0, height / 2.0],
            [0.0, 0.0, 0.5, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// World-to-camera transform for a camera at `eye` looking at `target`.
    ///
    /// Rows of the rotation block are right, true-up and forward, where
    /// forward points from the target back to the eye. The eye translation
    /// is applied before the rotation.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Result<Self> {
        let forward = (eye - target).normalize().map_err(|_| Error::DegenerateView)?;
        let side = up.cross(forward);
        if side.length() < DEGENERATE_CROSS {
            return Err(Error::DegenerateView);
        }
        let right = side.normalize().map_err(|_| Error::DegenerateView)?;
        let true_up = forward.cross(right);

        let orientation = Self::from_rows([
            [right.x, right.y, right.z, 0.0],
            [true_up.x, true_up.y, true_up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Ok(orientation.mul(&Self::translation(-eye)))
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[(row, col)]
    }

    pub fn rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.get(i, j);
            }
        }
        rows
    }

    /// Product `self · other`.
    pub fn mul(&self, other: &Matrix4) -> Matrix4 {
        Self(self.0 * other.0)
    }

    /// Apply to `point` as `[x, y, z, 1]` and divide through by w.
    ///
    /// Fails when w is zero, i.e. the point lies on the camera plane.
    pub fn transform(&self, point: Vector3) -> Result<Vector3> {
        let h = self.0 * na::Vector4::new(point.x, point.y, point.z, 1.0);
        if h.w == 0.0 || !h.w.is_finite() {
            return Err(Error::DegenerateProjection(h.w));
        }
        let projected = Vector3::new(h.x / h.w, h.y / h.w, h.z / h.w);
        if !projected.is_finite() {
            return Err(Error::DegenerateProjection(h.w));
        }
        Ok(projected)
    }

    pub fn as_na(&self) -> &na::Matrix4<f64> {
        &self.0
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Self(self.0 * rhs.0)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{:>12.4}{:>12.4}{:>12.4}{:>12.4}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn max_diff(a: &Matrix4, b: &Matrix4) -> f64 {
        (a.as_na() - b.as_na()).abs().max()
    }

    #[test]
    fn test_row_major_access() {
        let m = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.get(1, 3), 2.0);
        assert_eq!(m.get(2, 3), 3.0);
        assert_eq!(m.get(3, 0), 0.0);
        assert_eq!(m.rows()[2][3], 3.0);
    }

    #[test]
    fn test_composition_order() {
        let scale = Matrix4::from_rows([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let shift = Matrix4::translation(Vector3::new(1.0, 0.0, 0.0));
        // shift first, then scale
        let p = scale.mul(&shift).transform(Vector3::ZERO).unwrap();
        assert_eq!(p, Vector3::new(2.0, 0.0, 0.0));
        // scale first, then shift
        let p = shift.mul(&scale).transform(Vector3::ZERO).unwrap();
        assert_eq!(p, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(scale * shift, scale.mul(&shift));
        assert_eq!(shift * scale, shift.mul(&scale));
    }

    #[test]
    fn test_viewport_maps_origin_to_center() {
        let p = Matrix4::viewport(500.0, 300.0).transform(Vector3::ZERO).unwrap();
        assert!((p.x - 250.0).abs() < 1e-12);
        assert!((p.y - 150.0).abs() < 1e-12);
        assert!((p.z - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_perspective_matches_nalgebra() {
        let (near, far, side) = (90.0, 150.0, 3.0);
        let ours = Matrix4::perspective(near, far, -side, side, -side, side);
        let fovy = 2.0 * (side / near).atan();
        let theirs = na::Matrix4::new_perspective(1.0, fovy, near, far);
        assert!((ours.as_na() - theirs).abs().max() < 1e-9);
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let m = Matrix4::perspective(1.0, 10.0, -1.0, 1.0, -1.0, 1.0);
        let near = m.transform(Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let far = m.transform(Vector3::new(0.0, 0.0, -10.0)).unwrap();
        assert!((near.z + 1.0).abs() < 1e-12);
        assert!((far.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_rejects_zero_w() {
        let m = Matrix4::perspective(1.0, 10.0, -1.0, 1.0, -1.0, 1.0);
        // points on the camera plane z = 0 have w = 0
        let err = m.transform(Vector3::new(1.0, 1.0, 0.0)).unwrap_err();
        assert!(err.is_degenerate_geometry());
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vector3::new(3.0, 4.0, 10.0);
        let target = Vector3::new(0.5, 0.5, 0.5);
        let up = Vector3::new(0.0, 1.0, 0.0);
        let ours = Matrix4::look_at(eye, target, up).unwrap();
        let theirs = na::Matrix4::look_at_rh(
            &na::Point3::new(eye.x, eye.y, eye.z),
            &na::Point3::new(target.x, target.y, target.z),
            &up.to_na(),
        );
        assert!((ours.as_na() - theirs).abs().max() < 1e-9);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let m = Matrix4::look_at(eye, Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(m.transform(eye).unwrap().length() < 1e-12);
        // target lies straight ahead, down the negative z axis
        let t = m.transform(Vector3::ZERO).unwrap();
        assert!((t.z + eye.length()).abs() < 1e-12);
        assert!(t.x.abs() < 1e-12 && t.y.abs() < 1e-12);
    }

    #[test]
    fn test_look_at_rejects_parallel_up() {
        let eye = Vector3::new(0.0, 10.0, 0.0);
        let err = Matrix4::look_at(eye, Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::DegenerateView));

        let err = Matrix4::look_at(eye, eye, Vector3::new(0.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::DegenerateView));
    }

    fn entries() -> impl Strategy<Value = [[f64; 4]; 4]> {
        prop::array::uniform4(prop::array::uniform4(-10.0f64..10.0))
    }

    proptest! {
        #[test]
        fn multiplication_is_associative(a in entries(), b in entries(), c in entries()) {
            let (a, b, c) = (Matrix4::from_rows(a), Matrix4::from_rows(b), Matrix4::from_rows(c));
            let left = a.mul(&b).mul(&c);
            let right = a.mul(&b.mul(&c));
            prop_assert!(max_diff(&left, &right) < 1e-8);
        }

        #[test]
        fn identity_is_neutral(a in entries()) {
            let a = Matrix4::from_rows(a);
            prop_assert_eq!(a.mul(&Matrix4::identity()), a);
            prop_assert_eq!(Matrix4::identity().mul(&a), a);
        }
    }
}
