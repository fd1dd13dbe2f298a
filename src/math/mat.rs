use crate::math::vec::Vec3;

/// Column-major 4x4 matrix (`m[column][row]`), matching WGSL `mat4x4<f32>`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    /// Translation by `(tx, ty, tz)`.
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    /// Right-handed camera matrix looking from `eye` along `forward`.
    ///
    /// Returns `None` when `forward` is zero or parallel to `up`, since no
    /// orthonormal basis exists in that case.
    pub fn look_to(eye: Vec3, forward: Vec3, up: Vec3) -> Option<Mat4> {
        let f = forward.try_normalize()?;
        let s = f.cross(&up).try_normalize()?;
        let u = s.cross(&f);

        Some(Mat4([
            [s.x(), u.x(), -f.x(), 0.0],
            [s.y(), u.y(), -f.y(), 0.0],
            [s.z(), u.z(), -f.z(), 0.0],
            [-s.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0],
        ]))
    }

    /// Transforms a point (w = 1).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let m = &self.0;
        let p = point.as_array();
        let mut out = [0.0; 3];
        for (row, value) in out.iter_mut().enumerate() {
            *value = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
        }
        Vec3(out)
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.0.iter()
            .flatten()
            .zip(b.0.iter().flatten())
            .all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_look_to_default_camera_is_identity() {
        let view = Mat4::look_to(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::UP)
            .expect("basis exists");
        assert!(approx_eq(&view, &Mat4::translation(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_look_to_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, 1.5, -7.0);
        let view = Mat4::look_to(eye, Vec3::new(1.0, 0.0, 0.0), Vec3::UP).expect("basis exists");
        let at_origin = view.transform_point(eye);
        assert!(at_origin.length() < 1e-5);

        // A point one unit ahead lands on the -z axis in view space.
        let ahead = view.transform_point(eye + Vec3::new(1.0, 0.0, 0.0));
        assert!((ahead.z() + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_to_rejects_vertical_forward() {
        assert!(Mat4::look_to(Vec3::ZERO, Vec3::UP, Vec3::UP).is_none());
    }

}
