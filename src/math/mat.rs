use crate::math::vec::Vec3;
use crate::math::deg_to_rad;

/// Column-major 4x4 matrix, laid out the way WGSL `mat4x4<f32>` expects.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, z_far * range_reciprocal, -1.0],
            [0.0, 0.0, z_far * z_near * range_reciprocal, 0.0],
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    /// `self * other`: `other` is applied first.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (column, out) in result.iter_mut().enumerate() {
            for (row, cell) in out.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[k][row] * other.0[column][k]).sum();
            }
        }
        Mat4(result)
    }

    /// Transforms a point (w = 1) and returns homogeneous clip coordinates.
    pub fn transform_point(&self, point: Vec3) -> [f32; 4] {
        let p = [point.x(), point.y(), point.z(), 1.0];
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|column| self.0[column][row] * p[column]).sum();
        }
        out
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

/// Fixed camera the globe scene is framed with: at `(0, 0, distance)` looking down -Z.
#[derive(Debug, Clone, Copy)]
pub struct BackdropCamera {
    pub distance: f32,
    pub fov_y_degrees: f32,
    pub aspect: f32,
}

/// A world-space point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Normalized device coordinates, `[-1, 1]` on screen.
    pub ndc: [f32; 2],
    /// NDC units per world unit at the point's depth, `[x, y]`.
    pub units_per_world: [f32; 2],
    /// Clip-space depth; larger is further away.
    pub depth: f32,
}

impl Default for BackdropCamera {
    fn default() -> Self {
        Self {
            distance: 6.0,
            fov_y_degrees: 45.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl BackdropCamera {
    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective(deg_to_rad(self.fov_y_degrees), self.aspect, 0.1, 200.0);
        projection.multiply(&Mat4::translation(0.0, 0.0, -self.distance))
    }

    /// Projects a point, or `None` when it sits behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Projected> {
        let clip = self.view_projection().transform_point(point);
        let w = clip[3];
        if w <= 1e-4 {
            return None;
        }
        let f = 1.0 / (deg_to_rad(self.fov_y_degrees) * 0.5).tan();
        Some(Projected {
            ndc: [clip[0] / w, clip[1] / w],
            units_per_world: [f / (self.aspect * w), f / w],
            depth: w,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_identity() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity().multiply(&t), t);
        assert_eq!(t.multiply(&Mat4::identity()), t);
    }

    #[test]
    fn test_translation_moves_point() {
        let clip = Mat4::translation(1.0, -2.0, 0.5).transform_point(Vec3::ZERO);
        assert_eq!(clip, [1.0, -2.0, 0.5, 1.0]);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = BackdropCamera::default();
        let projected = camera.project(Vec3::ZERO).expect("origin is in front of the camera");
        assert!(projected.ndc[0].abs() < 1e-6);
        assert!(projected.ndc[1].abs() < 1e-6);
        assert!((projected.depth - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let camera = BackdropCamera::default();
        assert!(camera.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_nearer_points_look_bigger() {
        let camera = BackdropCamera::default();
        let near = camera.project(Vec3::new(0.0, 0.0, 2.0)).unwrap();
        let far = camera.project(Vec3::new(0.0, 0.0, -20.0)).unwrap();
        assert!(near.units_per_world[1] > far.units_per_world[1]);
    }
}
