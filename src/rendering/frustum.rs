//! View-frustum extraction and AABB testing.
//!
//! The world's render-selection step uses this to skip chunks whose
//! bounding box lies entirely outside the camera's view volume. The test is
//! conservative: boxes intersecting any plane are kept.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector4};

/// A view frustum as six inward-facing planes.
pub struct Frustum {
    // Plane order: left, right, bottom, top, near, far.
    planes: [Vector4<f32>; 6],
}

impl Frustum {
    /// Extracts the six frustum planes from a combined view-projection
    /// matrix (Gribb/Hartmann row method).
    ///
    /// # Arguments
    /// * `matrix` - `projection * view`, column-major as cgmath stores it
    pub fn new(matrix: Matrix4<f32>) -> Self {
        let mut planes = [
            matrix.row(3) + matrix.row(0), // left
            matrix.row(3) - matrix.row(0), // right
            matrix.row(3) + matrix.row(1), // bottom
            matrix.row(3) - matrix.row(1), // top
            matrix.row(3) + matrix.row(2), // near
            matrix.row(3) - matrix.row(2), // far
        ];

        for plane in planes.iter_mut() {
            normalize_plane(plane);
        }

        Frustum { planes }
    }

    /// Tests whether an axis-aligned box intersects the frustum.
    ///
    /// # Arguments
    /// * `min`, `max` - The box corners in world space
    ///
    /// # Returns
    /// `true` when the box is inside or intersects every plane; `false`
    /// once it lies fully outside any one of them.
    pub fn contains_box(&self, min: Point3<f32>, max: Point3<f32>) -> bool {
        for plane in &self.planes {
            // The box corner furthest along the plane normal; if even that
            // corner is behind the plane, the whole box is out.
            let positive = Point3::new(
                if plane.x >= 0.0 { max.x } else { min.x },
                if plane.y >= 0.0 { max.y } else { min.y },
                if plane.z >= 0.0 { max.z } else { min.z },
            );

            if plane.x * positive.x + plane.y * positive.y + plane.z * positive.z + plane.w < 0.0 {
                return false;
            }
        }

        true
    }
}

fn normalize_plane(plane: &mut Vector4<f32>) {
    let length = plane.truncate().magnitude();
    if length > 0.0 {
        *plane /= length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{perspective, Deg, EuclideanSpace, Vector3};

    fn looking_down_negative_z() -> Frustum {
        let projection = perspective(Deg(45.0), 16.0 / 9.0, 0.1, 500.0);
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vector3::unit_y(),
        );
        Frustum::new(projection * view)
    }

    #[test]
    fn box_in_front_is_kept() {
        let frustum = looking_down_negative_z();
        assert!(frustum.contains_box(Point3::new(-1.0, -1.0, -20.0), Point3::new(1.0, 1.0, -10.0)));
    }

    #[test]
    fn box_behind_is_culled() {
        let frustum = looking_down_negative_z();
        assert!(!frustum.contains_box(Point3::new(-1.0, -1.0, 10.0), Point3::new(1.0, 1.0, 20.0)));
    }

    #[test]
    fn box_straddling_a_plane_is_kept() {
        let frustum = looking_down_negative_z();
        // Crosses the near plane.
        assert!(frustum.contains_box(Point3::new(-1.0, -1.0, -5.0), Point3::new(1.0, 1.0, 5.0)));
    }

    #[test]
    fn box_far_to_the_side_is_culled() {
        let frustum = looking_down_negative_z();
        assert!(!frustum.contains_box(
            Point3::from_vec(Vector3::new(500.0, 0.0, -10.0)),
            Point3::from_vec(Vector3::new(510.0, 1.0, -9.0)),
        ));
    }
}
