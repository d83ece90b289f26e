//! Voxel traversal raycasting.
//!
//! Steps a ray through the block grid one cell at a time (Amanatides-Woo),
//! visiting every cell the ray passes through in order. Used for block
//! picking: the first solid cell within reach is the hit, and the face it
//! was entered through gives the placement normal.

use cgmath::{Point3, Vector3};

use super::World;
use crate::voxels::chunk::CHUNK_HEIGHT;

/// The outcome of a `World::raycast` call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastHit {
    /// Whether a solid block was found within reach.
    pub hit: bool,
    /// The grid coordinates of the struck block. Meaningless on a miss.
    pub block_pos: Point3<i32>,
    /// Unit normal of the struck face, pointing out of the block toward
    /// the ray origin. Zero when the ray started inside a solid block.
    pub hit_normal: Vector3<i32>,
}

impl RaycastHit {
    fn miss() -> Self {
        RaycastHit {
            hit: false,
            block_pos: Point3::new(0, 0, 0),
            hit_normal: Vector3::new(0, 0, 0),
        }
    }
}

impl World {
    /// Casts a ray from `origin` along `direction` and returns the first
    /// solid block within `reach` distance, if any.
    ///
    /// Traversal stops early once the ray leaves the vertical block range,
    /// since no block can exist above the build height or below zero.
    ///
    /// # Arguments
    /// * `origin` - Ray start in world space
    /// * `direction` - Ray direction; must be non-zero, need not be normalized
    /// * `reach` - Maximum distance to search, in world units
    pub fn raycast(&self, origin: Point3<f32>, direction: Vector3<f32>, reach: f32) -> RaycastHit {
        let dir = {
            let length =
                (direction.x * direction.x + direction.y * direction.y + direction.z * direction.z)
                    .sqrt();
            if length == 0.0 {
                return RaycastHit::miss();
            }
            [
                direction.x / length,
                direction.y / length,
                direction.z / length,
            ]
        };
        let start = [origin.x, origin.y, origin.z];

        let mut cell = [
            origin.x.floor() as i32,
            origin.y.floor() as i32,
            origin.z.floor() as i32,
        ];

        let mut step = [0i32; 3];
        // Distance along the ray to the next grid line per axis, and the
        // distance between successive grid lines on that axis.
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];

        for axis in 0..3 {
            if dir[axis] > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / dir[axis];
                t_max[axis] = ((cell[axis] + 1) as f32 - start[axis]) / dir[axis];
            } else if dir[axis] < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / dir[axis];
                t_max[axis] = (start[axis] - cell[axis] as f32) / -dir[axis];
            }
        }

        // Starting inside a solid block: report it with no entry face.
        if self.get_block(cell[0], cell[1], cell[2]).is_solid() {
            return RaycastHit {
                hit: true,
                block_pos: Point3::new(cell[0], cell[1], cell[2]),
                hit_normal: Vector3::new(0, 0, 0),
            };
        }

        let mut traveled = 0.0f32;

        while traveled < reach {
            let last_axis = if t_max[0] < t_max[1] && t_max[0] < t_max[2] {
                0
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            traveled = t_max[last_axis];
            cell[last_axis] += step[last_axis];
            t_max[last_axis] += t_delta[last_axis];

            if traveled >= reach {
                break;
            }

            // Traversal stays inside the vertical block range; stepping out
            // of it ends the cast as a miss.
            if !(0..CHUNK_HEIGHT).contains(&cell[1]) {
                break;
            }

            if self.get_block(cell[0], cell[1], cell[2]).is_solid() {
                let mut normal = Vector3::new(0, 0, 0);
                normal[last_axis] = -step[last_axis];
                return RaycastHit {
                    hit: true,
                    block_pos: Point3::new(cell[0], cell[1], cell[2]),
                    hit_normal: normal,
                };
            }
        }

        RaycastHit::miss()
    }
}
