/// Orthographic camera framing for each capture direction.
use crate::bounds::AxisAlignedBounds;
use crate::direction::{FaceName, FaceSet};
use constants::capture::{CAMERA_DISTANCE_MARGIN, CLIP_PLANE_FACTOR};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera placement handed to the external renderer for one capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub face: FaceName,
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Half of the visible height (and width, the capture is square).
    pub ortho_half_extent: f32,
    pub near: f32,
    pub far: f32,
    /// The renderer rolls the camera 180 degrees about `right` before capturing.
    /// Only set for Up and Down; the orienter flips those images back.
    pub rolled: bool,
}

/// Computes the tight orthographic frame for viewing `bounds` along `face`.
///
/// The half extent is the larger of the two half spans of the 8 projected box
/// corners, so the silhouette is never clipped and no resolution is wasted.
pub fn compute_frame(bounds: &AxisAlignedBounds, face: FaceName) -> CameraFrame {
    let forward = face.direction();
    let (right, up) = camera_basis(forward);

    let reach = bounds.extents.length();
    let position = bounds.center - forward * (reach * CAMERA_DISTANCE_MARGIN);

    let mut min_u = f32::MAX;
    let mut max_u = f32::MIN;
    let mut min_v = f32::MAX;
    let mut max_v = f32::MIN;
    for corner in bounds.corners() {
        let to_corner = corner - position;
        let u = to_corner.dot(right);
        let v = to_corner.dot(up);
        min_u = min_u.min(u);
        max_u = max_u.max(u);
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }

    let half_horizontal = (max_u - min_u) / 2.0;
    let half_vertical = (max_v - min_v) / 2.0;

    CameraFrame {
        face,
        position,
        forward,
        right,
        up,
        ortho_half_extent: half_horizontal.max(half_vertical),
        near: -reach * CLIP_PLANE_FACTOR,
        far: reach * CLIP_PLANE_FACTOR,
        rolled: face.is_vertical(),
    }
}

/// Frames for all six directions in capture order
pub fn compute_frames(bounds: &AxisAlignedBounds) -> FaceSet<CameraFrame> {
    FaceSet::from_fn(|face| compute_frame(bounds, face))
}

/// Right and up axes for a view direction. World up seeds the basis unless the
/// view is parallel to it, in which case world forward is used instead.
fn camera_basis(forward: Vec3) -> (Vec3, Vec3) {
    let mut seed_up = Vec3::Y;
    let mut right = forward.cross(seed_up);
    if right.length_squared() <= f32::EPSILON {
        seed_up = Vec3::Z;
        right = forward.cross(seed_up);
    }
    let right = right.normalize();
    let up = right.cross(forward).normalize();
    (right, up)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AxisAlignedBounds {
        AxisAlignedBounds::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn basis_is_orthonormal_for_every_face() {
        for face in FaceName::ALL {
            let frame = compute_frame(&unit_box(), face);
            assert!(frame.up.dot(frame.forward).abs() < 1e-6, "{:?}", face);
            assert!(frame.right.dot(frame.forward).abs() < 1e-6, "{:?}", face);
            assert!(frame.right.dot(frame.up).abs() < 1e-6, "{:?}", face);
            assert!((frame.up.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn horizontal_views_keep_world_up() {
        for face in [FaceName::Front, FaceName::Back, FaceName::Left, FaceName::Right] {
            let frame = compute_frame(&unit_box(), face);
            assert!(frame.up.abs_diff_eq(Vec3::Y, 1e-6), "{:?} up {:?}", face, frame.up);
            assert!(!frame.rolled);
        }
    }

    #[test]
    fn vertical_views_fall_back_to_world_forward() {
        for face in [FaceName::Up, FaceName::Down] {
            let frame = compute_frame(&unit_box(), face);
            assert!(frame.up.dot(Vec3::Z).abs() > 0.999, "{:?} up {:?}", face, frame.up);
            assert!(frame.rolled);
        }
    }

    #[test]
    fn camera_sits_outside_bounding_sphere() {
        let bounds = AxisAlignedBounds::new(Vec3::new(2.0, -1.0, 4.0), Vec3::new(1.0, 2.0, 0.5));
        let reach = bounds.extents.length();
        for face in FaceName::ALL {
            let frame = compute_frame(&bounds, face);
            let distance = frame.position.distance(bounds.center);
            assert!((distance - reach * 1.1).abs() < 1e-4);
            assert!((frame.near + 2.0 * reach).abs() < 1e-5);
            assert!((frame.far - 2.0 * reach).abs() < 1e-5);
        }
    }

    #[test]
    fn unit_cube_extent_is_one() {
        for face in FaceName::ALL {
            let frame = compute_frame(&unit_box(), face);
            assert!((frame.ortho_half_extent - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn flat_box_uses_its_larger_span() {
        let bounds = AxisAlignedBounds::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 0.25));
        assert!((compute_frame(&bounds, FaceName::Front).ortho_half_extent - 4.0).abs() < 1e-5);
        assert!((compute_frame(&bounds, FaceName::Left).ortho_half_extent - 1.0).abs() < 1e-5);
        assert!((compute_frame(&bounds, FaceName::Up).ortho_half_extent - 4.0).abs() < 1e-5);
    }

    #[test]
    fn zero_size_bounds_give_zero_extent() {
        let frame = compute_frame(&AxisAlignedBounds::point(Vec3::new(1.0, 2.0, 3.0)), FaceName::Right);
        assert_eq!(frame.ortho_half_extent, 0.0);
        assert_eq!(frame.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
