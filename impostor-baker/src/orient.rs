/// Fixed per-face orientation applied between trimming and packing.
use crate::direction::{FaceName, FaceSet};
use crate::face_image::{OrientedFaceImage, TrimmedFaceImage};
use image::imageops;

/// Faces mirrored horizontally once their identities have been swapped.
const MIRRORED_FACES: [FaceName; 4] = [FaceName::Front, FaceName::Back, FaceName::Left, FaceName::Right];

/// Aligns the six trimmed captures with the atlas convention. Must run
/// exactly once per bake.
///
/// 1. Front/Back and Left/Right exchange images: the captures are taken
///    looking along each axis, so each one shows the opposite face.
/// 2. The four side slots are mirrored horizontally.
/// 3. Up and Down are flipped vertically to undo the capture roll.
///
/// The swap happens before the mirror.
pub fn orient(mut faces: FaceSet<TrimmedFaceImage>) -> FaceSet<OrientedFaceImage> {
    faces.swap(FaceName::Front, FaceName::Back);
    faces.swap(FaceName::Left, FaceName::Right);

    faces.map(|slot, trimmed| {
        let pixels = if MIRRORED_FACES.contains(&slot) {
            imageops::flip_horizontal(&trimmed.pixels)
        } else if slot.is_vertical() {
            imageops::flip_vertical(&trimmed.pixels)
        } else {
            trimmed.pixels
        };

        log::debug!("{:?} slot takes {:?} capture", slot, trimmed.face);

        OrientedFaceImage {
            slot,
            source: trimmed.face,
            pixels,
        }
    })
}
