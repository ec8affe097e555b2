// Full bake of synthetic captures: checks tile placement, the Front/Back and
// Left/Right exchange, mirroring of the side tiles and the Up/Down flip.

use glam::Vec3;
use image::{Rgb, RgbImage};
use impostor_baker::{
    AxisAlignedBounds, BakeError, BakeSettings, CameraFrame, FaceName, FaceSet, ImpostorBaker,
    RawFaceImage, bake_from_captures,
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn flat_colour(face: FaceName) -> Rgb<u8> {
    match face {
        FaceName::Front => Rgb([220, 30, 30]),
        FaceName::Back => Rgb([30, 220, 30]),
        FaceName::Left => Rgb([30, 30, 220]),
        FaceName::Right => Rgb([220, 220, 30]),
        FaceName::Up => Rgb([30, 220, 220]),
        FaceName::Down => Rgb([220, 30, 220]),
    }
}

fn near(a: Rgb<u8>, b: Rgb<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

fn unit_bounds() -> AxisAlignedBounds {
    AxisAlignedBounds::new(Vec3::ZERO, Vec3::ONE)
}

fn settings_128() -> BakeSettings {
    BakeSettings {
        texture_size: 128,
        trim_amount: 0.0,
        background_colour: [0, 0, 0],
    }
}

#[test]
fn flat_faces_land_in_swapped_tiles() {
    let captures = FaceSet::from_fn(|face| RawFaceImage::filled(face, 64, 64, flat_colour(face), BLACK));
    let bake = bake_from_captures(&unit_bounds(), captures, settings_128()).expect("bake should succeed");

    assert_eq!(bake.atlas.pixels.dimensions(), (128, 128));

    let expected_source = [
        (FaceName::Front, FaceName::Back),
        (FaceName::Back, FaceName::Front),
        (FaceName::Left, FaceName::Right),
        (FaceName::Right, FaceName::Left),
        (FaceName::Up, FaceName::Up),
        (FaceName::Down, FaceName::Down),
    ];
    for (slot, source) in expected_source {
        let tile = bake.atlas.tile_pixels(slot);
        assert_eq!(tile.dimensions(), (64, 42));
        assert!(
            tile.pixels().all(|p| near(*p, flat_colour(source))),
            "{:?} tile should show the {:?} capture",
            slot,
            source
        );
    }

    assert_eq!(bake.mesh.vertex_count(), 24);
    assert_eq!(bake.mesh.indices.len(), 36);
    assert_eq!(bake.placement.scale, Vec3::splat(2.0));
}

/// Left half `a`, right half `b`.
fn split_horizontal(a: Rgb<u8>, b: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(64, 64, |x, _| if x < 32 { a } else { b })
}

/// Top half `a`, bottom half `b`.
fn split_vertical(a: Rgb<u8>, b: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(64, 64, |_, y| if y < 32 { a } else { b })
}

#[test]
fn side_tiles_are_mirrored_and_vertical_tiles_flipped() {
    let secondary = Rgb([128, 128, 128]);
    let captures = FaceSet::from_fn(|face| {
        let pixels = if face.is_vertical() {
            split_vertical(flat_colour(face), secondary)
        } else {
            split_horizontal(flat_colour(face), secondary)
        };
        RawFaceImage::new(face, pixels, BLACK).unwrap()
    });
    let bake = bake_from_captures(&unit_bounds(), captures, settings_128()).unwrap();

    // Front tile holds the Back capture, mirrored: its colour is now on the right.
    let front = bake.atlas.tile_pixels(FaceName::Front);
    assert!(near(*front.get_pixel(8, 21), secondary));
    assert!(near(*front.get_pixel(56, 21), flat_colour(FaceName::Back)));

    let left = bake.atlas.tile_pixels(FaceName::Left);
    assert!(near(*left.get_pixel(8, 21), secondary));
    assert!(near(*left.get_pixel(56, 21), flat_colour(FaceName::Right)));

    // Up keeps its own capture, flipped top to bottom.
    let up = bake.atlas.tile_pixels(FaceName::Up);
    assert!(near(*up.get_pixel(32, 4), secondary));
    assert!(near(*up.get_pixel(32, 38), flat_colour(FaceName::Up)));

    let down = bake.atlas.tile_pixels(FaceName::Down);
    assert!(near(*down.get_pixel(32, 4), secondary));
    assert!(near(*down.get_pixel(32, 38), flat_colour(FaceName::Down)));
}

#[test]
fn background_border_is_trimmed_before_packing() {
    // Object occupies the centre 32x32 of each 64x64 capture.
    let captures = FaceSet::from_fn(|face| {
        let pixels = RgbImage::from_fn(64, 64, |x, y| {
            if (16..48).contains(&x) && (16..48).contains(&y) {
                flat_colour(face)
            } else {
                BLACK
            }
        });
        RawFaceImage::new(face, pixels, BLACK).unwrap()
    });
    let bake = bake_from_captures(&unit_bounds(), captures, settings_128()).unwrap();

    let up = bake.atlas.tile_pixels(FaceName::Up);
    assert!(up.pixels().all(|p| near(*p, flat_colour(FaceName::Up))));
}

#[test]
fn invisible_faces_fill_with_background() {
    let background = Rgb([10, 20, 30]);
    let captures = FaceSet::from_fn(|face| {
        let colour = if face == FaceName::Down { background } else { flat_colour(face) };
        RawFaceImage::filled(face, 32, 32, colour, background)
    });
    let settings = BakeSettings {
        background_colour: background.0,
        ..settings_128()
    };
    let bake = bake_from_captures(&unit_bounds(), captures, settings).unwrap();

    let down = bake.atlas.tile_pixels(FaceName::Down);
    assert!(down.pixels().all(|p| near(*p, background)));
}

#[test]
fn renderer_sees_tight_frames() {
    let bounds = AxisAlignedBounds::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.5));
    let mut seen: Vec<CameraFrame> = Vec::new();
    let mut renderer = |frame: &CameraFrame, background: Rgb<u8>| {
        seen.push(*frame);
        Ok::<_, BakeError>(RawFaceImage::filled(frame.face, 16, 16, flat_colour(frame.face), background))
    };

    let baker = ImpostorBaker::new(settings_128()).unwrap();
    baker.bake(&bounds, &mut renderer).unwrap();

    let faces: Vec<FaceName> = seen.iter().map(|f| f.face).collect();
    assert_eq!(faces, FaceName::ALL.to_vec());
    assert!((seen[0].ortho_half_extent - 2.0).abs() < 1e-5);
    assert!((seen[2].ortho_half_extent - 1.0).abs() < 1e-5);
    assert!(seen[4].rolled && seen[5].rolled && !seen[0].rolled);
}
