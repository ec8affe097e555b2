// Bake from a capture directory on disk and export the results.

use image::{Rgb, RgbImage};
use impostor_baker::capture::{BOUNDS_FILE, CaptureDirectory, discover_capture_dirs};
use impostor_baker::export::{ATLAS_FILE, ImpostorExporter, MANIFEST_FILE, MESHES_DIR, MESH_FILE, TEXTURES_DIR};
use impostor_baker::manifest::ImpostorManifest;
use impostor_baker::{BakeError, BakeSettings, FaceName, ImpostorBaker, ImpostorMesh};
use std::fs;
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("impostor-baker-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_capture(dir: &Path, skip: Option<FaceName>) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(BOUNDS_FILE),
        r#"{ "origin": [0, 0, 0], "parts": [ { "center": [0, 1, 0], "extents": [0.5, 1, 0.5] } ] }"#,
    )
    .unwrap();

    for face in FaceName::ALL {
        if Some(face) == skip {
            continue;
        }
        let colour = Rgb([40 + face.index() as u8 * 30, 90, 200]);
        let img = RgbImage::from_fn(48, 48, |x, y| {
            if (8..40).contains(&x) && (4..44).contains(&y) { colour } else { Rgb([0, 0, 0]) }
        });
        img.save(dir.join(format!("{}.png", face.file_stem()))).unwrap();
    }
}

#[test]
fn discovers_sorted_sub_directories() {
    let root = scratch_dir("discover");
    write_capture(&root.join("b_tree"), None);
    write_capture(&root.join("a_rock"), None);
    fs::create_dir_all(root.join("not_a_capture")).unwrap();

    let found = discover_capture_dirs(&root).unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a_rock", "b_tree"]);

    let single = discover_capture_dirs(&root.join("a_rock")).unwrap();
    assert_eq!(single.len(), 1);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn bakes_and_exports_a_capture_directory() {
    let root = scratch_dir("export");
    let capture_path = root.join("crate_box");
    write_capture(&capture_path, None);

    let mut capture = CaptureDirectory::new(&capture_path);
    let bounds = capture.bounds().unwrap();
    assert_eq!(bounds.size(), glam::Vec3::new(1.0, 2.0, 1.0));

    let baker = ImpostorBaker::new(BakeSettings {
        texture_size: 256,
        ..BakeSettings::default()
    })
    .unwrap();
    let bake = baker.bake(&bounds, &mut capture).unwrap();

    let output = root.join("out");
    let manifest = ImpostorExporter::new(&output, &capture.name).export(&bake).unwrap();
    assert_eq!(manifest.name, "crate_box");
    assert_eq!(manifest.tiles.len(), 6);

    let atlas = image::open(output.join(TEXTURES_DIR).join(ATLAS_FILE)).unwrap().to_rgb8();
    assert_eq!(atlas.dimensions(), (256, 256));
    assert_eq!(atlas, bake.atlas.pixels);

    let mesh: ImpostorMesh =
        serde_json::from_str(&fs::read_to_string(output.join(MESHES_DIR).join(MESH_FILE)).unwrap()).unwrap();
    assert_eq!(mesh, bake.mesh);

    let written: ImpostorManifest =
        serde_json::from_str(&fs::read_to_string(output.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(written.texture_size, 256);
    assert_eq!(written.placement.scale, glam::Vec3::new(1.0, 2.0, 1.0));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_capture_is_an_upstream_failure() {
    let root = scratch_dir("missing");
    write_capture(&root, Some(FaceName::Right));

    let mut capture = CaptureDirectory::new(&root);
    let bounds = capture.bounds().unwrap();
    let baker = ImpostorBaker::new(BakeSettings::default()).unwrap();

    match baker.bake(&bounds, &mut capture) {
        Err(BakeError::UpstreamRenderFailure { face: FaceName::Right, .. }) => {}
        other => panic!("expected Right face failure, got {:?}", other.map(|_| ())),
    }

    fs::remove_dir_all(&root).unwrap();
}
