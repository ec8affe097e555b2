/// Writes baked impostors and camera frames to disk.
use crate::direction::FaceSet;
use crate::error::BakeError;
use crate::manifest::ImpostorManifest;
use crate::pipeline::ImpostorBake;
use crate::projector::CameraFrame;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEXTURES_DIR: &str = "Textures";
pub const MESHES_DIR: &str = "Meshes";
pub const ATLAS_FILE: &str = "ImpostorAtlas.png";
pub const MESH_FILE: &str = "ImpostorMesh.json";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const FRAMES_FILE: &str = "frames.json";

/// Output layout for one impostor: `Textures/`, `Meshes/` and a manifest.
pub struct ImpostorExporter {
    /// Base output directory for all generated files.
    output_dir: PathBuf,
    /// Object name recorded in the manifest.
    name: String,
}

impl ImpostorExporter {
    pub fn new(output_dir: &Path, name: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            name: name.to_string(),
        }
    }

    /// Writes the atlas PNG, the mesh JSON and the manifest. Returns the manifest.
    pub fn export(&self, bake: &ImpostorBake) -> Result<ImpostorManifest, BakeError> {
        fs::create_dir_all(self.output_dir.join(TEXTURES_DIR))?;
        fs::create_dir_all(self.output_dir.join(MESHES_DIR))?;

        let texture_file = format!("{}/{}", TEXTURES_DIR, ATLAS_FILE);
        let mesh_file = format!("{}/{}", MESHES_DIR, MESH_FILE);

        bake.atlas.pixels.save(self.output_dir.join(&texture_file))?;
        fs::write(
            self.output_dir.join(&mesh_file),
            serde_json::to_string_pretty(&bake.mesh)?,
        )?;

        let manifest = ImpostorManifest::from_bake(&self.name, &texture_file, &mesh_file, bake);
        let manifest_path = self.output_dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

        log::info!("Generated impostor manifest: {}", manifest_path.display());
        Ok(manifest)
    }
}

/// Writes the six camera frames as a JSON array in capture order.
pub fn write_frames(path: &Path, frames: &FaceSet<CameraFrame>) -> Result<(), BakeError> {
    let list: Vec<&CameraFrame> = frames.iter().map(|(_, frame)| frame).collect();
    fs::write(path, serde_json::to_string_pretty(&list)?)?;
    log::info!("Wrote camera frames: {}", path.display());
    Ok(())
}
