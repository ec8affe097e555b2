/// Impostor manifest linking the baked atlas, mesh and placement.
use crate::atlas::AtlasTile;
use crate::bounds::AxisAlignedBounds;
use crate::mesh::ImpostorPlacement;
use crate::pipeline::ImpostorBake;
use serde::{Deserialize, Serialize};

/// Everything a host needs to instantiate the impostor and wire it as a
/// lower LOD level: the files, the transform, and the tile layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpostorManifest {
    /// Object name the impostor stands in for.
    pub name: String,
    /// Atlas image, relative to the manifest.
    pub texture_file: String,
    /// Mesh arrays, relative to the manifest.
    pub mesh_file: String,
    pub texture_size: u32,
    pub trim_amount: f32,
    pub background_colour: [u8; 3],
    pub bounds: AxisAlignedBounds,
    pub placement: ImpostorPlacement,
    pub tiles: Vec<AtlasTile>,
}

impl ImpostorManifest {
    pub fn from_bake(name: &str, texture_file: &str, mesh_file: &str, bake: &ImpostorBake) -> Self {
        Self {
            name: name.to_string(),
            texture_file: texture_file.to_string(),
            mesh_file: mesh_file.to_string(),
            texture_size: bake.atlas.size(),
            trim_amount: bake.settings.trim_amount,
            background_colour: bake.settings.background_colour,
            bounds: bake.bounds,
            placement: bake.placement,
            tiles: bake.atlas.layout.tiles().copied().collect(),
        }
    }

    /// Prints manifest summary for verification and debugging.
    pub fn print_summary(&self) {
        println!("Impostor Summary: {}", self.name);
        println!("  Atlas: {} ({}x{})", self.texture_file, self.texture_size, self.texture_size);
        println!("  Mesh: {}", self.mesh_file);
        println!(
            "  Bounds: centre ({:.3}, {:.3}, {:.3}) size ({:.3}, {:.3}, {:.3})",
            self.bounds.center.x,
            self.bounds.center.y,
            self.bounds.center.z,
            self.placement.scale.x,
            self.placement.scale.y,
            self.placement.scale.z
        );
        for tile in &self.tiles {
            println!(
                "  {:?}: {}x{} at ({}, {})",
                tile.face, tile.width, tile.height, tile.x, tile.y
            );
        }
    }
}
