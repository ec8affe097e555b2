/// Six-tile atlas layout and packing for cube impostors.
use crate::direction::{FaceName, FaceSet};
use crate::error::BakeError;
use crate::face_image::OrientedFaceImage;
use constants::texture::{ATLAS_COLUMNS, ATLAS_ROWS, TEXTURE_SIZE_OPTIONS, is_supported_texture_size};
use image::imageops;
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// UV coordinate bounds for atlas tile access in normalized space.
/// V runs upward from the bottom edge of the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasRegion {
    /// Minimum UV coordinates (bottom-left corner).
    pub uv_min: [f32; 2],
    /// Maximum UV coordinates (top-right corner).
    pub uv_max: [f32; 2],
}

impl AtlasRegion {
    /// Normalizes a bottom-left-origin pixel rectangle against the atlas size.
    pub fn from_pixel_rect(x: u32, y: u32, width: u32, height: u32, atlas_size: u32) -> Self {
        let size = atlas_size as f32;
        Self {
            uv_min: [x as f32 / size, y as f32 / size],
            uv_max: [(x + width) as f32 / size, (y + height) as f32 / size],
        }
    }

    /// Corners in the order bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let [u0, v0] = self.uv_min;
        let [u1, v1] = self.uv_max;
        [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]
    }
}

/// Placement of one face inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasTile {
    pub face: FaceName,
    /// Grid coordinates in tile units, origin at the bottom-left.
    pub column: u32,
    pub row: u32,
    /// Pixel origin of the tile, origin at the bottom-left, y upward.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub uv_bounds: AtlasRegion,
}

impl AtlasTile {
    /// Row of the tile's top edge in the top-to-bottom pixel buffer.
    pub fn image_top(&self, atlas_size: u32) -> u32 {
        atlas_size - self.y - self.height
    }
}

/// Fixed 2x3 grid of face tiles for a given atlas resolution.
#[derive(Debug, Clone)]
pub struct AtlasLayout {
    pub texture_size: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    tiles: FaceSet<AtlasTile>,
}

impl AtlasLayout {
    /// Builds the layout, rejecting resolutions outside the supported set.
    /// Tile sizes use integer division, so a strip of up to two rows along
    /// the top of the atlas belongs to no tile.
    pub fn new(texture_size: u32) -> Result<Self, BakeError> {
        if !is_supported_texture_size(texture_size) {
            return Err(BakeError::invalid_configuration(format!(
                "texture size {} is not one of {:?}",
                texture_size, TEXTURE_SIZE_OPTIONS
            )));
        }

        let tile_width = texture_size / ATLAS_COLUMNS;
        let tile_height = texture_size / ATLAS_ROWS;

        let tiles = FaceSet::from_fn(|face| {
            let (column, row) = grid_position(face);
            let x = column * tile_width;
            let y = row * tile_height;
            AtlasTile {
                face,
                column,
                row,
                x,
                y,
                width: tile_width,
                height: tile_height,
                uv_bounds: AtlasRegion::from_pixel_rect(x, y, tile_width, tile_height, texture_size),
            }
        });

        Ok(Self {
            texture_size,
            tile_width,
            tile_height,
            tiles,
        })
    }

    pub fn tile(&self, face: FaceName) -> &AtlasTile {
        &self.tiles[face]
    }

    /// Tiles in capture order.
    pub fn tiles(&self) -> impl Iterator<Item = &AtlasTile> {
        self.tiles.iter().map(|(_, tile)| tile)
    }
}

/// Grid cell (column, row) of each face, row 0 at the bottom.
pub fn grid_position(face: FaceName) -> (u32, u32) {
    match face {
        FaceName::Front => (0, 2),
        FaceName::Back => (1, 2),
        FaceName::Left => (0, 1),
        FaceName::Right => (1, 1),
        FaceName::Up => (0, 0),
        FaceName::Down => (1, 0),
    }
}

/// Baked atlas: a square RGB buffer plus the layout that addresses it.
#[derive(Debug, Clone)]
pub struct AtlasTexture {
    pub layout: AtlasLayout,
    /// Rows top to bottom, as written to image files.
    pub pixels: RgbImage,
}

impl AtlasTexture {
    pub fn size(&self) -> u32 {
        self.layout.texture_size
    }

    /// Copy of one face's tile.
    pub fn tile_pixels(&self, face: FaceName) -> RgbImage {
        let tile = self.layout.tile(face);
        imageops::crop_imm(
            &self.pixels,
            tile.x,
            tile.image_top(self.size()),
            tile.width,
            tile.height,
        )
        .to_image()
    }

    /// Tightly packed RGB bytes for the persistence layer.
    pub fn raw_rgb(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Resizes each oriented face to its tile and composites the atlas.
pub fn pack(faces: FaceSet<OrientedFaceImage>, texture_size: u32) -> Result<AtlasTexture, BakeError> {
    let layout = AtlasLayout::new(texture_size)?;
    Ok(pack_into_layout(faces, layout))
}

pub fn pack_into_layout(faces: FaceSet<OrientedFaceImage>, layout: AtlasLayout) -> AtlasTexture {
    let size = layout.texture_size;
    let mut pixels = RgbImage::from_pixel(size, size, Rgb([0, 0, 0]));

    for (slot, face) in faces.into_map() {
        let tile = layout.tile(slot);
        let resized = resize_bilinear(&face.pixels, tile.width, tile.height);
        imageops::replace(&mut pixels, &resized, tile.x as i64, tile.image_top(size) as i64);
        log::debug!(
            "Packed {:?} capture ({}x{}) into {:?} tile at ({}, {})",
            face.source,
            face.pixels.width(),
            face.pixels.height(),
            slot,
            tile.column,
            tile.row
        );
    }

    AtlasTexture { layout, pixels }
}

/// Resamples with one 2x2 bilinear tap per output texel centre, clamped at
/// the edges. Unlike a filtered resize the footprint does not widen when
/// shrinking.
fn resize_bilinear(source: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (source_width, source_height) = source.dimensions();
    let scale_x = source_width as f32 / width as f32;
    let scale_y = source_height as f32 / height as f32;

    RgbImage::from_fn(width, height, |x, y| {
        let (x0, x1, fx) = bilinear_taps(x, scale_x, source_width);
        let (y0, y1, fy) = bilinear_taps(y, scale_y, source_height);
        let top = [source.get_pixel(x0, y0), source.get_pixel(x1, y0)];
        let bottom = [source.get_pixel(x0, y1), source.get_pixel(x1, y1)];

        Rgb(std::array::from_fn(|c| {
            let upper = lerp(top[0].0[c] as f32, top[1].0[c] as f32, fx);
            let lower = lerp(bottom[0].0[c] as f32, bottom[1].0[c] as f32, fx);
            lerp(upper, lower, fy).round().clamp(0.0, 255.0) as u8
        }))
    })
}

/// Neighbouring source indices and blend weight for output index `i`.
fn bilinear_taps(i: u32, scale: f32, limit: u32) -> (u32, u32, f32) {
    let last = (limit - 1) as f32;
    let position = ((i as f32 + 0.5) * scale - 0.5).clamp(0.0, last);
    let lower = position.floor();
    let upper = (lower + 1.0).min(last);
    (lower as u32, upper as u32, position - lower)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
