/// Atlas resolutions the baker accepts (square, pixels per side)
pub const TEXTURE_SIZE_OPTIONS: [u32; 6] = [64, 128, 256, 512, 1024, 2048];

/// Atlas resolution used when no settings file overrides it
pub const DEFAULT_TEXTURE_SIZE: u32 = 512;

/// Atlas grid columns (tile width = size / columns)
pub const ATLAS_COLUMNS: u32 = 2;

/// Atlas grid rows (tile height = size / rows)
pub const ATLAS_ROWS: u32 = 3;

/// Lower bound of the crop/pad fraction; negative values add padding
pub const MIN_TRIM_AMOUNT: f32 = -0.05;

/// Upper bound of the crop/pad fraction; positive values crop tighter
pub const MAX_TRIM_AMOUNT: f32 = 0.05;

pub fn is_supported_texture_size(size: u32) -> bool {
    TEXTURE_SIZE_OPTIONS.contains(&size)
}
