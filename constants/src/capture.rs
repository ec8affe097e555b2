/// Camera distance from the bounds centre, as a multiple of the extents length
pub const CAMERA_DISTANCE_MARGIN: f32 = 1.1;

/// Near/far planes sit at -/+ this multiple of the extents length
pub const CLIP_PLANE_FACTOR: f32 = 2.0;

/// RGB distance (channels on a 0-1 scale) below which a pixel counts as background
pub const BACKGROUND_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Clear colour used for captures unless configured otherwise
pub const DEFAULT_BACKGROUND_COLOUR: [u8; 3] = [0, 0, 0];
