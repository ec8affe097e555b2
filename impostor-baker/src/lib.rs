/// Cube impostor baking: turns six orthographic captures of an object into a
/// single atlas texture and a unit cube mesh that samples it.
pub mod atlas;
pub mod bounds;
pub mod capture;
pub mod direction;
pub mod error;
pub mod export;
pub mod face_image;
pub mod manifest;
pub mod mesh;
pub mod orient;
pub mod pipeline;
pub mod projector;
pub mod settings;
pub mod trim;

pub use atlas::{AtlasLayout, AtlasRegion, AtlasTexture, AtlasTile, pack};
pub use bounds::AxisAlignedBounds;
pub use direction::{FaceName, FaceSet};
pub use error::BakeError;
pub use face_image::{OrientedFaceImage, RawFaceImage, TrimmedFaceImage};
pub use mesh::{ImpostorMesh, ImpostorPlacement, build_cube_mesh};
pub use orient::orient;
pub use pipeline::{FaceRenderer, ImpostorBake, ImpostorBaker, bake_from_captures};
pub use projector::{CameraFrame, compute_frame, compute_frames};
pub use settings::BakeSettings;
pub use trim::trim;
