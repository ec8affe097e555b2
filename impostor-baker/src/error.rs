/// Error types for impostor baking operations.
use crate::direction::FaceName;

/// Failure that aborts the current bake. Degenerate geometry is never one of
/// these: empty captures are absorbed by the trimmer's fallback.
#[derive(thiserror::Error, Debug)]
pub enum BakeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Renderer failed for {face:?} face: {reason}")]
    UpstreamRenderFailure { face: FaceName, reason: String },

    #[error("No image supplied for {0:?} face")]
    MissingFace(FaceName),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BakeError {
    pub fn invalid_configuration<T: ToString>(msg: T) -> Self {
        BakeError::InvalidConfiguration(msg.to_string())
    }

    pub fn render_failure<T: ToString>(face: FaceName, reason: T) -> Self {
        BakeError::UpstreamRenderFailure {
            face,
            reason: reason.to_string(),
        }
    }
}
