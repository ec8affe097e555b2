/// Pre-rendered capture directories used as the renderer for offline bakes.
///
/// A capture directory holds `bounds.json` plus one image per face named
/// after the face (`front.png`, `back.png`, ... `down.png`).
use crate::bounds::AxisAlignedBounds;
use crate::error::BakeError;
use crate::face_image::RawFaceImage;
use crate::pipeline::FaceRenderer;
use crate::projector::CameraFrame;
use glam::Vec3;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const BOUNDS_FILE: &str = "bounds.json";
pub const CAPTURE_EXTENSION: &str = "png";

/// Bounds description stored next to the captures: the object's origin and
/// the bounds of each renderable part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureBounds {
    #[serde(default)]
    pub origin: Vec3,
    #[serde(default)]
    pub parts: Vec<AxisAlignedBounds>,
}

impl CaptureBounds {
    pub fn from_json_file(path: &Path) -> Result<Self, BakeError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Union of all parts, or a zero-size box at the origin.
    pub fn resolve(&self) -> AxisAlignedBounds {
        AxisAlignedBounds::from_parts(self.origin, &self.parts)
    }
}

/// Capture directory discovered during scanning.
#[derive(Debug, Clone)]
pub struct CaptureDirectory {
    /// Directory holding the captures.
    pub path: PathBuf,
    /// Object name derived from the directory name.
    pub name: String,
}

impl CaptureDirectory {
    pub fn new(path: &Path) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            path: path.to_path_buf(),
            name,
        }
    }

    pub fn bounds(&self) -> Result<AxisAlignedBounds, BakeError> {
        Ok(CaptureBounds::from_json_file(&self.path.join(BOUNDS_FILE))?.resolve())
    }

    pub fn capture_path(&self, frame: &CameraFrame) -> PathBuf {
        self.path
            .join(frame.face.file_stem())
            .with_extension(CAPTURE_EXTENSION)
    }
}

impl FaceRenderer for CaptureDirectory {
    fn render(&mut self, frame: &CameraFrame, background: Rgb<u8>) -> Result<RawFaceImage, BakeError> {
        let path = self.capture_path(frame);
        let decoded = image::open(&path)
            .map_err(|e| BakeError::render_failure(frame.face, format!("{}: {}", path.display(), e)))?;
        RawFaceImage::new(frame.face, decoded.to_rgb8(), background)
    }
}

/// Finds capture directories under `root`. The root itself counts when it
/// holds a bounds file; otherwise each immediate sub-directory that does.
pub fn discover_capture_dirs(root: &Path) -> Result<Vec<CaptureDirectory>, BakeError> {
    if root.join(BOUNDS_FILE).is_file() {
        return Ok(vec![CaptureDirectory::new(root)]);
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && path.join(BOUNDS_FILE).is_file() {
            candidates.push(CaptureDirectory::new(&path));
        }
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));

    log::info!("Found {} capture directories under {}", candidates.len(), root.display());
    for (i, candidate) in candidates.iter().enumerate() {
        log::debug!("  {}: {}", i, candidate.name);
    }

    Ok(candidates)
}
