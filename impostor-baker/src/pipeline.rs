/// Bake orchestration: frames, captures, trim, orient, pack and mesh.
use crate::atlas::{self, AtlasLayout, AtlasTexture};
use crate::bounds::AxisAlignedBounds;
use crate::direction::FaceSet;
use crate::error::BakeError;
use crate::face_image::RawFaceImage;
use crate::mesh::{ImpostorMesh, ImpostorPlacement, build_cube_mesh};
use crate::orient::orient;
use crate::projector::{CameraFrame, compute_frames};
use crate::settings::BakeSettings;
use crate::trim::trim;
use image::Rgb;

/// Host capability that rasterizes the object for one camera frame.
///
/// Implementations return an RGB capture of the requested face cleared to
/// `background`. Errors abort the bake; the baker never retries.
pub trait FaceRenderer {
    fn render(&mut self, frame: &CameraFrame, background: Rgb<u8>) -> Result<RawFaceImage, BakeError>;
}

impl<F> FaceRenderer for F
where
    F: FnMut(&CameraFrame, Rgb<u8>) -> Result<RawFaceImage, BakeError>,
{
    fn render(&mut self, frame: &CameraFrame, background: Rgb<u8>) -> Result<RawFaceImage, BakeError> {
        self(frame, background)
    }
}

/// Everything one bake produces, handed to persistence as plain data.
#[derive(Debug, Clone)]
pub struct ImpostorBake {
    pub bounds: AxisAlignedBounds,
    pub placement: ImpostorPlacement,
    pub atlas: AtlasTexture,
    pub mesh: ImpostorMesh,
    pub settings: BakeSettings,
}

/// Stateless baker; every call to `bake` is independent.
#[derive(Debug, Clone)]
pub struct ImpostorBaker {
    settings: BakeSettings,
}

impl ImpostorBaker {
    /// Validates the settings up front so a bad configuration fails before
    /// any rendering happens.
    pub fn new(settings: BakeSettings) -> Result<Self, BakeError> {
        Ok(Self {
            settings: settings.validated()?,
        })
    }

    pub fn bake(
        &self,
        bounds: &AxisAlignedBounds,
        renderer: &mut impl FaceRenderer,
    ) -> Result<ImpostorBake, BakeError> {
        let layout = AtlasLayout::new(self.settings.texture_size)?;
        let background = self.settings.background();

        log::info!(
            "Baking impostor: centre {:?}, extents {:?}, {}x{} atlas, trim {}",
            bounds.center,
            bounds.extents,
            layout.texture_size,
            layout.texture_size,
            self.settings.trim_amount
        );
        if bounds.is_degenerate() {
            log::warn!("Bounds have zero extent on at least one axis");
        }

        let frames = compute_frames(bounds);
        let trimmed = frames.try_map(|face, frame| {
            let raw = renderer.render(&frame, background)?;
            if raw.face != face {
                return Err(BakeError::render_failure(
                    face,
                    format!("renderer returned a {:?} capture", raw.face),
                ));
            }
            log::debug!(
                "{:?} captured {}x{} (ortho half extent {:.4})",
                face,
                raw.pixels.width(),
                raw.pixels.height(),
                frame.ortho_half_extent
            );
            // Raw capture is dropped here, only the crop moves on.
            Ok(trim(&raw, self.settings.trim_amount))
        })?;

        let oriented = orient(trimmed);
        let atlas = atlas::pack_into_layout(oriented, layout);
        let mesh = build_cube_mesh(&atlas.layout);

        log::info!(
            "Baked {}x{} atlas and {}-vertex mesh",
            atlas.size(),
            atlas.size(),
            mesh.vertex_count()
        );

        Ok(ImpostorBake {
            bounds: *bounds,
            placement: ImpostorPlacement::from_bounds(bounds),
            atlas,
            mesh,
            settings: self.settings,
        })
    }
}

/// Runs the trim/orient/pack stages over captures the caller already holds.
pub fn bake_from_captures(
    bounds: &AxisAlignedBounds,
    captures: FaceSet<RawFaceImage>,
    settings: BakeSettings,
) -> Result<ImpostorBake, BakeError> {
    let baker = ImpostorBaker::new(settings)?;
    let mut captures = captures.map(|_, raw| Some(raw));
    let mut renderer = |frame: &CameraFrame, _background: Rgb<u8>| {
        captures[frame.face]
            .take()
            .ok_or(BakeError::MissingFace(frame.face))
    };
    baker.bake(bounds, &mut renderer)
}
