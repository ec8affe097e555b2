/// Bake configuration loaded from JSON.
use crate::error::BakeError;
use constants::capture::DEFAULT_BACKGROUND_COLOUR;
use constants::texture::{
    DEFAULT_TEXTURE_SIZE, MAX_TRIM_AMOUNT, MIN_TRIM_AMOUNT, TEXTURE_SIZE_OPTIONS,
    is_supported_texture_size,
};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration parameters for one bake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    /// Atlas resolution, one of the supported sizes.
    pub texture_size: u32,
    /// Crop (positive) or pad (negative) fraction applied after trimming.
    pub trim_amount: f32,
    /// Clear colour the renderer uses, and the colour trimmed away.
    pub background_colour: [u8; 3],
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            texture_size: DEFAULT_TEXTURE_SIZE,
            trim_amount: 0.0,
            background_colour: DEFAULT_BACKGROUND_COLOUR,
        }
    }
}

impl BakeSettings {
    pub fn from_json_file(path: &Path) -> Result<Self, BakeError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Checks the texture size and clamps the trim amount into its range.
    pub fn validated(self) -> Result<Self, BakeError> {
        if !is_supported_texture_size(self.texture_size) {
            return Err(BakeError::invalid_configuration(format!(
                "texture_size {} is not one of {:?}",
                self.texture_size, TEXTURE_SIZE_OPTIONS
            )));
        }
        if !self.trim_amount.is_finite() {
            return Err(BakeError::invalid_configuration("trim_amount must be a finite number"));
        }

        let trim_amount = self.trim_amount.clamp(MIN_TRIM_AMOUNT, MAX_TRIM_AMOUNT);
        if trim_amount != self.trim_amount {
            log::warn!(
                "trim_amount {} outside [{}, {}], using {}",
                self.trim_amount,
                MIN_TRIM_AMOUNT,
                MAX_TRIM_AMOUNT,
                trim_amount
            );
        }

        Ok(Self {
            trim_amount,
            ..self
        })
    }

    pub fn background(&self) -> Rgb<u8> {
        Rgb(self.background_colour)
    }
}
