//! Generation settings panel: quantity, size, CFG scale, steps and seed.
//!
//! [`GenerationSettings::validate_settings`] rejects out-of-range values;
//! [`GenerationSettings::clamped`] applies slider semantics instead
//! (clamp to range, snap to the slider step).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 8;

pub const MIN_CFG_SCALE: f64 = 1.0;
pub const MAX_CFG_SCALE: f64 = 20.0;
pub const CFG_SCALE_STEP: f64 = 0.5;

pub const MIN_STEPS: u32 = 10;
pub const MAX_STEPS: u32 = 100;
pub const STEPS_STEP: u32 = 5;

/// `-1` asks the generator to pick a random seed.
pub const RANDOM_SEED: i64 = -1;
pub const MAX_SEED: i64 = i32::MAX as i64;

// ---------------------------------------------------------------------------
// ImageSize
// ---------------------------------------------------------------------------

/// Output resolutions offered by the size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "512x512")]
    Square512,
    #[default]
    #[serde(rename = "1024x1024")]
    Square1024,
    #[serde(rename = "768x1024")]
    Portrait,
    #[serde(rename = "1024x768")]
    Landscape,
    #[serde(rename = "1536x640")]
    Wide,
}

impl ImageSize {
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Square512,
        ImageSize::Square1024,
        ImageSize::Portrait,
        ImageSize::Landscape,
        ImageSize::Wide,
    ];

    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ImageSize::Square512 => (512, 512),
            ImageSize::Square1024 => (1024, 1024),
            ImageSize::Portrait => (768, 1024),
            ImageSize::Landscape => (1024, 768),
            ImageSize::Wide => (1536, 640),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImageSize::Square512 => "Square 512×512",
            ImageSize::Square1024 => "Square 1024×1024",
            ImageSize::Portrait => "Portrait 768×1024",
            ImageSize::Landscape => "Landscape 1024×768",
            ImageSize::Wide => "Wide 1536×640",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{w}x{h}")
    }
}

impl FromStr for ImageSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.to_string() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unsupported image size '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// GenerationSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerationSettings {
    #[validate(range(min = 1, max = 8))]
    pub quantity: u32,
    pub size: ImageSize,
    #[validate(range(min = 1.0, max = 20.0))]
    pub cfg_scale: f64,
    #[validate(range(min = 10, max = 100))]
    pub steps: u32,
    #[validate(range(min = -1, max = 2147483647))]
    pub seed: i64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            quantity: 4,
            size: ImageSize::default(),
            cfg_scale: 7.5,
            steps: 30,
            seed: RANDOM_SEED,
        }
    }
}

impl GenerationSettings {
    /// Reject any value outside the slider ranges.
    pub fn validate_settings(&self) -> Result<(), CoreError> {
        if !self.cfg_scale.is_finite() {
            return Err(CoreError::Validation(
                "cfg_scale must be a finite number".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }

    /// Slider semantics: clamp every knob into range and snap to its step.
    /// A seed below `-1` becomes random.
    pub fn clamped(&self) -> Self {
        let cfg_scale = if self.cfg_scale.is_finite() {
            let snapped = (self.cfg_scale / CFG_SCALE_STEP).round() * CFG_SCALE_STEP;
            snapped.clamp(MIN_CFG_SCALE, MAX_CFG_SCALE)
        } else {
            GenerationSettings::default().cfg_scale
        };
        let steps = self.steps.clamp(MIN_STEPS, MAX_STEPS);
        let steps = ((steps + STEPS_STEP / 2) / STEPS_STEP * STEPS_STEP).min(MAX_STEPS);
        let seed = if self.seed < RANDOM_SEED {
            RANDOM_SEED
        } else {
            self.seed.min(MAX_SEED)
        };

        Self {
            quantity: self.quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
            size: self.size,
            cfg_scale,
            steps,
            seed,
        }
    }

    pub fn is_random_seed(&self) -> bool {
        self.seed == RANDOM_SEED
    }

    /// The seed to send to a generator: a fresh random one for `-1`.
    pub fn effective_seed(&self) -> i64 {
        if self.is_random_seed() {
            rand::rng().random_range(0..=MAX_SEED)
        } else {
            self.seed
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GenerationSettings::default();
        assert!(settings.validate_settings().is_ok());
        assert!(settings.is_random_seed());
        assert_eq!(settings.size.to_string(), "1024x1024");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut s = GenerationSettings::default();
        s.cfg_scale = 20.5;
        assert!(s.validate_settings().is_err());

        let mut s = GenerationSettings::default();
        s.steps = 5;
        assert!(s.validate_settings().is_err());

        let mut s = GenerationSettings::default();
        s.seed = -2;
        assert!(s.validate_settings().is_err());

        let mut s = GenerationSettings::default();
        s.quantity = 0;
        assert!(s.validate_settings().is_err());
    }

    #[test]
    fn rejects_nan_cfg_scale() {
        let mut s = GenerationSettings::default();
        s.cfg_scale = f64::NAN;
        assert!(s.validate_settings().is_err());
    }

    #[test]
    fn effective_seed_resolves_random() {
        let s = GenerationSettings::default();
        assert!((0..=MAX_SEED).contains(&s.effective_seed()));

        let fixed = GenerationSettings {
            seed: 42,
            ..GenerationSettings::default()
        };
        assert_eq!(fixed.effective_seed(), 42);
    }

    #[test]
    fn seed_bounds_are_inclusive() {
        let mut s = GenerationSettings::default();
        s.seed = MAX_SEED;
        assert!(s.validate_settings().is_ok());
    }

    #[test]
    fn clamped_snaps_to_slider_steps() {
        let s = GenerationSettings {
            quantity: 50,
            size: ImageSize::Wide,
            cfg_scale: 7.3,
            steps: 33,
            seed: -40,
        }
        .clamped();

        assert_eq!(s.quantity, MAX_QUANTITY);
        assert_eq!(s.cfg_scale, 7.5);
        assert_eq!(s.steps, 35);
        assert_eq!(s.seed, RANDOM_SEED);
        assert!(s.validate_settings().is_ok());
    }

    #[test]
    fn clamped_respects_bounds() {
        let s = GenerationSettings {
            quantity: 0,
            size: ImageSize::Square512,
            cfg_scale: 0.1,
            steps: 1000,
            seed: i64::MAX,
        }
        .clamped();

        assert_eq!(s.quantity, MIN_QUANTITY);
        assert_eq!(s.cfg_scale, MIN_CFG_SCALE);
        assert_eq!(s.steps, MAX_STEPS);
        assert_eq!(s.seed, MAX_SEED);
    }

    #[test]
    fn image_size_round_trips_through_str() {
        assert_eq!("768x1024".parse::<ImageSize>().unwrap(), ImageSize::Portrait);
        assert_eq!(ImageSize::Wide.dimensions(), (1536, 640));
        assert!("640x480".parse::<ImageSize>().is_err());
    }

    #[test]
    fn image_size_serializes_as_dimensions() {
        let json = serde_json::to_value(ImageSize::Landscape).unwrap();
        assert_eq!(json, "1024x768");
    }
}
