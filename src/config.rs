//! Typed configuration for the glitch loader and the loading gate.
//!
//! Consolidates the animation constants into validated structs instead of
//! scattering magic numbers through the render loop. Trigger timing for the
//! reveal system lives in [`crate::reveal::TriggerConfig`], next to the state
//! machine it drives.

use serde::{Deserialize, Serialize};

/// Configuration for the procedural glitch text renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlitchConfig {
    /// Text rendered onto the master bitmap.
    pub text: String,

    /// Font size in pixels.
    pub font_size: f32,

    /// Font weight (100-900).
    pub font_weight: u16,

    /// Fraction of `fuzz_range` each row may be displaced (0.0-1.0).
    pub intensity: f32,

    /// Maximum jitter span in pixels.
    pub fuzz_range: u32,

    /// Horizontal padding on each side of the measured text.
    pub padding: u32,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            text: "Robosoc".to_string(),
            font_size: 120.0,
            font_weight: 900,
            intensity: 0.25,
            fuzz_range: 30,
            padding: 50,
        }
    }
}

impl GlitchConfig {
    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.font_size = self.font_size.clamp(8.0, 512.0);
        self.font_weight = self.font_weight.clamp(100, 900);
        self.intensity = self.intensity.clamp(0.0, 1.0);
        self.fuzz_range = self.fuzz_range.min(200);
        self.padding = self.padding.min(512);
    }

    /// Upper bound on per-row displacement magnitude for this config.
    ///
    /// Displacements are sampled as `floor((random - 0.5) * intensity *
    /// fuzz_range)`, so `|dx|` never exceeds `intensity * fuzz_range` floored.
    pub fn max_displacement(&self) -> i32 {
        (f64::from(self.intensity) * f64::from(self.fuzz_range)).floor() as i32
    }
}

/// Configuration for the loading-screen gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// Minimum time the loader stays on screen, in milliseconds.
    ///
    /// The gate is a timer, not a readiness check: the loader is shown for
    /// this long even when the page behind it is ready sooner.
    pub min_duration_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 3000,
        }
    }
}

impl LoaderConfig {
    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.min_duration_ms = self.min_duration_ms.min(30_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_glitch_config() {
        let config = GlitchConfig::default();
        assert_eq!(config.text, "Robosoc");
        assert_eq!(config.font_size, 120.0);
        assert_eq!(config.font_weight, 900);
        assert_eq!(config.intensity, 0.25);
        assert_eq!(config.fuzz_range, 30);
        assert_eq!(config.padding, 50);
    }

    #[test]
    fn test_glitch_validation() {
        let mut config = GlitchConfig {
            intensity: 3.0,    // Over max
            fuzz_range: 1000,  // Over max
            font_weight: 50,   // Under min
            ..Default::default()
        };
        config.validate();

        assert_eq!(config.intensity, 1.0);
        assert_eq!(config.fuzz_range, 200);
        assert_eq!(config.font_weight, 100);
    }

    #[test]
    fn test_max_displacement_at_defaults() {
        // 0.25 * 30 = 7.5, floored to 7.
        let config = GlitchConfig::default();
        assert_eq!(config.max_displacement(), 7);
    }

    #[test]
    fn test_loader_defaults_and_clamp() {
        let config = LoaderConfig::default();
        assert_eq!(config.min_duration_ms, 3000);

        let mut config = LoaderConfig {
            min_duration_ms: 120_000,
        };
        config.validate();
        assert_eq!(config.min_duration_ms, 30_000);
    }

    #[test]
    fn test_config_round_trips_camel_case() {
        let json = r#"{"fontSize": 96.0, "fuzzRange": 20}"#;
        let config: GlitchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.font_size, 96.0);
        assert_eq!(config.fuzz_range, 20);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.text, "Robosoc");
    }
}
