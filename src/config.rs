use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::trajectory::{
    EARTH_GRAVITY_MPS2, MOON_GRAVITY_MPS2, SamplerSettings, SimulationParams,
};
use crate::error::BallisticsError;

pub const VELOCITY_RANGE_MPS: RangeInclusive<f64> = 10.0..=100.0;
pub const ANGLE_RANGE_DEG: RangeInclusive<f64> = 0.0..=90.0;
pub const HEIGHT_RANGE_M: RangeInclusive<f64> = 0.0..=50.0;
pub const GRAVITY_RANGE_MPS2: RangeInclusive<f64> = 1.0..=20.0;

pub const GRAVITY_PRESETS: [(&str, f64); 2] =
    [("Moon", MOON_GRAVITY_MPS2), ("Earth", EARTH_GRAVITY_MPS2)];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Playback speed multiplier applied to frame time.
    pub sim_speed: f64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self { sim_speed: 1.0 }
    }
}

/// On-disk configuration. Every section is optional.
///
/// ```json
/// { "launch": { "velocity": 80, "angle": 30 }, "sampler": { "max_time_s": 60 } }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub launch: SimulationParams,
    pub sampler: SamplerSettings,
    pub viewer: ViewerSettings,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, BallisticsError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        self.launch.validate()?;
        self.sampler.validate()?;
        if !self.viewer.sim_speed.is_finite() || self.viewer.sim_speed <= 0.0 {
            return Err(BallisticsError::invalid("sim_speed", "must be > 0"));
        }
        Ok(())
    }
}

/// Clamps parameters into the ranges offered by the slider panel.
pub fn clamp_to_ui_ranges(params: SimulationParams) -> SimulationParams {
    let clamp = |v: f64, r: &RangeInclusive<f64>| v.clamp(*r.start(), *r.end());
    SimulationParams {
        velocity: clamp(params.velocity, &VELOCITY_RANGE_MPS),
        angle: clamp(params.angle, &ANGLE_RANGE_DEG),
        height: clamp(params.height, &HEIGHT_RANGE_M),
        gravity: clamp(params.gravity, &GRAVITY_RANGE_MPS2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SimConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.sampler.time_step_s, 0.02);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "launch": { "velocity": 80, "angle": 30 }, "sampler": { "max_time_s": 60 } }"#,
        )
        .expect("valid config");
        assert_eq!(config.launch.velocity, 80.0);
        assert_eq!(config.launch.angle, 30.0);
        assert_eq!(config.launch.gravity, EARTH_GRAVITY_MPS2);
        assert_eq!(config.sampler.max_time_s, 60.0);
        assert_eq!(config.sampler.time_step_s, 0.02);
    }

    #[test]
    fn invalid_launch_is_rejected() {
        let err = SimConfig::from_json_str(r#"{ "launch": { "gravity": 0 } }"#)
            .expect_err("zero gravity");
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn invalid_sim_speed_is_rejected() {
        assert!(SimConfig::from_json_str(r#"{ "viewer": { "sim_speed": 0 } }"#).is_err());
    }

    #[test]
    fn clamps_into_slider_ranges() {
        let clamped = clamp_to_ui_ranges(SimulationParams {
            velocity: 500.0,
            angle: -10.0,
            height: 75.0,
            gravity: 0.5,
        });
        assert_eq!(
            clamped,
            SimulationParams {
                velocity: 100.0,
                angle: 0.0,
                height: 50.0,
                gravity: 1.0,
            }
        );
    }
}
