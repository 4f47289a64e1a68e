//! Projectile-arc sampling and bullet-drop angular adjustment.
//!
//! The numerical core lives in [`core`]: a fixed-step trajectory sampler, a
//! drop-to-MOA converter and a playback clock for animating a sampled arc.
//! [`chart`] and [`export`] turn results into SVG charts, CSV and JSON.

pub mod chart;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod logging;

pub use crate::core::moa::{BallisticTrajectoryData, drop_to_moa, moa_to_drop};
pub use crate::core::playback::Playback;
pub use crate::core::trajectory::{
    SamplerSettings, SimulationParams, Termination, Trajectory, TrajectoryPoint,
    TrajectorySummary, compute_trajectory, compute_trajectory_with,
};
pub use crate::error::BallisticsError;
