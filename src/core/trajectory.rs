use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{BallisticsError, require_finite};

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const MOON_GRAVITY_MPS2: f64 = 1.6;

/// Fixed sampling interval of the animated arc.
pub const TIME_STEP_S: f64 = 0.02;
/// Simulated time after which sampling stops even if the projectile is airborne.
pub const MAX_SIM_TIME_S: f64 = 100.0;
/// Upper bound on `max_time_s / time_step_s`, the number of samples one run may emit.
pub const MAX_SAMPLES: f64 = 1_000_000.0;

/// Launch parameters of a drag-free projectile.
///
/// `angle` is in degrees above the horizontal; everything else is SI.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub velocity: f64,
    pub angle: f64,
    pub height: f64,
    pub gravity: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            velocity: 50.0,
            angle: 45.0,
            height: 0.0,
            gravity: EARTH_GRAVITY_MPS2,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_finite("velocity", self.velocity)?;
        require_finite("angle", self.angle)?;
        require_finite("height", self.height)?;
        require_finite("gravity", self.gravity)?;

        if self.velocity < 0.0 {
            return Err(BallisticsError::invalid("velocity", "cannot be negative"));
        }
        if self.height < 0.0 {
            return Err(BallisticsError::invalid("height", "cannot be below ground"));
        }
        if self.gravity <= 0.0 {
            return Err(BallisticsError::invalid(
                "gravity",
                format!("must be > 0, got {}", self.gravity),
            ));
        }
        Ok(())
    }
}

/// Step size and time cutoff of the sampler.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    pub time_step_s: f64,
    pub max_time_s: f64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            time_step_s: TIME_STEP_S,
            max_time_s: MAX_SIM_TIME_S,
        }
    }
}

impl SamplerSettings {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_finite("time_step_s", self.time_step_s)?;
        require_finite("max_time_s", self.max_time_s)?;
        if self.time_step_s <= 0.0 {
            return Err(BallisticsError::invalid("time_step_s", "must be > 0"));
        }
        if self.max_time_s < 0.0 {
            return Err(BallisticsError::invalid("max_time_s", "cannot be negative"));
        }
        let steps = self.max_time_s / self.time_step_s;
        if steps > MAX_SAMPLES {
            return Err(BallisticsError::invalid(
                "time_step_s",
                format!(
                    "{} s over {} s would take {steps:.0} steps, more than {MAX_SAMPLES}",
                    self.time_step_s, self.max_time_s
                ),
            ));
        }
        Ok(())
    }
}

/// One sampled instant of the flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Why the sampler stopped emitting points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The last point is the first post-launch sample clamped to the ground.
    GroundImpact,
    /// The next sample would have passed the time cutoff.
    SafetyBound,
}

/// Readout shown next to the arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub max_range: f64,
    pub max_height: f64,
    pub flight_time: f64,
    pub termination: Termination,
}

/// An eagerly sampled, immutable flight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
    termination: Termination,
    #[serde(skip)]
    launch_height: f64,
}

impl Trajectory {
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// True when the flight ended on the ground rather than at the cutoff.
    pub fn landed(&self) -> bool {
        self.termination == Termination::GroundImpact
    }

    pub fn end_time(&self) -> f64 {
        self.last().map_or(0.0, |p| p.t)
    }

    pub fn summary(&self) -> TrajectorySummary {
        let max_height = self
            .points
            .iter()
            .fold(self.launch_height, |acc, p| acc.max(p.y));
        TrajectorySummary {
            max_range: self.last().map_or(0.0, |p| p.x),
            max_height,
            flight_time: self.end_time(),
            termination: self.termination,
        }
    }

    pub fn into_points(self) -> Vec<TrajectoryPoint> {
        self.points
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

pub fn velocity_components(params: &SimulationParams) -> (f64, f64) {
    let theta = params.angle.to_radians();
    let vx = params.velocity * theta.cos();
    let vy = params.velocity * theta.sin();
    (vx, vy)
}

/// Unclamped position at `time_s`; `y` goes negative after landing.
pub fn position_at_time(params: &SimulationParams, time_s: f64) -> (f64, f64) {
    let (vx, vy) = velocity_components(params);
    let x = vx * time_s;
    let y = params.height + (vy * time_s) - (0.5 * params.gravity * time_s * time_s);
    (x, y)
}

/// Exact landing and apex values of the drag-free arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalyticFlight {
    pub landing_time_s: f64,
    pub range_m: f64,
    pub apex_time_s: f64,
    pub apex_height_m: f64,
}

pub fn analytic_flight(params: &SimulationParams) -> Result<AnalyticFlight, BallisticsError> {
    params.validate()?;

    let (_, vy) = velocity_components(params);
    let g = params.gravity;
    // height >= 0 keeps the discriminant non-negative.
    let disc = vy * vy + 2.0 * g * params.height;
    let landing_time_s = (vy + disc.sqrt()) / g;
    let (range_m, _) = position_at_time(params, landing_time_s);

    let apex_time_s = (vy / g).max(0.0);
    let (_, apex_height_m) = position_at_time(params, apex_time_s);

    Ok(AnalyticFlight {
        landing_time_s,
        range_m,
        apex_time_s,
        apex_height_m,
    })
}

/// Samples the flight every 0.02 s until ground contact or 100 s.
pub fn compute_trajectory(params: SimulationParams) -> Result<Trajectory, BallisticsError> {
    compute_trajectory_with(params, SamplerSettings::default())
}

pub fn compute_trajectory_with(
    params: SimulationParams,
    settings: SamplerSettings,
) -> Result<Trajectory, BallisticsError> {
    params.validate()?;
    settings.validate()?;

    let (vx, vy0) = velocity_components(&params);
    let g = params.gravity;
    let mut points = Vec::new();
    let mut step: u64 = 0;

    let termination = loop {
        // Index-based so the step never accumulates rounding drift.
        let t = step as f64 * settings.time_step_s;
        if t > settings.max_time_s {
            break Termination::SafetyBound;
        }

        let x = vx * t;
        let mut y = params.height + vy0 * t - 0.5 * g * t * t;
        if y < 0.0 {
            y = 0.0;
        }

        points.push(TrajectoryPoint {
            t,
            x,
            y,
            vx,
            vy: vy0 - g * t,
        });

        if y == 0.0 && t > 0.0 {
            break Termination::GroundImpact;
        }
        step += 1;
    };

    if termination == Termination::SafetyBound {
        warn!(
            "trajectory cut at {:.2} s before ground contact (v={}, angle={}, g={})",
            points.last().map_or(0.0, |p| p.t),
            params.velocity,
            params.angle,
            params.gravity
        );
    }
    debug!(
        "sampled {} points, termination {:?}",
        points.len(),
        termination
    );

    Ok(Trajectory {
        points,
        termination,
        launch_height: params.height,
    })
}
