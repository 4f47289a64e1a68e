use ballistic_sim::config::{SimConfig, clamp_to_ui_ranges};
use ballistic_sim::core::trajectory::{
    SamplerSettings, SimulationParams, Trajectory, compute_trajectory_with,
};
use ballistic_sim::{BallisticsError, Playback};
use log::{debug, warn};

/// Slider-backed copy of the launch parameters.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct PanelValues {
    pub(crate) velocity: f32,
    pub(crate) angle: f32,
    pub(crate) height: f32,
    pub(crate) gravity: f32,
}

impl PanelValues {
    fn from_params(params: SimulationParams) -> Self {
        Self {
            velocity: params.velocity as f32,
            angle: params.angle as f32,
            height: params.height as f32,
            gravity: params.gravity as f32,
        }
    }

    fn to_params(self) -> SimulationParams {
        SimulationParams {
            velocity: f64::from(self.velocity),
            angle: f64::from(self.angle),
            height: f64::from(self.height),
            gravity: f64::from(self.gravity),
        }
    }
}

pub(crate) struct ViewerState {
    pub(crate) params: SimulationParams,
    pub(crate) panel: PanelValues,
    pub(crate) sampler: SamplerSettings,
    pub(crate) trajectory: Trajectory,
    pub(crate) playback: Playback,
    pub(crate) sim_speed: f32,
    pub(crate) status_line: String,
}

impl ViewerState {
    pub(crate) fn new(config: SimConfig) -> Result<Self, BallisticsError> {
        let params = clamp_to_ui_ranges(config.launch);
        let trajectory = compute_trajectory_with(params, config.sampler)?;
        let playback = Playback::new(&trajectory);
        Ok(Self {
            params,
            panel: PanelValues::from_params(params),
            sampler: config.sampler,
            trajectory,
            playback,
            sim_speed: config.viewer.sim_speed as f32,
            status_line: "Ready".to_string(),
        })
    }

    /// Recomputes the arc when a slider moved. A rejected parameter set keeps
    /// the previous arc on screen.
    pub(crate) fn sync_panel(&mut self) {
        // Compare in slider precision: 9.81 does not survive an f32 round trip.
        if self.panel == PanelValues::from_params(self.params) {
            return;
        }
        let params = self.panel.to_params();

        match compute_trajectory_with(params, self.sampler) {
            Ok(trajectory) => {
                debug!("panel changed, {} samples", trajectory.len());
                self.params = params;
                self.playback.retarget(&trajectory);
                self.trajectory = trajectory;
                self.status_line = "Parameters updated".to_string();
            }
            Err(err) => {
                warn!("rejected panel values: {err}");
                self.panel = PanelValues::from_params(self.params);
                self.status_line = err.to_string();
            }
        }
    }

    pub(crate) fn toggle_playback(&mut self) {
        self.playback.toggle();
        self.status_line = if self.playback.is_playing() {
            "Playing".to_string()
        } else {
            "Paused".to_string()
        };
    }

    pub(crate) fn reset_playback(&mut self) {
        self.playback.reset();
        self.status_line = "Reset".to_string();
    }
}
