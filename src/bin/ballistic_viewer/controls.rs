use ballistic_sim::config::{
    ANGLE_RANGE_DEG, GRAVITY_PRESETS, GRAVITY_RANGE_MPS2, HEIGHT_RANGE_M, VELOCITY_RANGE_MPS,
};
use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};
use std::ops::{Range, RangeInclusive};

use crate::state::ViewerState;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) play_pause: bool,
    pub(crate) reset: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            play_pause: self.play_pause || other.play_pause,
            reset: self.reset || other.reset,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        play_pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
    }
}

fn slider_range(range: RangeInclusive<f64>) -> Range<f32> {
    (*range.start() as f32)..(*range.end() as f32)
}

pub(crate) fn draw_control_panel(state: &mut ViewerState) -> FrameActions {
    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 110.0), vec2(380.0, 330.0))
        .label("Parameters")
        .ui(&mut *root_ui(), |ui| {
            ui.slider(
                hash!(),
                "Velocity (m/s)",
                slider_range(VELOCITY_RANGE_MPS),
                &mut state.panel.velocity,
            );
            ui.slider(
                hash!(),
                "Angle (deg)",
                slider_range(ANGLE_RANGE_DEG),
                &mut state.panel.angle,
            );
            ui.slider(
                hash!(),
                "Height (m)",
                slider_range(HEIGHT_RANGE_M),
                &mut state.panel.height,
            );
            ui.slider(
                hash!(),
                "Gravity (m/s^2)",
                slider_range(GRAVITY_RANGE_MPS2),
                &mut state.panel.gravity,
            );
            for (name, gravity) in GRAVITY_PRESETS {
                let preset_label = format!("{name} ({gravity})");
                if ui.button(None, preset_label.as_str()) {
                    state.panel.gravity = gravity as f32;
                }
            }
            ui.separator();
            ui.slider(hash!(), "Playback Speed", 0.25..4.0, &mut state.sim_speed);
            ui.separator();
            let play_label = if state.playback.is_playing() {
                "Pause (Space)"
            } else {
                "Play (Space)"
            };
            if ui.button(None, play_label) {
                actions.play_pause = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
        });

    actions
}

pub(crate) fn apply_actions(state: &mut ViewerState, actions: FrameActions) {
    if actions.play_pause {
        state.toggle_playback();
    }
    if actions.reset {
        state.reset_playback();
    }
}
