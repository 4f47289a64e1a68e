use ballistic_sim::core::trajectory::Termination;
use macroquad::prelude::*;

use crate::constants::{LABEL_COLOR, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::ViewerState;

fn playback_text(state: &ViewerState) -> &'static str {
    if state.playback.is_playing() {
        "Playing"
    } else if state.playback.is_finished() {
        "Finished"
    } else if state.playback.time() > 0.0 {
        "Paused"
    } else {
        "Ready"
    }
}

pub(crate) fn draw_hud(state: &ViewerState, left: f32, screen_h: f32) {
    draw_ui_text("Ballistic Drop Simulation", left, TITLE_Y, 32, WHITE);
    draw_ui_text(
        "Adjust the parameters and watch the projectile's path | Space play/pause | R reset",
        left,
        TITLE_Y + 28.0,
        18,
        LABEL_COLOR,
    );

    let summary = state.trajectory.summary();
    let ended = match summary.termination {
        Termination::GroundImpact => "ground impact",
        Termination::SafetyBound => "time limit",
    };
    draw_ui_text(
        &format!(
            "Range: {:.2} m | Max height: {:.2} m | Flight time: {:.2} s | Ends: {}",
            summary.max_range, summary.max_height, summary.flight_time, ended
        ),
        left,
        screen_h - 45.0,
        22,
        WHITE,
    );
    draw_ui_text(
        &format!(
            "t = {:.2} s | Speed x{:.2} | {} | {}",
            state.playback.time(),
            state.sim_speed,
            playback_text(state),
            state.status_line
        ),
        left,
        screen_h - 16.0,
        18,
        SKYBLUE,
    );
}
