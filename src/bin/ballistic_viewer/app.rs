use std::path::Path;

use anyhow::{Context, Result};
use ballistic_sim::config::SimConfig;
use ballistic_sim::core::playback::{interpolate, revealed_len};
use ballistic_sim::core::window::{PlotFrame, fixed_ratio_axis_window};
use macroquad::prelude::*;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MAX_FRAME_DT_S, MSAA_SAMPLES, PREVIEW_COLOR, RIGHT_MARGIN, TOP_MARGIN, TRAIL_COLOR,
};
use crate::controls::{apply_actions, draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::render::{
    draw_axis_tick_labels, draw_grid, draw_path, draw_platform, draw_preview, draw_projectile,
};
use crate::state::ViewerState;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Ballistic Viewer".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn plot_frame(state: &ViewerState, screen_w: f32, screen_h: f32) -> PlotFrame {
    let summary = state.trajectory.summary();
    let (world_max_x, world_max_y) =
        fixed_ratio_axis_window(summary.max_range, summary.max_height);
    PlotFrame {
        left: f64::from(LEFT_MARGIN),
        right: f64::from(screen_w - RIGHT_MARGIN),
        top: f64::from(TOP_MARGIN),
        bottom: f64::from(screen_h - BOTTOM_MARGIN),
        world_max_x,
        world_max_y,
    }
}

pub(crate) async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let mut state = ViewerState::new(config).context("invalid launch defaults")?;

    loop {
        let frame_dt = get_frame_time().min(MAX_FRAME_DT_S);
        let screen_w = screen_width();
        let screen_h = screen_height();

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        state.sync_panel();
        apply_actions(&mut state, actions);
        let now = state
            .playback
            .tick(f64::from(frame_dt) * f64::from(state.sim_speed));

        let frame = plot_frame(&state, screen_w, screen_h);
        let points = state.trajectory.points();

        clear_background(BACKGROUND);
        draw_grid(&frame);
        draw_axis_tick_labels(&frame);
        draw_preview(points, &frame, PREVIEW_COLOR);

        let revealed = revealed_len(&state.trajectory, now);
        if now > 0.0 && revealed > 1 {
            draw_path(&points[..revealed], &frame, 3.0, TRAIL_COLOR);
        }
        if let Some((x, y)) = interpolate(&state.trajectory, now) {
            draw_projectile(&frame, x, y);
        }
        draw_platform(&frame, state.params.height);

        draw_hud(&state, LEFT_MARGIN, screen_h);

        next_frame().await;
    }
}
