use ballistic_sim::core::trajectory::TrajectoryPoint;
use ballistic_sim::core::window::PlotFrame;
use macroquad::prelude::*;

use crate::constants::{
    AXIS_COLOR, GRID_COLOR, GUIDE_COLOR, LABEL_COLOR, PLATFORM_COLOR, PROJECTILE_COLOR,
    X_GRID_LINES, Y_GRID_LINES,
};

fn format_axis_value(value: f64, axis_max: f64) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn to_screen(frame: &PlotFrame, x: f64, y: f64) -> Vec2 {
    let (sx, sy) = frame.to_screen(x, y);
    vec2(sx as f32, sy as f32)
}

pub(crate) fn draw_ui_text(text: &str, x: f32, y: f32, font_size: u16, color: Color) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(frame: &PlotFrame) {
    let (left, right) = (frame.left as f32, frame.right as f32);
    let (top, bottom) = (frame.top as f32, frame.bottom as f32);
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, GRID_COLOR);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, GRID_COLOR);
    }
    draw_line(left, bottom, right, bottom, 2.0, AXIS_COLOR);
    draw_line(left, top, left, bottom, 2.0, AXIS_COLOR);
}

pub(crate) fn draw_axis_tick_labels(frame: &PlotFrame) {
    let (left, right) = (frame.left as f32, frame.right as f32);
    let (top, bottom) = (frame.top as f32, frame.bottom as f32);
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f64 / X_GRID_LINES as f64;
        let x = left + t as f32 * (right - left);
        let label = format_axis_value(t * frame.world_max_x, frame.world_max_x);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(&label, x - size.width * 0.5, bottom + 22.0, tick_font_size, LABEL_COLOR);
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f64 / Y_GRID_LINES as f64;
        let y = bottom - t as f32 * (bottom - top);
        let label = format_axis_value(t * frame.world_max_y, frame.world_max_y);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (left - 8.0) - size.width,
            y + size.height * 0.35,
            tick_font_size,
            LABEL_COLOR,
        );
    }

    draw_ui_text("Distance (m)", right - 130.0, bottom + 48.0, 18, LABEL_COLOR);
    draw_ui_text("Height (m)", left + 10.0, top - 8.0, 18, LABEL_COLOR);
}

/// Full predicted arc, dashed by skipping every other segment.
pub(crate) fn draw_preview(points: &[TrajectoryPoint], frame: &PlotFrame, color: Color) {
    for (i, pair) in points.windows(2).enumerate() {
        if i % 2 == 1 {
            continue;
        }
        let a = to_screen(frame, pair[0].x, pair[0].y);
        let b = to_screen(frame, pair[1].x, pair[1].y);
        draw_line(a.x, a.y, b.x, b.y, 2.0, color);
    }
}

pub(crate) fn draw_path(
    points: &[TrajectoryPoint],
    frame: &PlotFrame,
    thickness: f32,
    color: Color,
) {
    for pair in points.windows(2) {
        let a = to_screen(frame, pair[0].x, pair[0].y);
        let b = to_screen(frame, pair[1].x, pair[1].y);
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
}

pub(crate) fn draw_projectile(frame: &PlotFrame, x: f64, y: f64) {
    let p = to_screen(frame, x, y);
    let ground = to_screen(frame, x, 0.0);
    let wall = to_screen(frame, 0.0, y);

    draw_line(p.x, p.y, ground.x, ground.y, 1.0, GUIDE_COLOR);
    draw_line(p.x, p.y, wall.x, wall.y, 1.0, GUIDE_COLOR);
    draw_circle(p.x, p.y, 14.0, Color::new(1.0, 0.39, 0.39, 0.25));
    draw_circle(p.x, p.y, 8.0, PROJECTILE_COLOR);

    draw_ui_text(&format!("x: {x:.1}m"), p.x + 15.0, p.y - 10.0, 16, WHITE);
    draw_ui_text(&format!("y: {y:.1}m"), p.x + 15.0, p.y + 10.0, 16, WHITE);
}

pub(crate) fn draw_platform(frame: &PlotFrame, height: f64) {
    if height <= 0.0 {
        return;
    }
    let top = to_screen(frame, 0.0, height);
    let base = to_screen(frame, 0.0, 0.0);
    draw_rectangle(top.x - 20.0, top.y, 20.0, base.y - top.y, PLATFORM_COLOR);
}
