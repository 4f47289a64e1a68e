use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;

pub const LEFT_MARGIN: f32 = 430.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 110.0;
pub const BOTTOM_MARGIN: f32 = 110.0;

pub const TITLE_Y: f32 = 46.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 10;

/// Largest frame delta fed to the playhead, so a stalled frame cannot skip the flight.
pub const MAX_FRAME_DT_S: f32 = 0.1;

pub const BACKGROUND: Color = Color::new(0.06, 0.09, 0.16, 1.0);
pub const GRID_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.15);
pub const AXIS_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.8);
pub const LABEL_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.9);
pub const PREVIEW_COLOR: Color = Color::new(0.23, 0.51, 0.96, 0.45);
pub const TRAIL_COLOR: Color = Color::new(0.23, 0.51, 0.96, 1.0);
pub const PROJECTILE_COLOR: Color = Color::new(0.94, 0.27, 0.27, 1.0);
pub const GUIDE_COLOR: Color = Color::new(1.0, 0.39, 0.39, 0.5);
pub const PLATFORM_COLOR: Color = Color::new(0.39, 0.39, 0.39, 0.5);
