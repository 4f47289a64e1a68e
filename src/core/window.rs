pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Pads the data extents and widens one axis so the window keeps a 2:1 ratio.
pub fn fixed_ratio_axis_window(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

/// Maps world metres onto a screen rectangle whose y axis grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub world_max_x: f64,
    pub world_max_y: f64,
}

impl PlotFrame {
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        let sx = self.left + (x / self.world_max_x.max(1.0)) * plot_w;
        let sy = self.bottom - (y / self.world_max_y.max(1.0)) * plot_h;
        (sx, sy)
    }
}
