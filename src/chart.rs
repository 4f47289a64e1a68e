//! Static SVG charts of a sampled arc and of a weapon's drop table.

use std::fmt::Display;
use std::path::Path;

use log::info;
use plotters::prelude::*;

use crate::core::moa::BallisticTrajectoryData;
use crate::core::trajectory::{SimulationParams, Trajectory};
use crate::core::window::fixed_ratio_axis_window;
use crate::error::BallisticsError;

pub const CHART_SIZE: (u32, u32) = (900, 540);
const GRID_LINES: usize = 10;

const ARC_COLOR: RGBColor = RGBColor(59, 130, 246);
const PLATFORM_COLOR: RGBColor = RGBColor(120, 120, 120);
const POINT_COLOR: RGBColor = RGBColor(96, 165, 250);

fn chart_err(err: impl Display) -> BallisticsError {
    BallisticsError::Chart(err.to_string())
}

/// Render the arc with its readout in the caption.
pub fn render_trajectory_chart(
    path: &Path,
    trajectory: &Trajectory,
    params: &SimulationParams,
) -> Result<(), BallisticsError> {
    let summary = trajectory.summary();
    let (max_x, max_y) = fixed_ratio_axis_window(summary.max_range, summary.max_height);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let caption = format!(
        "v={} m/s  angle={}\u{b0}  h={} m  g={} m/s\u{b2}  |  range {:.2} m, max height {:.2} m, flight {:.2} s",
        params.velocity,
        params.angle,
        params.height,
        params.gravity,
        summary.max_range,
        summary.max_height,
        summary.flight_time
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 16))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0f64..max_x, 0f64..max_y)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(GRID_LINES + 1)
        .y_labels(GRID_LINES + 1)
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(chart_err)?;

    if params.height > 0.0 {
        let platform_w = max_x * 0.015;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.0), (platform_w, params.height)],
                PLATFORM_COLOR.mix(0.5).filled(),
            )))
            .map_err(chart_err)?;
    }

    chart
        .draw_series(LineSeries::new(
            trajectory.iter().map(|p| (p.x, p.y)),
            ARC_COLOR.stroke_width(3),
        ))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("wrote trajectory chart to {}", path.display());
    Ok(())
}

/// Render drop (inches) against distance (metres), from the deepest drop up
/// to the bore line.
pub fn render_drop_chart(
    path: &Path,
    data: &BallisticTrajectoryData,
    weapon_name: &str,
) -> Result<(), BallisticsError> {
    data.validate()?;

    let max_distance = data.max_distance().max(1.0);
    let min_drop = data.min_drop().min(-1.0);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Ballistic trajectory - {weapon_name}"),
            ("sans-serif", 20),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0f64..max_distance, min_drop..0f64)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(GRID_LINES + 1)
        .y_labels(GRID_LINES + 1)
        .x_label_formatter(&|d| format!("{}m", d.round()))
        .y_label_formatter(&|drop| format!("{}\"", drop.round()))
        .x_desc("Distance (m)")
        .y_desc("Drop (in)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(data.samples(), ARC_COLOR.stroke_width(3)))
        .map_err(chart_err)?;
    chart
        .draw_series(
            data.samples()
                .map(|point| Circle::new(point, 3, POINT_COLOR.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("wrote drop chart for {weapon_name} to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trajectory::compute_trajectory;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ballistic_sim_{}_{name}", std::process::id()))
    }

    #[test]
    fn trajectory_chart_is_svg() {
        let params = SimulationParams {
            height: 20.0,
            ..SimulationParams::default()
        };
        let traj = compute_trajectory(params).expect("valid params");
        let path = scratch_path("arc.svg");

        render_trajectory_chart(&path, &traj, &params).expect("render");
        let svg = fs::read_to_string(&path).expect("written");
        let _ = fs::remove_file(&path);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Distance (m)"));
    }

    #[test]
    fn drop_chart_is_svg() {
        let data = BallisticTrajectoryData {
            distances: vec![0.0, 100.0, 200.0, 300.0],
            drops: vec![0.0, -2.0, -9.0, -22.0],
            ..BallisticTrajectoryData::default()
        };
        let path = scratch_path("drop.svg");

        render_drop_chart(&path, &data, "Test Rifle").expect("render");
        let svg = fs::read_to_string(&path).expect("written");
        let _ = fs::remove_file(&path);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Test Rifle"));
    }

    #[test]
    fn drop_chart_rejects_misaligned_data() {
        let data = BallisticTrajectoryData {
            distances: vec![100.0],
            drops: vec![],
            ..BallisticTrajectoryData::default()
        };
        let err = render_drop_chart(&scratch_path("bad.svg"), &data, "x").expect_err("invalid");
        assert!(matches!(err, BallisticsError::MismatchedSamples { .. }));
    }
}
