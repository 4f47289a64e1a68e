use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::trajectory::{Termination, Trajectory, TrajectoryPoint, TrajectorySummary};
use crate::error::BallisticsError;

/// Write sampled points as CSV.
///
/// Columns: t, x, y, vx, vy
pub fn write_trajectory_csv<W: Write>(
    writer: &mut W,
    trajectory: &Trajectory,
) -> Result<(), BallisticsError> {
    writeln!(writer, "t,x,y,vx,vy")?;
    for p in trajectory {
        writeln!(
            writer,
            "{:.2},{:.4},{:.4},{:.6},{:.6}",
            p.t, p.x, p.y, p.vx, p.vy
        )?;
    }
    Ok(())
}

pub fn write_trajectory_csv_file(path: &Path, trajectory: &Trajectory) -> Result<(), BallisticsError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_trajectory_csv(&mut file, trajectory)?;
    file.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct TrajectoryDocument<'a> {
    termination: Termination,
    summary: TrajectorySummary,
    points: &'a [TrajectoryPoint],
}

/// Write the full trajectory, its termination and readout as pretty JSON.
pub fn write_trajectory_json<W: Write>(
    writer: &mut W,
    trajectory: &Trajectory,
) -> Result<(), BallisticsError> {
    let doc = TrajectoryDocument {
        termination: trajectory.termination(),
        summary: trajectory.summary(),
        points: trajectory.points(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}
