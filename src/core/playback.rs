//! Playhead over a sampled trajectory.
//!
//! The clock is advanced with explicit frame deltas so any frame loop (or a
//! test) can drive it.

use crate::core::trajectory::{Trajectory, TrajectoryPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    time_s: f64,
    end_time_s: f64,
    playing: bool,
}

impl Playback {
    pub fn new(trajectory: &Trajectory) -> Self {
        Self {
            time_s: 0.0,
            end_time_s: trajectory.end_time(),
            playing: false,
        }
    }

    pub fn time(&self) -> f64 {
        self.time_s
    }

    pub fn end_time(&self) -> f64 {
        self.end_time_s
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.time_s >= self.end_time_s
    }

    /// Starts playback, rewinding first if the previous run reached the end.
    pub fn play(&mut self) {
        if self.is_finished() {
            self.time_s = 0.0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn reset(&mut self) {
        self.playing = false;
        self.time_s = 0.0;
    }

    /// Points the playhead at a freshly computed trajectory.
    pub fn retarget(&mut self, trajectory: &Trajectory) {
        self.end_time_s = trajectory.end_time();
        self.time_s = 0.0;
    }

    /// Advances by `dt_s` seconds and returns the new playhead time.
    ///
    /// Reaching the last sample clamps the playhead there and stops playback.
    pub fn tick(&mut self, dt_s: f64) -> f64 {
        if !self.playing || !dt_s.is_finite() || dt_s < 0.0 {
            return self.time_s;
        }

        let next = self.time_s + dt_s;
        if next >= self.end_time_s {
            self.time_s = self.end_time_s;
            self.playing = false;
        } else {
            self.time_s = next;
        }
        self.time_s
    }
}

fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a * (1.0 - ratio) + b * ratio
}

fn bracket(points: &[TrajectoryPoint], time_s: f64) -> Option<(usize, usize)> {
    let last = points.len().checked_sub(1)?;
    let upper = points
        .iter()
        .position(|p| p.t >= time_s)
        .unwrap_or(last);
    Some((upper.saturating_sub(1), upper))
}

/// Linear interpolation of the projectile position at `time_s`.
///
/// Times before launch give the launch point and times past the end give
/// the final sample.
pub fn interpolate(trajectory: &Trajectory, time_s: f64) -> Option<(f64, f64)> {
    let points = trajectory.points();
    let (lo, hi) = bracket(points, time_s)?;
    let (a, b) = (points[lo], points[hi]);

    let ratio = if b.t != a.t {
        ((time_s - a.t) / (b.t - a.t)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Some((lerp(a.x, b.x, ratio), lerp(a.y, b.y, ratio)))
}

/// Number of samples the playhead has reached, including the one it is
/// heading towards.
pub fn revealed_len(trajectory: &Trajectory, time_s: f64) -> usize {
    match bracket(trajectory.points(), time_s) {
        Some((_, hi)) => hi + 1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trajectory::{SimulationParams, compute_trajectory};
    use approx::assert_relative_eq;

    fn flat_shot() -> Trajectory {
        compute_trajectory(SimulationParams::default()).expect("valid params")
    }

    #[test]
    fn tick_is_ignored_while_paused() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        assert_eq!(playback.tick(0.5), 0.0);
        assert!(!playback.is_playing());
    }

    #[test]
    fn tick_advances_and_stops_at_end() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        playback.play();

        assert_relative_eq!(playback.tick(1.0), 1.0);
        assert_relative_eq!(playback.tick(0.25), 1.25);
        assert!(playback.is_playing());

        let end = playback.tick(100.0);
        assert_eq!(end, traj.end_time());
        assert!(!playback.is_playing());
        assert!(playback.is_finished());
    }

    #[test]
    fn play_after_finish_rewinds() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        playback.play();
        playback.tick(100.0);
        playback.play();
        assert_eq!(playback.time(), 0.0);
        assert!(playback.is_playing());
    }

    #[test]
    fn reset_pauses_and_rewinds() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        playback.toggle();
        playback.tick(2.0);
        playback.reset();
        assert_eq!(playback.time(), 0.0);
        assert!(!playback.is_playing());
    }

    #[test]
    fn negative_and_nan_deltas_do_not_move() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        playback.play();
        playback.tick(1.0);
        assert_eq!(playback.tick(-0.5), 1.0);
        assert_eq!(playback.tick(f64::NAN), 1.0);
    }

    #[test]
    fn retarget_rewinds_to_new_end() {
        let traj = flat_shot();
        let mut playback = Playback::new(&traj);
        playback.play();
        playback.tick(3.0);

        let steeper = compute_trajectory(SimulationParams {
            angle: 80.0,
            ..SimulationParams::default()
        })
        .expect("valid params");
        playback.retarget(&steeper);
        assert_eq!(playback.time(), 0.0);
        assert_eq!(playback.end_time(), steeper.end_time());
    }

    #[test]
    fn interpolates_between_samples() {
        let traj = flat_shot();
        let p1 = traj.points()[1];
        let p2 = traj.points()[2];
        let (x, y) = interpolate(&traj, (p1.t + p2.t) / 2.0).expect("non-empty");
        assert_relative_eq!(x, (p1.x + p2.x) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(y, (p1.y + p2.y) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolation_clamps_to_ends() {
        let traj = flat_shot();
        assert_eq!(interpolate(&traj, 0.0), Some((0.0, 0.0)));

        let last = traj.last().expect("non-empty");
        assert_eq!(interpolate(&traj, 500.0), Some((last.x, last.y)));
    }

    #[test]
    fn revealed_len_tracks_playhead() {
        let traj = flat_shot();
        assert_eq!(revealed_len(&traj, 0.0), 1);
        assert_eq!(revealed_len(&traj, 0.03), 3);
        assert_eq!(revealed_len(&traj, 1e6), traj.len());
    }
}
