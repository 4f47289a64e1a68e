use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BallisticsError, require_finite};

pub const INCHES_PER_METER: f64 = 39.37;
/// Scale applied to the drop/distance ratio to express it in minutes of angle.
pub const MOA_INCHES_CONSTANT: f64 = 2.909;

fn require_distance(distance_m: f64) -> Result<f64, BallisticsError> {
    require_finite("distance_m", distance_m)?;
    if distance_m <= 0.0 {
        return Err(BallisticsError::invalid(
            "distance_m",
            format!("must be > 0, got {distance_m}"),
        ));
    }
    Ok(distance_m)
}

/// Converts a bullet drop in inches at `distance_m` metres to an MOA correction.
///
/// `moa = drop_inches / (distance_m * 39.37) * 2.909`. The sign of the drop is
/// kept, so a negative drop yields a negative correction.
pub fn drop_to_moa(drop_inches: f64, distance_m: f64) -> Result<f64, BallisticsError> {
    require_finite("drop_inches", drop_inches)?;
    let distance_inches = require_distance(distance_m)? * INCHES_PER_METER;
    Ok((drop_inches / distance_inches) * MOA_INCHES_CONSTANT)
}

/// Inverse of [`drop_to_moa`].
pub fn moa_to_drop(moa: f64, distance_m: f64) -> Result<f64, BallisticsError> {
    require_finite("moa", moa)?;
    let distance_inches = require_distance(distance_m)? * INCHES_PER_METER;
    Ok(moa / MOA_INCHES_CONSTANT * distance_inches)
}

/// Precomputed drop table for one weapon, as served by the catalog backend.
///
/// `distances` are metres, `drops` inches (index-aligned). `moa_adjustments`
/// is keyed by a distance label such as `"300m"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallisticTrajectoryData {
    pub distances: Vec<f64>,
    pub drops: Vec<f64>,
    #[serde(default)]
    pub moa_adjustments: BTreeMap<String, f64>,
    #[serde(default)]
    pub wind_drift: f64,
    #[serde(default)]
    pub time_to_target: f64,
}

/// Figures printed under the drop chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DropChartSummary {
    pub max_range_m: f64,
    pub max_drop_in: f64,
    pub wind_drift_in: f64,
    pub time_to_target_s: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSource {
    Supplied,
    Derived,
}

/// One line of the MOA table.
///
/// `distance_m` and `drop_in` are `None` for a supplied entry whose label does
/// not match any sampled distance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdjustmentRow {
    pub label: String,
    pub distance_m: Option<f64>,
    pub drop_in: Option<f64>,
    pub moa: f64,
    pub source: AdjustmentSource,
}

/// Parses `"300m"`, `"300 m"` or `"300"` into metres.
pub fn parse_distance_label(label: &str) -> Option<f64> {
    let trimmed = label.trim();
    let number = trimmed
        .strip_suffix('m')
        .or_else(|| trimmed.strip_suffix('M'))
        .unwrap_or(trimmed)
        .trim();
    number.parse::<f64>().ok().filter(|d| d.is_finite())
}

impl BallisticTrajectoryData {
    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        if self.distances.len() != self.drops.len() {
            return Err(BallisticsError::MismatchedSamples {
                distances: self.distances.len(),
                drops: self.drops.len(),
            });
        }
        if self.distances.is_empty() {
            return Err(BallisticsError::EmptyData);
        }
        for (&d, &drop) in self.distances.iter().zip(&self.drops) {
            require_finite("distances", d)?;
            require_finite("drops", drop)?;
        }
        Ok(())
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances.iter().copied().zip(self.drops.iter().copied())
    }

    pub fn max_distance(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    /// Most negative drop, or 0 when nothing falls below the bore line.
    pub fn min_drop(&self) -> f64 {
        self.drops.iter().copied().fold(0.0, f64::min)
    }

    pub fn summary(&self) -> DropChartSummary {
        DropChartSummary {
            max_range_m: self.max_distance(),
            max_drop_in: self.min_drop().abs(),
            wind_drift_in: self.wind_drift,
            time_to_target_s: self.time_to_target,
        }
    }

    fn supplied_adjustment(&self, distance_m: f64) -> Option<(&str, f64)> {
        self.moa_adjustments
            .iter()
            .find(|(label, _)| {
                parse_distance_label(label).is_some_and(|d| (d - distance_m).abs() < 1e-6)
            })
            .map(|(label, &moa)| (label.as_str(), moa))
    }

    /// The MOA table: one row per sampled distance, then any supplied entry
    /// that matched none of them.
    ///
    /// Supplied values are shown as-is. Distances without one are filled in
    /// with [`drop_to_moa`] on the drop magnitude, so a bullet below the bore
    /// line gets a positive (upward) correction. The muzzle (distance 0) has
    /// no derived row.
    pub fn adjustment_table(&self) -> Result<Vec<AdjustmentRow>, BallisticsError> {
        self.validate()?;

        let mut rows = Vec::with_capacity(self.distances.len() + self.moa_adjustments.len());
        let mut used: BTreeSet<&str> = BTreeSet::new();
        for (distance_m, drop_in) in self.samples() {
            let row = match self.supplied_adjustment(distance_m) {
                Some((label, moa)) => {
                    used.insert(label);
                    AdjustmentRow {
                        label: label.to_string(),
                        distance_m: Some(distance_m),
                        drop_in: Some(drop_in),
                        moa,
                        source: AdjustmentSource::Supplied,
                    }
                }
                None if distance_m <= 0.0 => continue,
                None => AdjustmentRow {
                    label: format!("{distance_m}m"),
                    distance_m: Some(distance_m),
                    drop_in: Some(drop_in),
                    moa: drop_to_moa(drop_in.abs(), distance_m)?,
                    source: AdjustmentSource::Derived,
                },
            };
            rows.push(row);
        }

        for (label, &moa) in &self.moa_adjustments {
            if used.contains(label.as_str()) {
                continue;
            }
            rows.push(AdjustmentRow {
                label: label.clone(),
                distance_m: parse_distance_label(label),
                drop_in: None,
                moa,
                source: AdjustmentSource::Supplied,
            });
        }

        debug!(
            "adjustment table: {} rows, {} derived",
            rows.len(),
            rows.iter()
                .filter(|r| r.source == AdjustmentSource::Derived)
                .count()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_data() -> BallisticTrajectoryData {
        BallisticTrajectoryData {
            distances: vec![0.0, 100.0, 200.0, 300.0],
            drops: vec![0.0, -2.5, -10.0, -24.0],
            moa_adjustments: BTreeMap::from([
                ("100m".to_string(), 0.9),
                ("300m".to_string(), 2.1),
            ]),
            wind_drift: 1.25,
            time_to_target: 0.118,
        }
    }

    #[test]
    fn unit_drop_at_hundred_inches() {
        let distance_m = 100.0 / INCHES_PER_METER;
        let moa = drop_to_moa(100.0 / MOA_INCHES_CONSTANT, distance_m).expect("valid");
        assert_relative_eq!(moa, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn formula_constants_are_fixed() {
        let moa = drop_to_moa(-10.0, 200.0).expect("valid");
        assert_relative_eq!(moa, -10.0 / (200.0 * 39.37) * 2.909, epsilon = 1e-15);
    }

    #[test]
    fn moa_to_drop_inverts_conversion() {
        let drop = moa_to_drop(3.0, 250.0).expect("valid");
        let back = drop_to_moa(drop, 250.0).expect("valid");
        assert_relative_eq!(back, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        for distance in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = drop_to_moa(1.0, distance).expect_err("must fail");
            assert!(matches!(
                err,
                BallisticsError::InvalidArgument {
                    name: "distance_m",
                    ..
                }
            ));
        }
    }

    #[test]
    fn distance_labels() {
        assert_eq!(parse_distance_label("300m"), Some(300.0));
        assert_eq!(parse_distance_label(" 300 m "), Some(300.0));
        assert_eq!(parse_distance_label("450"), Some(450.0));
        assert_eq!(parse_distance_label("far"), None);
    }

    #[test]
    fn table_prefers_supplied_values() {
        let rows = sample_data().adjustment_table().expect("valid data");
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].label, "100m");
        assert_eq!(rows[0].distance_m, Some(100.0));
        assert_eq!(rows[0].moa, 0.9);
        assert_eq!(rows[0].source, AdjustmentSource::Supplied);

        assert_eq!(rows[1].distance_m, Some(200.0));
        assert_eq!(rows[1].source, AdjustmentSource::Derived);
        assert_relative_eq!(rows[1].moa, drop_to_moa(10.0, 200.0).expect("valid"));
        assert!(rows[1].moa > 0.0);

        assert_eq!(rows[2].moa, 2.1);
    }

    #[test]
    fn unmatched_supplied_entries_are_kept() {
        let data = BallisticTrajectoryData {
            distances: vec![0.0, 100.0, 200.0],
            drops: vec![0.0, -2.0, -8.0],
            moa_adjustments: BTreeMap::from([
                ("100m".to_string(), 0.5),
                ("200m".to_string(), 1.2),
                ("600m".to_string(), 4.4),
                ("100 yd".to_string(), 0.6),
            ]),
            ..BallisticTrajectoryData::default()
        };
        let rows = data.adjustment_table().expect("valid data");

        let supplied: Vec<(&str, Option<f64>, f64)> = rows
            .iter()
            .filter(|r| r.source == AdjustmentSource::Supplied)
            .map(|r| (r.label.as_str(), r.distance_m, r.moa))
            .collect();
        assert_eq!(
            supplied,
            vec![
                ("100m", Some(100.0), 0.5),
                ("200m", Some(200.0), 1.2),
                ("100 yd", None, 0.6),
                ("600m", Some(600.0), 4.4),
            ]
        );
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.source == AdjustmentSource::Supplied));
    }

    #[test]
    fn supplied_muzzle_entry_is_shown() {
        let data = BallisticTrajectoryData {
            distances: vec![0.0, 100.0],
            drops: vec![0.0, -2.0],
            moa_adjustments: BTreeMap::from([("0m".to_string(), 0.0)]),
            ..BallisticTrajectoryData::default()
        };
        let rows = data.adjustment_table().expect("valid data");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "0m");
        assert_eq!(rows[0].source, AdjustmentSource::Supplied);
        assert_eq!(rows[1].source, AdjustmentSource::Derived);
    }

    #[test]
    fn summary_reports_largest_drop_magnitude() {
        let summary = sample_data().summary();
        assert_eq!(summary.max_range_m, 300.0);
        assert_eq!(summary.max_drop_in, 24.0);
        assert_eq!(summary.wind_drift_in, 1.25);
        assert_eq!(summary.time_to_target_s, 0.118);
    }

    #[test]
    fn parses_backend_json() {
        let json = r#"{
            "distances": [100, 200],
            "drops": [-1.5, -6.0],
            "moaAdjustments": {"100m": 0.4},
            "windDrift": 0.8,
            "timeToTarget": 0.12
        }"#;
        let data = BallisticTrajectoryData::from_json_str(json).expect("valid json");
        assert_eq!(data.distances, vec![100.0, 200.0]);
        assert_eq!(data.moa_adjustments.get("100m"), Some(&0.4));
        assert_eq!(data.time_to_target, 0.12);
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let json = r#"{"distances": [100, 200], "drops": [-1.5]}"#;
        let err = BallisticTrajectoryData::from_json_str(json).expect_err("must fail");
        assert!(matches!(
            err,
            BallisticsError::MismatchedSamples {
                distances: 2,
                drops: 1
            }
        ));
    }

    #[test]
    fn empty_data_is_rejected() {
        let err = BallisticTrajectoryData::default()
            .validate()
            .expect_err("must fail");
        assert!(matches!(err, BallisticsError::EmptyData));
    }
}
