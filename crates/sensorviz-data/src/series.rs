//! Chart- and table-ready views over imported data.
//!
//! The rendering layer plots time series keyed by timestamp and shows
//! statistics in small tables; these helpers produce exactly those shapes so
//! the charting side stays a read-only consumer of the import result.

use sensorviz_core::formatting::format_measurement;
use sensorviz_core::models::{Channel, MotionRecord, MotionStats, NoiseRecord, NoiseStats};

/// Decimal places used when displaying motion statistics.
const MOTION_DECIMALS: u32 = 3;

/// Decimal places used when displaying noise statistics.
const NOISE_DECIMALS: u32 = 2;

// ── Time series ───────────────────────────────────────────────────────────────

/// Time-series points `[timestamp, value]` for one motion channel, in record
/// order.
///
/// Records whose cell for `channel` is not numeric are skipped; they still
/// exist in the record sequence, they just have nothing to plot for this
/// line.
pub fn motion_series(records: &[MotionRecord], channel: Channel) -> Vec<[f64; 2]> {
    records
        .iter()
        .filter_map(|record| {
            record
                .channel_number(channel)
                .map(|value| [record.timestamp, value])
        })
        .collect()
}

/// Time-series points for the noise channel, one per record.
pub fn noise_series(records: &[NoiseRecord]) -> Vec<[f64; 2]> {
    records
        .iter()
        .map(|record| [record.timestamp, record.noise_level])
        .collect()
}

// ── Statistics tables ─────────────────────────────────────────────────────────

/// One row of the motion statistics table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MotionStatsRow {
    /// Single-letter axis label.
    pub axis: String,
    /// Mean, formatted with the measurement unit.
    pub mean: String,
    /// Peak (maximum absolute value), formatted with the measurement unit.
    pub peak: String,
}

/// One labelled line of the noise statistics card.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NoiseStatsLine {
    /// Statistic name shown to the user.
    pub label: String,
    /// Value formatted with the measurement unit.
    pub value: String,
}

/// Table rows for a motion statistics map, in channel order.
pub fn motion_stats_rows(stats: &MotionStats, unit: &str) -> Vec<MotionStatsRow> {
    stats
        .iter()
        .map(|(channel, channel_stats)| MotionStatsRow {
            axis: channel.axis_label().to_string(),
            mean: format_measurement(channel_stats.mean, MOTION_DECIMALS, unit),
            peak: format_measurement(channel_stats.peak, MOTION_DECIMALS, unit),
        })
        .collect()
}

/// The three labelled lines of the noise statistics card.
pub fn noise_stats_rows(stats: &NoiseStats, unit: &str) -> Vec<NoiseStatsLine> {
    vec![
        NoiseStatsLine {
            label: "Mean".to_string(),
            value: format_measurement(stats.mean, NOISE_DECIMALS, unit),
        },
        NoiseStatsLine {
            label: "Peak".to_string(),
            value: format_measurement(stats.peak, NOISE_DECIMALS, unit),
        },
        NoiseStatsLine {
            label: "Minimum".to_string(),
            value: format_measurement(stats.min, NOISE_DECIMALS, unit),
        },
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
