//! Statistics aggregation over imported record sequences.

use sensorviz_core::models::{
    Channel, ChannelStats, MotionRecord, MotionStats, NoiseRecord, NoiseStats,
};

// ── MotionAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that reduces motion records to per-channel statistics.
pub struct MotionAggregator;

impl MotionAggregator {
    /// Aggregate `records` over the requested `channels`.
    ///
    /// For each channel, only cells that hold a finite number contribute to
    /// the sum and the peak comparison, but the mean's divisor is ALWAYS the
    /// total record count, not the count of numeric cells. `peak` starts at
    /// zero and tracks the maximum absolute value, so an all-negative channel
    /// still reports a positive peak.
    ///
    /// An empty record slice yields `{mean: 0, peak: 0}` for every requested
    /// channel rather than failing.
    pub fn aggregate(records: &[MotionRecord], channels: &[Channel]) -> MotionStats {
        if records.is_empty() {
            return channels
                .iter()
                .map(|&channel| (channel, ChannelStats::default()))
                .collect();
        }

        let count = records.len() as f64;
        channels
            .iter()
            .map(|&channel| {
                let mut sum = 0.0;
                let mut peak = 0.0f64;
                for record in records {
                    let Some(value) = record.channel_number(channel) else {
                        continue;
                    };
                    if !value.is_finite() {
                        continue;
                    }
                    sum += value;
                    if value.abs() > peak {
                        peak = value.abs();
                    }
                }
                (
                    channel,
                    ChannelStats {
                        mean: sum / count,
                        peak,
                    },
                )
            })
            .collect()
    }
}

// ── NoiseAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that reduces noise records to a single statistics triple.
pub struct NoiseAggregator;

impl NoiseAggregator {
    /// Aggregate `records` into `{mean, peak, min}`.
    ///
    /// `peak` and `min` are signed extremes (initial comparands are the
    /// infinities), unlike the motion pipeline's absolute-value peak. The
    /// mean's divisor is the total record count. Empty input yields the
    /// all-zero [`NoiseStats`].
    pub fn aggregate(records: &[NoiseRecord]) -> NoiseStats {
        if records.is_empty() {
            return NoiseStats::default();
        }

        let mut sum = 0.0;
        let mut peak = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;

        for record in records {
            let value = record.noise_level;
            if !value.is_finite() {
                continue;
            }
            sum += value;
            if value > peak {
                peak = value;
            }
            if value < min {
                min = value;
            }
        }

        NoiseStats {
            mean: sum / records.len() as f64,
            peak,
            min,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
