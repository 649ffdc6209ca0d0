//! Import pipeline for SensorViz.
//!
//! One call per user-initiated load: read the file into memory, parse it,
//! aggregate statistics, and hand back a single immutable result for the
//! rendering layer to consume. I/O failures and structural parse failures
//! surface as distinct error classes; a payload that parses to zero usable
//! rows is still a success.

use std::path::Path;

use chrono::Utc;
use sensorviz_core::error::{Result, SensorVizError};
use sensorviz_core::models::{
    MotionRecord, MotionStats, NoiseRecord, NoiseStats, ACCELEROMETER, GYROSCOPE,
};
use tracing::{info, warn};

use crate::aggregator::{MotionAggregator, NoiseAggregator};
use crate::reader;

// ── Public types ──────────────────────────────────────────────────────────────

/// Details recorded alongside every successful import.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImportMetadata {
    /// Display name of the imported source, typically the file name.
    pub source: String,
    /// Number of records that survived row filtering.
    pub records_imported: usize,
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
}

impl ImportMetadata {
    /// Confirmation line for the host's success notification.
    pub fn summary(&self) -> String {
        format!(
            "{} has been processed: {} record(s) imported",
            self.source, self.records_imported
        )
    }
}

/// The complete output of a motion import.
///
/// Owned by the caller and replaced wholesale on the next successful import;
/// nothing here is shared or mutated in place.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MotionAnalysis {
    /// Surviving records, in file order.
    pub records: Vec<MotionRecord>,
    /// Per-axis statistics over `ax`, `ay`, `az`.
    pub accelerometer: MotionStats,
    /// Per-axis statistics over `gx`, `gy`, `gz`.
    pub gyroscope: MotionStats,
    /// Metadata about this import.
    pub metadata: ImportMetadata,
}

/// The complete output of a noise import.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NoiseAnalysis {
    /// Surviving records, in file order.
    pub records: Vec<NoiseRecord>,
    /// Statistics over the noise channel.
    pub stats: NoiseStats,
    /// Metadata about this import.
    pub metadata: ImportMetadata,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a motion payload and aggregate both axis groups.
///
/// `source` is the display name carried into the metadata and the success
/// confirmation, typically the name of the file the payload came from.
pub fn analyze_motion(source: &str, text: &str) -> Result<MotionAnalysis> {
    let records = reader::parse_motion(text)?;
    let accelerometer = MotionAggregator::aggregate(&records, &ACCELEROMETER);
    let gyroscope = MotionAggregator::aggregate(&records, &GYROSCOPE);
    let metadata = build_metadata(source, records.len());

    info!(
        "Imported {} motion record(s) from {}",
        records.len(),
        source
    );

    Ok(MotionAnalysis {
        records,
        accelerometer,
        gyroscope,
        metadata,
    })
}

/// Parse a noise payload and aggregate its single channel.
pub fn analyze_noise(source: &str, text: &str) -> Result<NoiseAnalysis> {
    let records = reader::parse_noise(text)?;
    let stats = NoiseAggregator::aggregate(&records);
    let metadata = build_metadata(source, records.len());

    info!("Imported {} noise record(s) from {}", records.len(), source);

    Ok(NoiseAnalysis {
        records,
        stats,
        metadata,
    })
}

/// Read a motion file from disk and run [`analyze_motion`] on its contents.
///
/// Reading is the single suspension point of an import; the file is loaded
/// to completion before parsing starts.
pub fn import_motion_file(path: &Path) -> Result<MotionAnalysis> {
    let text = read_source(path)?;
    analyze_motion(&display_name(path), &text)
}

/// Read a noise file from disk and run [`analyze_noise`] on its contents.
pub fn import_noise_file(path: &Path) -> Result<NoiseAnalysis> {
    let text = read_source(path)?;
    analyze_noise(&display_name(path), &text)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read the whole file into memory, mapping I/O problems to
/// [`SensorVizError::FileRead`] so the host can report them separately from
/// parse failures.
fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        warn!("Failed to read file {}: {}", path.display(), source);
        SensorVizError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// File name component used as the import's display name.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn build_metadata(source: &str, records_imported: usize) -> ImportMetadata {
    ImportMetadata {
        source: source.to_string(),
        records_imported,
        generated_at: Utc::now().to_rfc3339(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
