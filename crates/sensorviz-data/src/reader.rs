//! Delimited-text parsing for SensorViz.
//!
//! Turns a raw comma-separated payload into an ordered sequence of typed
//! records. Structural problems (too few lines, missing header columns) fail
//! the whole parse; bad cells inside a data row are recovered per pipeline
//! policy and never fail the import.

use std::collections::BTreeMap;

use sensorviz_core::error::ParseError;
use sensorviz_core::models::{Channel, FieldValue, MotionRecord, NoiseRecord};
use tracing::{debug, warn};

/// Column names every motion file must carry, in any header order.
pub const MOTION_COLUMNS: [&str; 7] = ["timestamp", "ax", "ay", "az", "gx", "gy", "gz"];

/// Column names every noise file must carry, in any header order.
pub const NOISE_COLUMNS: [&str; 2] = ["timestamp", "noise_level"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a motion payload into [`MotionRecord`]s, in file order.
///
/// The header must be a superset of [`MOTION_COLUMNS`]; extra columns are
/// parsed too and land in each record's `extra` map. Cells that fail numeric
/// parsing are kept as raw text, and a row is dropped only when its
/// `timestamp` cell is non-numeric or zero.
///
/// An empty record list after row filtering is still `Ok`; only the
/// structural checks return `Err`.
pub fn parse_motion(text: &str) -> Result<Vec<MotionRecord>, ParseError> {
    let lines = non_empty_lines(text);
    if lines.len() < 2 {
        warn!("Motion payload too short: {} non-empty line(s)", lines.len());
        return Err(ParseError::TooFewLines(lines.len()));
    }

    let headers = split_header(lines[0]);
    let missing: Vec<String> = MOTION_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        warn!(
            "Motion header missing required column(s): {}",
            missing.join(", ")
        );
        return Err(ParseError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in &lines[1..] {
        match build_motion_record(&headers, line) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    debug!(
        "Parsed {} motion record(s), dropped {} row(s) with unusable timestamps",
        records.len(),
        dropped
    );
    Ok(records)
}

/// Parse a noise payload into [`NoiseRecord`]s, in file order.
///
/// The required columns are located by name anywhere in the header. Unlike
/// the motion pipeline, a data row is dropped as soon as either required
/// cell fails to parse as a finite number.
pub fn parse_noise(text: &str) -> Result<Vec<NoiseRecord>, ParseError> {
    let lines = non_empty_lines(text);
    if lines.len() < 2 {
        warn!("Noise payload too short: {} non-empty line(s)", lines.len());
        return Err(ParseError::TooFewLines(lines.len()));
    }

    let headers = split_header(lines[0]);
    let timestamp_col = column_index(&headers, "timestamp");
    let level_col = column_index(&headers, "noise_level");

    let (Some(timestamp_col), Some(level_col)) = (timestamp_col, level_col) else {
        let missing: Vec<String> = NOISE_COLUMNS
            .iter()
            .zip([timestamp_col, level_col])
            .filter(|(_, index)| index.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        warn!(
            "Noise header missing required column(s): {}",
            missing.join(", ")
        );
        return Err(ParseError::MissingColumns(missing));
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in &lines[1..] {
        let cells: Vec<&str> = line.split(',').collect();
        let timestamp = cells.get(timestamp_col).copied().and_then(parse_numeric);
        let noise_level = cells.get(level_col).copied().and_then(parse_numeric);
        match (timestamp, noise_level) {
            (Some(timestamp), Some(noise_level)) => records.push(NoiseRecord {
                timestamp,
                noise_level,
            }),
            _ => dropped += 1,
        }
    }

    debug!(
        "Parsed {} noise record(s), dropped {} non-numeric row(s)",
        records.len(),
        dropped
    );
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Split the payload into lines, discarding lines empty after trimming.
fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Split the header row on commas, trimming each column name.
fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(|h| h.trim().to_string()).collect()
}

/// Position of `name` in the header row, matched by name rather than position.
fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Parse a cell as a finite floating-point number.
///
/// Surrounding whitespace is trimmed first; non-finite results ("NaN",
/// "inf") are rejected so they never reach sums or peak comparisons.
fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build one motion record from a data line, or `None` when the row must be
/// dropped because its timestamp cell is non-numeric or zero.
fn build_motion_record(headers: &[String], line: &str) -> Option<MotionRecord> {
    let cells: Vec<&str> = line.split(',').collect();

    // Every header column is parsed, required or not; a later duplicate
    // column name overwrites an earlier one.
    let mut fields: BTreeMap<String, FieldValue> = BTreeMap::new();
    for (index, header) in headers.iter().enumerate() {
        let raw = cells.get(index).copied().unwrap_or("");
        let value = match parse_numeric(raw) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(raw.to_string()),
        };
        fields.insert(header.clone(), value);
    }

    let timestamp = match fields.remove("timestamp") {
        Some(FieldValue::Number(ts)) if ts != 0.0 => ts,
        _ => return None,
    };

    let mut take = |channel: Channel| {
        fields
            .remove(channel.as_str())
            .unwrap_or_else(|| FieldValue::Text(String::new()))
    };
    let ax = take(Channel::Ax);
    let ay = take(Channel::Ay);
    let az = take(Channel::Az);
    let gx = take(Channel::Gx);
    let gy = take(Channel::Gy);
    let gz = take(Channel::Gz);

    // Whatever is left came from columns outside the required seven.
    Some(MotionRecord {
        timestamp,
        ax,
        ay,
        az,
        gx,
        gy,
        gz,
        extra: fields,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MOTION_HEADER: &str = "timestamp,ax,ay,az,gx,gy,gz";

    // ── parse_motion: structure ───────────────────────────────────────────────

    #[test]
    fn test_motion_header_only_is_structural_failure() {
        let err = parse_motion(MOTION_HEADER).unwrap_err();
        assert_eq!(err, ParseError::TooFewLines(1));
    }

    #[test]
    fn test_motion_empty_input_is_structural_failure() {
        let err = parse_motion("").unwrap_err();
        assert_eq!(err, ParseError::TooFewLines(0));
    }

    #[test]
    fn test_motion_blank_lines_do_not_count() {
        let text = format!("\n  \n{}\n\n", MOTION_HEADER);
        let err = parse_motion(&text).unwrap_err();
        assert_eq!(err, ParseError::TooFewLines(1));
    }

    #[test]
    fn test_motion_missing_columns_are_named() {
        let err = parse_motion("timestamp,ax,ay,az\n1,2,3,4").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns(vec![
                "gx".to_string(),
                "gy".to_string(),
                "gz".to_string()
            ])
        );
    }

    // ── parse_motion: rows ────────────────────────────────────────────────────

    #[test]
    fn test_motion_basic_parse() {
        let text = format!("{}\n1000,0.1,0.2,9.8,0.01,0.02,0.03", MOTION_HEADER);
        let records = parse_motion(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 1000.0);
        assert_eq!(records[0].channel_number(Channel::Az), Some(9.8));
        assert_eq!(records[0].channel_number(Channel::Gz), Some(0.03));
        assert!(records[0].extra.is_empty());
    }

    #[test]
    fn test_motion_header_order_is_irrelevant() {
        let text = "gz,gy,gx,az,ay,ax,timestamp\n0.3,0.2,0.1,9.8,2.0,1.0,500";
        let records = parse_motion(text).unwrap();
        assert_eq!(records[0].timestamp, 500.0);
        assert_eq!(records[0].channel_number(Channel::Ax), Some(1.0));
        assert_eq!(records[0].channel_number(Channel::Gz), Some(0.3));
    }

    #[test]
    fn test_motion_extra_columns_are_kept() {
        let text = format!(
            "{},battery\n1000,0.1,0.2,9.8,0.01,0.02,0.03,87",
            MOTION_HEADER
        );
        let records = parse_motion(&text).unwrap();
        assert_eq!(
            records[0].extra.get("battery"),
            Some(&FieldValue::Number(87.0))
        );
    }

    #[test]
    fn test_motion_non_numeric_field_is_kept_as_text() {
        // A bad channel cell keeps the row; only the timestamp is validated.
        let text = format!("{}\n1000,oops,0.2,9.8,0.01,0.02,0.03", MOTION_HEADER);
        let records = parse_motion(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].ax,
            FieldValue::Text("oops".to_string())
        );
        assert_eq!(records[0].channel_number(Channel::Ay), Some(0.2));
    }

    #[test]
    fn test_motion_bad_timestamp_drops_row() {
        let text = format!(
            "{}\nnope,1,2,3,4,5,6\n2000,1,2,3,4,5,6",
            MOTION_HEADER
        );
        let records = parse_motion(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 2000.0);
    }

    #[test]
    fn test_motion_zero_timestamp_drops_row() {
        let text = format!("{}\n0,1,2,3,4,5,6\n1,1,2,3,4,5,6", MOTION_HEADER);
        let records = parse_motion(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 1.0);
    }

    #[test]
    fn test_motion_short_row_pads_with_empty_text() {
        let text = format!("{}\n1000,0.1,0.2", MOTION_HEADER);
        let records = parse_motion(&text).unwrap();
        assert_eq!(records[0].channel_number(Channel::Ay), Some(0.2));
        assert_eq!(records[0].az, FieldValue::Text(String::new()));
        assert_eq!(records[0].gz, FieldValue::Text(String::new()));
    }

    #[test]
    fn test_motion_all_bad_timestamps_is_valid_and_empty() {
        let text = format!("{}\nx,1,2,3,4,5,6\ny,1,2,3,4,5,6", MOTION_HEADER);
        let records = parse_motion(&text).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_motion_parse_is_pure() {
        let text = format!("{}\n1000,1,2,3,4,5,6\n2000,6,5,4,3,2,1", MOTION_HEADER);
        assert_eq!(parse_motion(&text).unwrap(), parse_motion(&text).unwrap());
    }

    // ── parse_noise: structure ────────────────────────────────────────────────

    #[test]
    fn test_noise_header_only_is_structural_failure() {
        let err = parse_noise("timestamp,noise_level").unwrap_err();
        assert_eq!(err, ParseError::TooFewLines(1));
    }

    #[test]
    fn test_noise_missing_level_column_fails() {
        let err = parse_noise("timestamp,volume\n1,10").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns(vec!["noise_level".to_string()])
        );
    }

    #[test]
    fn test_noise_missing_both_columns_fails() {
        let err = parse_noise("a,b\n1,2").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns(vec![
                "timestamp".to_string(),
                "noise_level".to_string()
            ])
        );
    }

    // ── parse_noise: rows ─────────────────────────────────────────────────────

    #[test]
    fn test_noise_basic_parse() {
        let records = parse_noise("timestamp,noise_level\n1000,42.5\n1001,43.1").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, 1000.0);
        assert_eq!(records[0].noise_level, 42.5);
    }

    #[test]
    fn test_noise_columns_resolved_by_name() {
        // Required columns located anywhere; extras ignored.
        let records = parse_noise("site,noise_level,timestamp\nlab,55.5,1000").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noise_level, 55.5);
        assert_eq!(records[0].timestamp, 1000.0);
    }

    #[test]
    fn test_noise_bad_row_dropped_silently() {
        let records =
            parse_noise("timestamp,noise_level\n1000,42.5\n1001,loud\nbad,43.0\n1002,44.0")
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].noise_level, 44.0);
    }

    #[test]
    fn test_noise_all_rows_invalid_is_valid_and_empty() {
        let records = parse_noise("timestamp,noise_level\nx,y\nz,w").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_noise_zero_timestamp_is_kept() {
        // Only the motion pipeline rejects zero timestamps.
        let records = parse_noise("timestamp,noise_level\n0,10.0").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, 0.0);
    }

    #[test]
    fn test_noise_nan_cell_drops_row() {
        let records = parse_noise("timestamp,noise_level\n1000,NaN\n1001,5.0").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noise_level, 5.0);
    }

    #[test]
    fn test_noise_whitespace_around_cells_is_tolerated() {
        let records = parse_noise("timestamp , noise_level\n 1000 , 42.5 ").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].noise_level, 42.5);
    }

    #[test]
    fn test_noise_records_keep_file_order() {
        let records = parse_noise("timestamp,noise_level\n3,30\n1,10\n2,20").unwrap();
        let times: Vec<f64> = records.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![3.0, 1.0, 2.0]);
    }
}
