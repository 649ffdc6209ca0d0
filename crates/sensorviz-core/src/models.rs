use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── FieldValue ────────────────────────────────────────────────────────────────

/// A single parsed cell from a data row.
///
/// Cells that parse as finite floating-point numbers become
/// [`FieldValue::Number`]; anything else keeps the raw text it came from, so
/// a record can carry a mix of numeric and unparsed fields. Serialises
/// untagged: a record renders as plain numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A finite numeric value.
    Number(f64),
    /// The raw cell contents when numeric parsing failed.
    Text(String),
}

impl FieldValue {
    /// The numeric value, when this cell parsed as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Whether this cell parsed as a number.
    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

// ── Channel ───────────────────────────────────────────────────────────────────

/// One of the six motion channels: three linear-acceleration axes and three
/// angular-rate axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Linear acceleration, X axis.
    Ax,
    /// Linear acceleration, Y axis.
    Ay,
    /// Linear acceleration, Z axis.
    Az,
    /// Angular rate, X axis.
    Gx,
    /// Angular rate, Y axis.
    Gy,
    /// Angular rate, Z axis.
    Gz,
}

/// The accelerometer channel subset, in display order.
pub const ACCELEROMETER: [Channel; 3] = [Channel::Ax, Channel::Ay, Channel::Az];

/// The gyroscope channel subset, in display order.
pub const GYROSCOPE: [Channel; 3] = [Channel::Gx, Channel::Gy, Channel::Gz];

impl Channel {
    /// The CSV column name for this channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Ax => "ax",
            Channel::Ay => "ay",
            Channel::Az => "az",
            Channel::Gx => "gx",
            Channel::Gy => "gy",
            Channel::Gz => "gz",
        }
    }

    /// Single-letter axis label used in the statistics table.
    pub fn axis_label(self) -> &'static str {
        match self {
            Channel::Ax | Channel::Gx => "X",
            Channel::Ay | Channel::Gy => "Y",
            Channel::Az | Channel::Gz => "Z",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One timestamped row of motion data.
///
/// The six channel cells keep whatever the raw parse produced: a finite
/// number, or the original text when numeric parsing failed. Columns beyond
/// the required seven are carried in `extra`, keyed by header name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    /// Millisecond timestamp, as read from the file. Never zero; rows with a
    /// zero or non-numeric timestamp are dropped during parsing.
    pub timestamp: f64,
    /// Linear acceleration, X axis.
    pub ax: FieldValue,
    /// Linear acceleration, Y axis.
    pub ay: FieldValue,
    /// Linear acceleration, Z axis.
    pub az: FieldValue,
    /// Angular rate, X axis.
    pub gx: FieldValue,
    /// Angular rate, Y axis.
    pub gy: FieldValue,
    /// Angular rate, Z axis.
    pub gz: FieldValue,
    /// Cells from header columns outside the required seven.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, FieldValue>,
}

impl MotionRecord {
    /// The cell for `channel`.
    pub fn channel(&self, channel: Channel) -> &FieldValue {
        match channel {
            Channel::Ax => &self.ax,
            Channel::Ay => &self.ay,
            Channel::Az => &self.az,
            Channel::Gx => &self.gx,
            Channel::Gy => &self.gy,
            Channel::Gz => &self.gz,
        }
    }

    /// The channel's numeric value, when its cell parsed as a number.
    pub fn channel_number(&self, channel: Channel) -> Option<f64> {
        self.channel(channel).as_number()
    }
}

/// One timestamped noise reading.
///
/// Both fields are guaranteed finite by the parser; rows where either cell
/// failed numeric parsing are dropped before a record is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseRecord {
    /// Millisecond timestamp, as read from the file.
    pub timestamp: f64,
    /// Noise level reading, typically in dB.
    pub noise_level: f64,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Summary statistics for a single motion channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Sum of numeric values divided by the total record count.
    pub mean: f64,
    /// Maximum absolute value observed; never negative.
    pub peak: f64,
}

/// Per-channel statistics for a requested channel subset, in channel order.
pub type MotionStats = BTreeMap<Channel, ChannelStats>;

/// Summary statistics over a noise record sequence.
///
/// Unlike motion statistics, `peak` and `min` are signed extremes: a file of
/// all-negative readings has a negative peak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseStats {
    /// Sum of finite values divided by the total record count.
    pub mean: f64,
    /// Maximum signed value observed.
    pub peak: f64,
    /// Minimum signed value observed.
    pub min: f64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
