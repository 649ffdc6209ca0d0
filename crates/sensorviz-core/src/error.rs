use std::path::PathBuf;
use thiserror::Error;

/// Structural parse failures: the file shape is wrong before any row-level
/// recovery can apply.
///
/// These are the only conditions under which a parse fails outright; bad
/// cells inside individual data rows are recovered per pipeline policy and
/// never produce an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than two non-empty lines: no header row, or a header with no
    /// data rows.
    #[error("file is too short: {0} non-empty line(s), need a header row and at least one data row")]
    TooFewLines(usize),

    /// One or more required columns are absent from the header row.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// All errors produced by SensorViz.
#[derive(Error, Debug)]
pub enum SensorVizError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its structure could not be parsed.
    #[error("Could not parse file: {0}")]
    Parse(#[from] ParseError),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the SensorViz crates.
pub type Result<T> = std::result::Result<T, SensorVizError>;
