//! Data ingestion layer for SensorViz.
//!
//! Responsible for parsing delimited sensor and noise payloads into typed
//! records, aggregating per-channel statistics, running the import pipeline,
//! and preparing chart- and table-ready views for the rendering layer.

pub mod aggregator;
pub mod import;
pub mod reader;
pub mod series;

pub use sensorviz_core as core;
