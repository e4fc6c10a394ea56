//! Graph templates for per-core CPU usage.
//!
//! Layers:
//! - `input`: collector output (JSON request, Nagios perfdata) into a `DatasourceSet`
//! - `graph`: the builder producing typed drawing instructions
//! - `render`: rrd graph text and JSON at the boundary

pub mod graph;
pub mod input;
pub mod render;

pub type Result<T> = anyhow::Result<T>;
