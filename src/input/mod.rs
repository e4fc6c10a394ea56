//! Input adapters: everything that turns collector output into a `DatasourceSet`.
//!
//! - JSON request documents (explicit rrd file/ds per entry)
//! - Nagios performance data plus PNP4Nagios rrd storage layout

pub mod json;
pub mod perfdata;

pub use json::{GraphRequest, ValidatedRequest, read_request_file};
pub use perfdata::{PerfLabel, RrdLayout, RrdStorage, parse_perfdata, parse_threshold};
