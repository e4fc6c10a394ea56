//! JSON request document.
//!
//! JSON shape:
//! {
//!   "hostname": "web01",
//!   "datasources": [
//!     { "rrd_file": "/var/lib/pnp4nagios/web01/cpu.rrd", "ds": "1", "unit": "%",
//!       "warn": 90, "crit": "95" },   // aggregate
//!     { "rrd_file": "/var/lib/pnp4nagios/web01/cpu.rrd", "ds": "2", "unit": "%" },
//!     ...
//!   ]
//! }
//!
//! Thresholds may be numbers, Nagios threshold strings, empty strings or absent.

use crate::Result;
use crate::graph::{Datasource, DatasourceSet};
use crate::input::perfdata::parse_threshold;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub hostname: String,

    #[serde(default)]
    pub datasources: Vec<RawDatasource>,
}

/// Raw datasource shape as it appears in the request.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDatasource {
    #[serde(default)]
    pub rrd_file: String,

    #[serde(default)]
    pub ds: String,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub warn: Option<ThresholdSpec>,

    #[serde(default)]
    pub crit: Option<ThresholdSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    Number(f64),
    // Nagios style: "90", "@10:90", "" (unset)
    Text(String),
}

impl ThresholdSpec {
    fn resolve(&self) -> Result<Option<f64>> {
        match self {
            ThresholdSpec::Number(v) => Ok(Some(*v)),
            ThresholdSpec::Text(s) => parse_threshold(s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub hostname: String,
    pub datasources: DatasourceSet,
}

impl GraphRequest {
    pub fn validate_and_build(&self) -> Result<ValidatedRequest> {
        let hostname = self.hostname.trim();
        if hostname.is_empty() {
            bail!("request is missing a hostname");
        }
        if self.datasources.is_empty() {
            bail!("request contained no datasources (the aggregate entry is required)");
        }

        let mut entries = Vec::with_capacity(self.datasources.len());
        for (idx, raw) in self.datasources.iter().enumerate() {
            if raw.rrd_file.trim().is_empty() {
                bail!("datasource {} has an empty rrd_file", idx);
            }
            if raw.ds.trim().is_empty() {
                bail!("datasource {} has an empty ds name", idx);
            }

            let warn = resolve(raw.warn.as_ref())
                .with_context(|| format!("datasource {}: bad warn threshold", idx))?;
            let crit = resolve(raw.crit.as_ref())
                .with_context(|| format!("datasource {}: bad crit threshold", idx))?;

            entries.push(
                Datasource::new(raw.rrd_file.trim(), raw.ds.trim(), raw.unit.as_str())
                    .with_thresholds(warn, crit),
            );
        }

        Ok(ValidatedRequest {
            hostname: hostname.to_string(),
            datasources: DatasourceSet::new(entries),
        })
    }
}

fn resolve(spec: Option<&ThresholdSpec>) -> Result<Option<f64>> {
    match spec {
        Some(s) => s.resolve(),
        None => Ok(None),
    }
}

/// Read and validate a request document from disk.
pub fn read_request_file(path: &str) -> Result<ValidatedRequest> {
    let text = fs::read_to_string(path).with_context(|| format!("read request file {}", path))?;
    let request: GraphRequest =
        serde_json::from_str(&text).with_context(|| format!("parse request file {}", path))?;
    request
        .validate_and_build()
        .with_context(|| format!("invalid request file {}", path))
}
