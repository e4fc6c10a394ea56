//! Datasource model.
//!
//! A `DatasourceSet` is 0-based: index 0 is the aggregate (whole machine)
//! CPU datasource and index k (k >= 1) is core k, in display order.

use serde::Serialize;

/// One time-series input as handed over by the collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datasource {
    pub rrd_file: String,
    pub ds: String,
    pub unit: String,
    pub warn: Option<f64>,
    pub crit: Option<f64>,
}

impl Datasource {
    pub fn new(rrd_file: impl Into<String>, ds: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            rrd_file: rrd_file.into(),
            ds: ds.into(),
            unit: unit.into(),
            warn: None,
            crit: None,
        }
    }

    pub fn with_thresholds(mut self, warn: Option<f64>, crit: Option<f64>) -> Self {
        self.warn = warn;
        self.crit = crit;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DatasourceSet(Vec<Datasource>);

impl DatasourceSet {
    pub fn new(entries: Vec<Datasource>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The whole-machine entry, if any.
    pub fn aggregate(&self) -> Option<&Datasource> {
        self.0.first()
    }

    /// Per-core entries; `cores()[0]` is core 1.
    pub fn cores(&self) -> &[Datasource] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn core_count(&self) -> usize {
        self.cores().len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Datasource> {
        self.0.iter()
    }
}

impl FromIterator<Datasource> for DatasourceSet {
    fn from_iter<I: IntoIterator<Item = Datasource>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
