//! Nagios performance data, as emitted by the multi-core CPU check.
//!
//! Expected shape (whitespace-separated tokens):
//! label=value[UOM];warn;crit;min;max
//!
//! Example:
//! cpu=12.5%;90;95;0;100 cpu0=10%;;;0;100 'cpu 1'=15%;;;0;100
//!
//! The first token is the aggregate; the rest are cores in display order.

use crate::Result;
use crate::graph::{Datasource, DatasourceSet};
use anyhow::{Context, bail};
use regex::Regex;

/// One parsed performance-data token.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfLabel {
    pub label: String,
    /// `None` when the plugin reported `U` (unknown).
    pub value: Option<f64>,
    pub unit: String,
    pub warn: Option<f64>,
    pub crit: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Parse a full performance-data string into labels, in order.
pub fn parse_perfdata(text: &str) -> Result<Vec<PerfLabel>> {
    // 1) label, either 'quoted with spaces' (inner quote doubled as '') or bare
    // 2) everything after '=' up to the next whitespace
    const TOKEN_RE: &str = r#"(?:'((?:[^']|'')*)'|([^\s'=]+))=(\S*)"#;
    const VALUE_RE: &str = r#"^([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?|U)([^\d;]*)$"#;
    let token_re = Regex::new(TOKEN_RE)?;
    let value_re = Regex::new(VALUE_RE)?;

    let mut out = Vec::new();
    let mut last_end = 0;
    for caps in token_re.captures_iter(text) {
        let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
        let between = &text[last_end..whole.0];
        if !between.trim().is_empty() {
            bail!("perfdata parse error: unexpected text {:?}", between.trim());
        }
        last_end = whole.1;

        let label = match (caps.get(1), caps.get(2)) {
            (Some(quoted), _) => quoted.as_str().replace("''", "'"),
            (None, Some(bare)) => bare.as_str().to_string(),
            (None, None) => String::new(),
        };
        if label.trim().is_empty() {
            bail!("perfdata parse error: empty label in {:?}", &text[whole.0..whole.1]);
        }
        let rest = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

        let mut fields = rest.split(';');
        let value_field = fields.next().unwrap_or_default();
        let value_caps = value_re.captures(value_field).with_context(|| {
            format!("perfdata parse error: bad value {:?} for label {}", value_field, label)
        })?;
        let value = match value_caps.get(1).map(|m| m.as_str()) {
            Some("U") | None => None,
            Some(v) => Some(
                v.parse::<f64>()
                    .with_context(|| format!("bad value {:?} for label {}", v, label))?,
            ),
        };
        let unit = value_caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let warn = parse_threshold(fields.next().unwrap_or_default())
            .with_context(|| format!("bad warn threshold for label {}", label))?;
        let crit = parse_threshold(fields.next().unwrap_or_default())
            .with_context(|| format!("bad crit threshold for label {}", label))?;
        let min = parse_bound(fields.next().unwrap_or_default())
            .with_context(|| format!("bad min for label {}", label))?;
        let max = parse_bound(fields.next().unwrap_or_default())
            .with_context(|| format!("bad max for label {}", label))?;

        out.push(PerfLabel {
            label,
            value,
            unit,
            warn,
            crit,
            min,
            max,
        });
    }

    let trailing = &text[last_end..];
    if !trailing.trim().is_empty() {
        bail!("perfdata parse error: unexpected text {:?}", trailing.trim());
    }
    if out.is_empty() {
        bail!("perfdata contained no labels");
    }

    Ok(out)
}

/// Reduce a Nagios threshold to the single value a horizontal rule is drawn at.
///
/// "" => None, "90" => 90, "@10:90" => 90, "10:" => None, "~:90" => 90.
pub fn parse_threshold(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    let s = s.strip_prefix('@').unwrap_or(s);
    let end = match s.split_once(':') {
        Some((_, end)) => end.trim(),
        None => s,
    };
    if end.is_empty() || end == "~" {
        return Ok(None);
    }
    let v = end
        .parse::<f64>()
        .with_context(|| format!("threshold {:?} is not a number or range", s))?;
    if !v.is_finite() {
        bail!("threshold {:?} is not a finite number", s);
    }
    Ok(Some(v))
}

fn parse_bound(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let v = s.parse::<f64>()?;
    if !v.is_finite() {
        bail!("bound {:?} is not a finite number", s);
    }
    Ok(Some(v))
}

/// How PNP4Nagios laid out the rrd files for this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RrdStorage {
    /// One rrd per service; DS names are 1-based positions.
    #[default]
    Single,
    /// One rrd per label; every file holds DS `1`.
    Multiple,
}

#[derive(Debug, Clone)]
pub struct RrdLayout {
    pub rrd_dir: String,
    pub hostname: String,
    pub service: String,
    pub storage: RrdStorage,
}

impl RrdLayout {
    /// Map parsed labels onto rrd datasources.
    pub fn datasources(&self, labels: &[PerfLabel]) -> DatasourceSet {
        let dir = self.rrd_dir.trim_end_matches('/');
        let host = sanitize(&self.hostname);
        let service = sanitize(&self.service);

        labels
            .iter()
            .enumerate()
            .map(|(idx, perf)| {
                let (file, ds) = match self.storage {
                    RrdStorage::Single => {
                        (format!("{}/{}/{}.rrd", dir, host, service), (idx + 1).to_string())
                    }
                    RrdStorage::Multiple => (
                        format!("{}/{}/{}_{}.rrd", dir, host, service, sanitize(&perf.label)),
                        "1".to_string(),
                    ),
                };
                Datasource::new(file, ds, perf.unit.as_str()).with_thresholds(perf.warn, perf.crit)
            })
            .collect()
    }
}

/// Replace characters PNP4Nagios does not keep in file names.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_labels_in_order() {
        let labels =
            parse_perfdata("cpu=12.5%;90;95;0;100 cpu0=10%;;;0;100 'cpu 1'=15%;;;0;100").unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(
            labels[0],
            PerfLabel {
                label: "cpu".to_string(),
                value: Some(12.5),
                unit: "%".to_string(),
                warn: Some(90.0),
                crit: Some(95.0),
                min: Some(0.0),
                max: Some(100.0),
            }
        );
        assert_eq!(labels[1].label, "cpu0");
        assert_eq!(labels[1].warn, None);
        assert_eq!(labels[2].label, "cpu 1");
    }

    #[test]
    fn accepts_short_tokens_and_unknown_values() {
        let labels = parse_perfdata("total=3 core1=U").unwrap();
        assert_eq!(labels[0].value, Some(3.0));
        assert_eq!(labels[0].unit, "");
        assert_eq!(labels[0].crit, None);
        assert_eq!(labels[1].value, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_perfdata("").is_err());
        assert!(parse_perfdata("cpu=abc").is_err());
        assert!(parse_perfdata("cpu=1 junk").is_err());
    }

    #[test]
    fn threshold_forms() {
        assert_eq!(parse_threshold("").unwrap(), None);
        assert_eq!(parse_threshold("90").unwrap(), Some(90.0));
        assert_eq!(parse_threshold("@10:92.5").unwrap(), Some(92.5));
        assert_eq!(parse_threshold("~:80").unwrap(), Some(80.0));
        assert_eq!(parse_threshold("10:").unwrap(), None);
        assert!(parse_threshold("high").is_err());
    }

    #[test]
    fn non_finite_thresholds_are_rejected() {
        for bad in ["nan", "inf", "-inf", "infinity", "@10:NaN"] {
            let err = parse_threshold(bad).unwrap_err();
            assert!(err.to_string().contains("not a finite number"), "{}: {}", bad, err);
        }

        let err = parse_perfdata("cpu=5%;nan;inf").unwrap_err();
        assert_eq!(err.to_string(), "bad warn threshold for label cpu");
        assert!(parse_perfdata("cpu=5%;90;95;0;inf").is_err());
    }

    #[test]
    fn quoted_labels_unescape_doubled_quotes() {
        let labels = parse_perfdata("cpu=1% 'core ''0'''=2%;;;0;100 'it''s'=3%").unwrap();
        let names: Vec<&str> = labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(names, vec!["cpu", "core '0'", "it's"]);
        assert_eq!(labels[1].value, Some(2.0));
        assert_eq!(labels[1].max, Some(100.0));
    }

    #[test]
    fn single_storage_uses_positions_as_ds_names() {
        let labels = parse_perfdata("cpu=1%;90;95 cpu0=2% cpu1=3%").unwrap();
        let layout = RrdLayout {
            rrd_dir: "/var/lib/pnp4nagios/perfdata/".to_string(),
            hostname: "web01".to_string(),
            service: "check_cpu_multicore".to_string(),
            storage: RrdStorage::Single,
        };
        let set = layout.datasources(&labels);

        let pairs: Vec<(String, String)> =
            set.iter().map(|d| (d.rrd_file.clone(), d.ds.clone())).collect();
        let file = "/var/lib/pnp4nagios/perfdata/web01/check_cpu_multicore.rrd".to_string();
        assert_eq!(
            pairs,
            vec![
                (file.clone(), "1".to_string()),
                (file.clone(), "2".to_string()),
                (file, "3".to_string()),
            ]
        );
        assert_eq!(set.aggregate().unwrap().warn, Some(90.0));
    }

    #[test]
    fn multiple_storage_uses_one_file_per_label() {
        let labels = parse_perfdata("cpu=1% 'cpu 0'=2%").unwrap();
        let layout = RrdLayout {
            rrd_dir: "/pnp".to_string(),
            hostname: "web01".to_string(),
            service: "check_cpu_multicore".to_string(),
            storage: RrdStorage::Multiple,
        };
        let set = layout.datasources(&labels);
        assert_eq!(set.cores()[0].rrd_file, "/pnp/web01/check_cpu_multicore_cpu_0.rrd");
        assert_eq!(set.cores()[0].ds, "1");
    }
}
