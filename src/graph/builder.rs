//! Builds the multi-core CPU graph template.
//!
//! Instruction order is fixed and drives the visual layout:
//! 1) DEF for the aggregate, then one DEF per core
//! 2) per core: thin line + summary print
//! 3) thick black total line + summary print
//! 4) warning rule, then critical rule, when set on the aggregate

use crate::graph::instr::SUMMARY_STATS;
use crate::graph::{
    Cf, Color, DatasourceSet, GraphDefinition, GraphError, Instruction, LineWidth, PalettePolicy,
    ThresholdKind, Var,
};
use serde::Serialize;

pub const DS_NAME: &str = "Server CPU Usage";
pub const VERTICAL_LABEL: &str = "Percent";
pub const LOWER_BOUND: f64 = 0.0;
pub const UPPER_BOUND: f64 = 101.0;
pub const TOTAL_LABEL: &str = "CPU_TOTAL";
pub const STAT_PRECISION: u8 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Consolidation used by every DEF.
    pub consolidation: Cf,
    pub palette: PalettePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphOptions {
    pub vertical_label: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub title: String,
}

impl GraphOptions {
    pub fn for_host(hostname: &str) -> Self {
        Self {
            vertical_label: VERTICAL_LABEL.to_string(),
            lower_bound: LOWER_BOUND,
            upper_bound: UPPER_BOUND,
            title: format!("CPU Usage -- {}", hostname),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphTemplate {
    pub ds_name: String,
    pub options: GraphOptions,
    pub definition: GraphDefinition,
}

pub fn core_label(core: usize) -> String {
    format!("CPU_Core{}", core)
}

/// Build the graph template for one host.
///
/// Fails fast, before emitting anything, on an empty set or when the palette
/// policy cannot color every core.
pub fn build(
    datasources: &DatasourceSet,
    hostname: &str,
    config: &GraphConfig,
) -> Result<GraphTemplate, GraphError> {
    let aggregate = datasources
        .aggregate()
        .ok_or(GraphError::EmptyDatasourceSet)?;
    let cores = datasources.cores();

    let colors = (1..=cores.len())
        .map(|core| config.palette.color_for_core(core, cores.len()))
        .collect::<Result<Vec<Color>, GraphError>>()?;

    let mut def = GraphDefinition::default();

    for (position, ds) in datasources.iter().enumerate() {
        def.push(Instruction::Define {
            var: Var(position),
            rrd_file: ds.rrd_file.clone(),
            ds: ds.ds.clone(),
            cf: config.consolidation,
        });
    }

    for (idx, (ds, color)) in cores.iter().zip(&colors).enumerate() {
        let core = idx + 1;
        let var = Var(core);
        tracing::debug!(core, %var, %color, "assigned core line");

        if ds.warn.is_some() || ds.crit.is_some() {
            tracing::warn!(core, "thresholds on a per-core datasource are ignored");
        }

        def.push(Instruction::Line {
            var,
            width: LineWidth::Thin,
            color: *color,
            label: core_label(core),
        });
        def.push(summary(var, &ds.unit));
    }

    def.push(Instruction::Line {
        var: Var(0),
        width: LineWidth::Thick,
        color: Color::BLACK,
        label: TOTAL_LABEL.to_string(),
    });
    def.push(summary(Var(0), &aggregate.unit));

    for (kind, value) in [
        (ThresholdKind::Warning, aggregate.warn),
        (ThresholdKind::Critical, aggregate.crit),
    ] {
        if let Some(value) = value {
            def.push(Instruction::ThresholdRule {
                kind,
                value,
                color: kind.color(),
            });
        }
    }

    tracing::info!(
        hostname,
        cores = cores.len(),
        instructions = def.len(),
        "built cpu graph template"
    );

    Ok(GraphTemplate {
        ds_name: DS_NAME.to_string(),
        options: GraphOptions::for_host(hostname),
        definition: def,
    })
}

fn summary(var: Var, unit: &str) -> Instruction {
    Instruction::PrintStat {
        var,
        stats: SUMMARY_STATS.to_vec(),
        precision: STAT_PRECISION,
        unit: unit.to_string(),
        end_row: true,
    }
}
