//! Typed drawing instructions.
//!
//! Nothing here knows the renderer's text syntax; see `render::rrd`.

use crate::graph::Color;
use serde::{Serialize, Serializer};
use std::fmt;

/// Consolidation function applied when reading or summarising a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cf {
    Average,
    Min,
    #[default]
    Max,
    Last,
}

impl Cf {
    pub fn as_str(self) -> &'static str {
        match self {
            Cf::Average => "AVERAGE",
            Cf::Min => "MIN",
            Cf::Max => "MAX",
            Cf::Last => "LAST",
        }
    }

    /// Legend caption, e.g. `Average`.
    pub fn caption(self) -> &'static str {
        match self {
            Cf::Average => "Average",
            Cf::Min => "Min",
            Cf::Max => "Max",
            Cf::Last => "Last",
        }
    }
}

/// Statistics printed under every line.
pub const SUMMARY_STATS: [Cf; 3] = [Cf::Last, Cf::Average, Cf::Max];

/// Variable bound to the datasource at 0-based `position`; displays as `var{position + 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub usize);

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var{}", self.0 + 1)
    }
}

impl Serialize for Var {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineWidth {
    Thin,
    Thick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Warning,
    Critical,
}

impl ThresholdKind {
    pub fn color(self) -> Color {
        match self {
            ThresholdKind::Warning => Color::YELLOW,
            ThresholdKind::Critical => Color::RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    Define {
        var: Var,
        rrd_file: String,
        ds: String,
        cf: Cf,
    },
    Line {
        var: Var,
        width: LineWidth,
        color: Color,
        label: String,
    },
    PrintStat {
        var: Var,
        stats: Vec<Cf>,
        precision: u8,
        unit: String,
        /// Close the legend row after the last statistic.
        end_row: bool,
    },
    ThresholdRule {
        kind: ThresholdKind,
        value: f64,
        color: Color,
    },
}

/// Ordered instruction list; only ever appended to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GraphDefinition(Vec<Instruction>);

impl GraphDefinition {
    pub fn push(&mut self, instr: Instruction) {
        self.0.push(instr);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }
}
