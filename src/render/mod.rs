//! Boundary serializers for a built graph template.

pub mod json;
pub mod rrd;

use crate::Result;
use crate::graph::GraphTemplate;

pub use json::render_json_report;
pub use rrd::{render_definition, render_instruction, render_options};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Options on the first line, definition on the second.
    #[default]
    Rrd,
    Json,
}

pub fn render(template: &GraphTemplate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Rrd => Ok(format!(
            "{}\n{}\n",
            render_options(&template.options),
            render_definition(&template.definition)?
        )),
        OutputFormat::Json => {
            let mut out = render_json_report(template)?;
            out.push('\n');
            Ok(out)
        }
    }
}
