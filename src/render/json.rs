use crate::graph::{GraphDefinition, GraphOptions, GraphTemplate};
use crate::render::rrd;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    ds_name: &'a str,
    options: &'a GraphOptions,
    definition: &'a GraphDefinition,
    rrd: RrdText,
}

#[derive(Debug, Serialize)]
struct RrdText {
    options: String,
    definition: String,
}

/// Render the structured template plus its rrd text as pretty JSON.
pub fn render_json_report(template: &GraphTemplate) -> anyhow::Result<String> {
    let report = JsonReport {
        ds_name: &template.ds_name,
        options: &template.options,
        definition: &template.definition,
        rrd: RrdText {
            options: rrd::render_options(&template.options),
            definition: rrd::render_definition(&template.definition)?,
        },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
