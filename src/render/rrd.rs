use crate::graph::{GraphDefinition, GraphOptions, Instruction, LineWidth};
use std::fmt::{self, Write};

/// Render graph options as command-line style flags.
///
/// Example:
/// --vertical-label Percent -l0 --upper=101 --title "CPU Usage -- web01"
pub fn render_options(opts: &GraphOptions) -> String {
    format!(
        "--vertical-label {} -l{} --upper={} --title \"{}\" ",
        opts.vertical_label,
        opts.lower_bound,
        opts.upper_bound,
        escape_quotes(&opts.title)
    )
}

/// Render the definition as space-separated rrd graph tokens.
pub fn render_definition(def: &GraphDefinition) -> anyhow::Result<String> {
    let mut out = String::new();
    for instr in def.iter() {
        render_instruction(instr, &mut out)?;
    }
    Ok(out)
}

/// Append the token(s) for one instruction, each followed by a single space.
pub fn render_instruction(instr: &Instruction, out: &mut impl Write) -> fmt::Result {
    match instr {
        Instruction::Define {
            var,
            rrd_file,
            ds,
            cf,
        } => write!(
            out,
            "DEF:{}={}:{}:{} ",
            var,
            escape_colons(rrd_file),
            escape_colons(ds),
            cf.as_str()
        ),
        Instruction::Line {
            var,
            width,
            color,
            label,
        } => {
            let token = match width {
                LineWidth::Thin => "LINE1",
                LineWidth::Thick => "LINE2",
            };
            write!(out, "{}:{}{}:\"{}\" ", token, var, color, escape_label(label))
        }
        Instruction::PrintStat {
            var,
            stats,
            precision,
            unit,
            end_row,
        } => {
            let format = format!("%3.{}lf {}", precision, escape_label(&unit.replace('%', "%%")));
            for (idx, cf) in stats.iter().enumerate() {
                let align = if *end_row && idx + 1 == stats.len() { "\\l" } else { "" };
                write!(
                    out,
                    "GPRINT:{}:{}:\"{} {}{}\" ",
                    var,
                    cf.as_str(),
                    format,
                    cf.caption(),
                    align
                )?;
            }
            Ok(())
        }
        Instruction::ThresholdRule { value, color, .. } => write!(out, "HRULE:{}{} ", value, color),
    }
}

fn escape_colons(s: &str) -> String {
    s.replace(':', "\\:")
}

fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}

fn escape_label(s: &str) -> String {
    escape_quotes(&escape_colons(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Cf, Color, GraphConfig, ThresholdKind, Var, build};
    use crate::graph::{Datasource, DatasourceSet};
    use pretty_assertions::assert_eq;

    #[test]
    fn options_for_web01() {
        assert_eq!(
            render_options(&GraphOptions::for_host("web01")),
            "--vertical-label Percent -l0 --upper=101 --title \"CPU Usage -- web01\" "
        );
    }

    #[test]
    fn single_instructions() {
        let mut out = String::new();
        render_instruction(
            &Instruction::Define {
                var: Var(0),
                rrd_file: "C:/pnp/web01/cpu.rrd".to_string(),
                ds: "1".to_string(),
                cf: Cf::Max,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(out, "DEF:var1=C\\:/pnp/web01/cpu.rrd:1:MAX ");

        out.clear();
        render_instruction(
            &Instruction::ThresholdRule {
                kind: ThresholdKind::Warning,
                value: 92.5,
                color: Color::YELLOW,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(out, "HRULE:92.5#FFFF00 ");
    }

    #[test]
    fn legend_row_closes_only_after_the_last_stat() {
        let mut stat = Instruction::PrintStat {
            var: Var(2),
            stats: vec![Cf::Last, Cf::Max],
            precision: 1,
            unit: "%".to_string(),
            end_row: true,
        };
        let mut out = String::new();
        render_instruction(&stat, &mut out).unwrap();
        assert_eq!(
            out,
            "GPRINT:var3:LAST:\"%3.1lf %% Last\" GPRINT:var3:MAX:\"%3.1lf %% Max\\l\" "
        );

        if let Instruction::PrintStat { end_row, .. } = &mut stat {
            *end_row = false;
        }
        out.clear();
        render_instruction(&stat, &mut out).unwrap();
        assert!(!out.contains("\\l"));
    }

    #[test]
    fn two_core_definition() {
        let set = DatasourceSet::new(vec![
            Datasource::new("/pnp/h/cpu.rrd", "1", "%").with_thresholds(Some(90.0), Some(95.0)),
            Datasource::new("/pnp/h/cpu.rrd", "2", "%"),
        ]);
        let t = build(&set, "h", &GraphConfig::default()).unwrap();

        let expected = concat!(
            "DEF:var1=/pnp/h/cpu.rrd:1:MAX ",
            "DEF:var2=/pnp/h/cpu.rrd:2:MAX ",
            "LINE1:var2#FF91C5:\"CPU_Core1\" ",
            "GPRINT:var2:LAST:\"%3.1lf %% Last\" ",
            "GPRINT:var2:AVERAGE:\"%3.1lf %% Average\" ",
            "GPRINT:var2:MAX:\"%3.1lf %% Max\\l\" ",
            "LINE2:var1#000000:\"CPU_TOTAL\" ",
            "GPRINT:var1:LAST:\"%3.1lf %% Last\" ",
            "GPRINT:var1:AVERAGE:\"%3.1lf %% Average\" ",
            "GPRINT:var1:MAX:\"%3.1lf %% Max\\l\" ",
            "HRULE:90#FFFF00 ",
            "HRULE:95#FF0000 ",
        );
        assert_eq!(render_definition(&t.definition).unwrap(), expected);
    }

    #[test]
    fn rendering_is_byte_identical_across_builds() {
        let set: DatasourceSet = (1..=5)
            .map(|i| Datasource::new("/pnp/h/cpu.rrd", i.to_string(), "%"))
            .collect();
        let a = build(&set, "h", &GraphConfig::default()).unwrap();
        let b = build(&set, "h", &GraphConfig::default()).unwrap();
        assert_eq!(
            render_definition(&a.definition).unwrap(),
            render_definition(&b.definition).unwrap()
        );
        assert_eq!(render_options(&a.options), render_options(&b.options));
    }
}
