use anyhow::Context;
use clap::{Parser, Subcommand};
use cpu_multicore_graph::Result;
use cpu_multicore_graph::graph::{self, GraphConfig, PalettePolicy};
use cpu_multicore_graph::input::{self, RrdLayout, RrdStorage};
use cpu_multicore_graph::render::{self, OutputFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cpu-multicore-graph")]
#[command(about = "Per-core CPU usage graph templates for rrd-based graphing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph template from a JSON request document.
    Render {
        #[arg(long)]
        input: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a graph template straight from a Nagios performance-data string.
    Perfdata {
        #[arg(long)]
        perfdata: String,

        #[arg(long)]
        hostname: String,

        #[arg(long, default_value = "/var/lib/pnp4nagios/perfdata")]
        rrd_dir: String,

        #[arg(long, default_value = "check_cpu_multicore")]
        service: String,

        #[arg(long, value_enum, default_value_t = RrdStorage::Single)]
        storage: RrdStorage,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Coloring for cores beyond the fixed nine-color palette.
    #[arg(long, value_enum, default_value_t = PalettePolicy::Strict)]
    palette: PalettePolicy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Rrd)]
    format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(short = 'o', long)]
    out: Option<String>,
}

fn init_logging() {
    // stdout carries the template; diagnostics go to stderr.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let (hostname, datasources, output) = match cli.cmd {
        Commands::Render { input, output } => {
            // 1) Parse + validate the request document.
            let request = input::read_request_file(&input)?;
            (request.hostname, request.datasources, output)
        }
        Commands::Perfdata {
            perfdata,
            hostname,
            rrd_dir,
            service,
            storage,
            output,
        } => {
            // 1) Parse perfdata and map labels onto rrd files.
            let labels = input::parse_perfdata(&perfdata)?;
            let layout = RrdLayout {
                rrd_dir,
                hostname: hostname.clone(),
                service,
                storage,
            };
            (hostname, layout.datasources(&labels), output)
        }
    };

    // 2) Build.
    let config = GraphConfig {
        palette: output.palette,
        ..GraphConfig::default()
    };
    let template = graph::build(&datasources, &hostname, &config)
        .with_context(|| format!("build cpu graph for {}", hostname))?;

    // 3) Render.
    let text = render::render(&template, output.format)?;
    match output.out {
        Some(path) => {
            std::fs::write(&path, text).with_context(|| format!("write {}", path))?;
            tracing::info!(path = %path, "wrote graph template");
        }
        None => print!("{}", text),
    }

    Ok(())
}
