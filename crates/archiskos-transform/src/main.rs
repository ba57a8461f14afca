//! CLI entry point for the archiskos ontology converter.
//!
//! Reads a JSON model document, transforms it, and writes Turtle or JSON.
//! Logs go to stderr so the serialized graph can be piped from stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use archiskos_core::config::load_settings;
use archiskos_export::OutputFormat;
use archiskos_transform::{ModelDocument, TransformEngine};

#[derive(Parser)]
#[command(name = "archiskos")]
#[command(about = "Converts architecture-model graphs into SKOS/OWL thesauri")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: archiskos).
    #[arg(short, long, default_value = "archiskos", global = true)]
    config: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Transform a model document and serialize the result.
    Convert {
        /// Path to the JSON model document.
        input: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Output::Ttl)]
        output: Output,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the run report as JSON to stderr.
        #[arg(long)]
        report: bool,
    },
    /// Show which namespace and prefix a model document would be published under.
    Namespace {
        /// Path to the JSON model document.
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Ttl,
    Json,
}

impl From<Output> for OutputFormat {
    fn from(output: Output) -> Self {
        match output {
            Output::Ttl => OutputFormat::Turtle,
            Output::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let settings = load_settings(&cli.config)
        .with_context(|| format!("loading configuration '{}'", cli.config))?;
    let engine = TransformEngine::new().with_settings(settings);

    match cli.command {
        Command::Convert {
            input,
            output,
            out,
            report,
        } => {
            let document = ModelDocument::load(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let source = document.to_graph()?;

            let (graph, run_report) =
                engine.transform_with_report(&source, &document.name, &document.properties)?;
            let serialized = archiskos_export::export(&graph, output.into())?;

            match out {
                Some(path) => {
                    std::fs::write(&path, serialized)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Wrote output");
                }
                None => print!("{serialized}"),
            }

            if report {
                eprintln!("{}", serde_json::to_string_pretty(&run_report)?);
            }
        }
        Command::Namespace { input } => {
            let document = ModelDocument::load(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let resolved = engine.resolve_namespace(&document.properties);
            println!("{}", serde_json::to_string(&resolved)?);
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
