//! CLI: Compile a workflow source (JSON) into canvas XML.
//!
//! Usage: `compile_canvas [OPTIONS] <path-to-workflow-json>`
//! Example: compile_canvas --output out/canvas.xml workflows/provision.json
//!
//! The XML is written to stdout unless --output is given. Logs go to stderr.
//!
//! Set RUST_LOG=workflow_canvas=trace for TRACE-level span enter/exit and events.

use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use workflow_canvas::{
  CompilerConfig, RelativeAddressing, WorkflowCompiler,
  workflow_io::{load_config, load_workflow_source, write_output},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
  /// Concatenated item fragments
  Xml,
  /// Items with name, kind, script and xml
  Json,
}

/// Compile a workflow source (JSON) into canvas XML.
#[derive(Parser, Debug)]
#[command(name = "compile_canvas")]
#[command(
  after_help = r#"Environment variables (override the matching flag when set):
  CANVAS_ADDRESSING   Relative target direction: forward (default) or backward.

Examples:
  compile_canvas workflows/provision.json
  compile_canvas --config canvas.json --output out/canvas.xml workflows/provision.json"#
)]
struct Args {
  /// Compiler settings (layout, addressing, item prefix) as JSON
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Relative target direction. Overridden by CANVAS_ADDRESSING if set.
  #[arg(long, value_name = "forward|backward")]
  addressing: Option<RelativeAddressing>,

  /// Output file. Default: stdout
  #[arg(long, short, value_name = "FILE")]
  output: Option<PathBuf>,

  #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
  format: OutputFormat,

  /// Path to the workflow source file
  #[arg(value_name = "path-to-workflow-json")]
  workflow: PathBuf,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let mut config = match &args.config {
    Some(path) => match load_config(path) {
      Ok(c) => c,
      Err(e) => {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
      }
    },
    None => CompilerConfig::default(),
  };

  // Env var overrides the flag, which overrides the config file.
  let addressing = match env::var("CANVAS_ADDRESSING") {
    Ok(v) => match v.parse::<RelativeAddressing>() {
      Ok(a) => Some(a),
      Err(e) => {
        eprintln!("Invalid CANVAS_ADDRESSING: {}", e);
        process::exit(1);
      }
    },
    Err(_) => args.addressing,
  };
  if let Some(a) = addressing {
    config.addressing = a;
  }
  info!(workflow = %args.workflow.display(), addressing = %config.addressing, "options (env or flags)");

  let source = match load_workflow_source(&args.workflow) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error reading {}: {}", args.workflow.display(), e);
      process::exit(1);
    }
  };

  let canvas = match WorkflowCompiler::new(config).compile(&source) {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Compile error: {}", e);
      process::exit(1);
    }
  };

  let rendered = match args.format {
    OutputFormat::Xml => canvas.canvas_xml(),
    OutputFormat::Json => match serde_json::to_string_pretty(&canvas) {
      Ok(s) => s + "\n",
      Err(e) => {
        eprintln!("Error encoding JSON: {}", e);
        process::exit(1);
      }
    },
  };

  match &args.output {
    Some(path) => {
      if let Err(e) = write_output(path, &rendered) {
        eprintln!("Error writing {}: {}", path.display(), e);
        process::exit(1);
      }
      info!(path = %path.display(), items = canvas.items.len(), "canvas written");
    }
    None => print!("{}", rendered),
  }
}
