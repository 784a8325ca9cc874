//! KSP Science Opportunity Report
//!
//! Enumerates every science opportunity in a catalog and prints one
//! identifier per line, followed by the total count. Runs entirely
//! in-process: no game, no networking.
//!
//! Usage:
//!   cargo run -p kspscience-report
//!   cargo run -p kspscience-report -- --body Kerbin --summary
//!   cargo run -p kspscience-report -- --catalog modded.json --format json -v

use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use kspscience_logic::catalog::{validate_catalog, Catalog};
use kspscience_logic::opportunity::{generate_opportunities, Opportunity};
use kspscience_logic::summary::{summarize, Summary};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kspscience-report")]
#[command(about = "List every KSP science opportunity and the total count")]
struct Cli {
    /// JSON catalog to use instead of the stock bodies and experiments
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Only report these bodies (repeatable)
    #[arg(long = "body", value_name = "NAME")]
    bodies: Vec<String>,

    /// Only report these experiments (repeatable)
    #[arg(long = "experiment", value_name = "NAME")]
    experiments: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print counts per body, experiment and situation instead of identifiers
    #[arg(long)]
    summary: bool,

    /// Fail if the catalog has data-quality issues
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report {
    opportunities: Vec<String>,
    total: usize,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        // A closed reader (`| head`) ends the report early, not in failure.
        if is_broken_pipe(&e) {
            debug!("stdout closed: {:#}", e);
            return;
        }
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io| io.kind() == io::ErrorKind::BrokenPipe)
    })
}

/// Logs go to stderr so stdout stays a clean report. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(verbose >= 2)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(cli)?;
    check_catalog(&catalog, cli.strict)?;
    let catalog = select(catalog, &cli.bodies, &cli.experiments)?;

    let opportunities = generate_opportunities(&catalog.bodies, &catalog.experiments)
        .context("failed to enumerate opportunities")?;
    info!("{} opportunities", opportunities.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    // JSON is rendered to a string first so write failures surface as io::Error.
    match (cli.summary, cli.format) {
        (false, Format::Text) => write_identifiers(&mut out, &opportunities)?,
        (false, Format::Json) => {
            let report = Report {
                opportunities: opportunities.iter().map(ToString::to_string).collect(),
                total: opportunities.len(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        (true, Format::Text) => write_summary(&mut out, &summarize(&opportunities))?,
        (true, Format::Json) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&summarize(&opportunities))?)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::stock().context("stock catalog is invalid")?,
    };
    info!(
        "Loaded {} bodies and {} experiments from {}",
        catalog.bodies.len(),
        catalog.experiments.len(),
        cli.catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stock catalog".into())
    );
    Ok(catalog)
}

/// Issues never change the output; `--strict` turns them into a failure.
fn check_catalog(catalog: &Catalog, strict: bool) -> Result<()> {
    let issues = validate_catalog(catalog);
    for issue in &issues {
        warn!("catalog: {}", issue);
    }
    if strict && !issues.is_empty() {
        bail!("catalog has {} issue(s)", issues.len());
    }
    Ok(())
}

/// Restrict the catalog to the named bodies and experiments, keeping catalog order.
fn select(mut catalog: Catalog, bodies: &[String], experiments: &[String]) -> Result<Catalog> {
    for name in bodies {
        if catalog.body(name).is_none() {
            bail!("unknown body '{}'", name);
        }
    }
    for name in experiments {
        if catalog.experiment(name).is_none() {
            bail!("unknown experiment '{}'", name);
        }
    }

    if !bodies.is_empty() {
        catalog.bodies.retain(|b| bodies.contains(&b.name));
    }
    if !experiments.is_empty() {
        catalog.experiments.retain(|e| experiments.contains(&e.name));
    }
    debug!(
        "Selected {} bodies, {} experiments",
        catalog.bodies.len(),
        catalog.experiments.len()
    );
    Ok(catalog)
}

fn write_identifiers(out: &mut impl Write, opportunities: &[Opportunity]) -> io::Result<()> {
    for op in opportunities {
        writeln!(out, "{}", op)?;
    }
    writeln!(out, "{}", opportunities.len())
}

fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "=== Opportunities by body ===")?;
    for (body, n) in &summary.by_body {
        writeln!(out, "  {:<28} {:>5}", body, n)?;
    }
    writeln!(out, "\n=== Opportunities by experiment ===")?;
    for (experiment, n) in &summary.by_experiment {
        writeln!(out, "  {:<28} {:>5}", experiment, n)?;
    }
    writeln!(out, "\n=== Opportunities by situation ===")?;
    for (situation, n) in &summary.by_situation {
        writeln!(out, "  {:<28} {:>5}", situation.as_str(), n)?;
    }
    writeln!(
        out,
        "\nGlobal: {}, biome-scoped: {}",
        summary.global,
        summary.total - summary.global
    )?;
    writeln!(out, "Total: {}", summary.total)
}
