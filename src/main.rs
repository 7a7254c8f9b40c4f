use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::{self, Write};

mod cli;
mod config;
mod fileno;
mod output;
mod sample;
mod staging;
mod stats;
mod table;
mod util;
mod verify;

use cli::{Command, GenerateArgs, RootArgs, SampleArgs, VerifyArgs};
use config::{load_config, GeneratorConfig};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose)?;

    match args.command {
        Command::Generate(args) => cmd_generate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Verify(args) => cmd_verify(args),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("FILENO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    let config = base.apply(args.overrides());
    config.validate()?;
    tracing::debug!(?config, "resolved generator config");

    if args.stdout {
        let sink = io::BufWriter::new(io::stdout().lock());
        let summary =
            output::write_table(sink, config.file_numbers(), config.records_per_group)?;
        tracing::info!(records = summary.total_records, "table written to stdout");
        return Ok(());
    }

    let path = config.output_path();
    let summary =
        output::write_table_atomic(&path, config.file_numbers(), config.records_per_group)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    let cwd = std::env::current_dir().ok();
    println!("Wrote {}", util::display_path(&path, cwd.as_deref()));
    for line in summary.text_lines() {
        println!("  {line}");
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> Result<()> {
    let text = sample::render_sample(args.numbers)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> Result<()> {
    let report = verify::verify_file(&args.input, args.options())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}: {} rows, {} categories, {} years, {} numbers per year",
            args.input.display(),
            report.rows,
            report.categories,
            report.years,
            report
                .numbers_per_year
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        for issue in &report.issues {
            println!("  {issue}");
        }
        if report.issue_count > report.issues.len() {
            println!("  ... and {} more", report.issue_count - report.issues.len());
        }
    }
    if !report.ok {
        return Err(anyhow!("{} issue(s) found", report.issue_count));
    }
    Ok(())
}
