//! # bloom
//!
//! Interactive Bloom filter prompt and batch false-positive evaluation.
//!
//! ## Usage
//!
//! ```bash
//! # Prompt with a 2^10 bit filter and 4 non-cryptographic hashes
//! bloom -s 10 -n 4
//!
//! # 100 filters of 2^16 bits filled with 2500 words, cryptographic hashes
//! bloom --auto --crypto
//!
//! # Observed rate at growing fill levels
//! bloom --auto --sweep 500,1000,2000,4000
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use bloom_cli::{write_adjustments, write_report, write_sweep, Args, Repl};
use bloom_engine::{BloomFilter, EvaluationService, Metrics, WordListSource};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    if args.auto {
        run_automatic(&args)
    } else {
        run_manual(&args)
    }
}

fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

fn run_manual(args: &Args) -> Result<()> {
    let (config, adjustments) = args.manual_config();
    write_adjustments(&adjustments, &mut io::stderr())?;
    let filter = BloomFilter::new(&config);
    info!(
        size_bits = config.size_bits(),
        hash_functions = ?filter.hash_names(),
        "Filter ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Repl::new(filter)
        .run(stdin.lock(), &mut stdout)
        .context("prompt I/O failed")?;
    stdout.flush().context("failed to flush stdout")
}

fn run_automatic(args: &Args) -> Result<()> {
    let (config, adjustments) = args.evaluation_config();
    write_adjustments(&adjustments, &mut io::stderr())?;
    let source = WordListSource::new(args.words.clone(), args.seed);
    let metrics = Arc::new(Metrics::new());
    let service = EvaluationService::with_metrics(metrics.clone());
    let mut stdout = io::stdout();

    if let Some(counts) = &args.sweep {
        let points = service
            .sweep(&config, &source, counts)
            .context("sweep failed")?;
        log_metrics(&metrics);
        if args.json {
            serde_json::to_writer_pretty(&mut stdout, &points)?;
            writeln!(stdout)?;
        } else {
            write_sweep(&points, &mut stdout)?;
        }
        return Ok(());
    }

    let bar = ProgressBar::new(config.num_filters as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} filters [{elapsed_precise}]")
            .context("invalid progress template")?,
    );

    let report = service
        .run(&config, &source, &|| bar.inc(1))
        .context("evaluation failed")?;
    bar.finish_and_clear();
    log_metrics(&metrics);

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        write_report(&report, &mut stdout)?;
    }
    Ok(())
}

fn log_metrics(metrics: &Metrics) {
    let snapshot = metrics.snapshot();
    info!(
        filters = snapshot.filters_created,
        bytes = snapshot.bytes_allocated,
        inserts = snapshot.elements_inserted,
        lookups = snapshot.lookups_performed,
        avg_insert_ns = snapshot.avg_insert_ns,
        avg_lookup_ns = snapshot.avg_lookup_ns,
        "Evaluation metrics"
    );
}
