use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use pdf_shrink::cli::Args;
use pdf_shrink::config::Settings;
use pdf_shrink::engine::{Arbiter, BatchDriver, Event, LogReporter, Reporter};
use pdf_shrink::model::CompressionVerdict;
use pdf_shrink::tools::ExternalToolbox;

/// An existing directory as single-file output receives the input's file name
fn single_output_path(input: &Path, output: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();

    let settings = Settings::from_args(&args);
    let policy = settings.policy();
    let options = settings.options();

    let reporter = LogReporter::new();
    for method in policy.methods() {
        reporter.report(&Event::RequiredTools { method });
    }

    let toolbox = ExternalToolbox::new(&settings.tools);
    let arbiter = Arbiter::new(&toolbox, &reporter);

    if args.is_batch() {
        let report = BatchDriver::new(arbiter)
            .jobs(settings.jobs)
            .skipped_policy(settings.skipped_policy)
            .process_directory(&args.input, args.output.as_deref(), policy, &options)
            .with_context(|| format!("Failed to process directory: {}", args.input.display()))?;

        if !args.silent {
            println!(
                "Compressed {}/{} files, saved {:.2} KB",
                report.succeeded,
                report.total,
                report.bytes_saved as f64 / 1024.0
            );
        }
        return Ok(());
    }

    let output = args
        .output
        .as_deref()
        .map(|o| single_output_path(&args.input, o));

    let verdict = arbiter
        .compress(&args.input, output.as_deref(), policy, &options)
        .with_context(|| format!("Failed to compress {}", args.input.display()))?;

    match verdict {
        CompressionVerdict::Applied { ratio, method, .. } => {
            if !args.silent {
                let written = output.as_deref().unwrap_or(&args.input);
                println!(
                    "Successfully wrote {} ({} saved {:.2}%)",
                    written.display(),
                    method,
                    ratio * 100.0
                );
            }
            Ok(())
        }
        CompressionVerdict::Skipped(_) => Ok(()),
        CompressionVerdict::Failed(_) => {
            let summary = verdict.failure_summary().unwrap_or_default();
            anyhow::bail!("All attempted methods failed:\n{}", summary)
        }
    }
}
