use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::error::{CompressError, ToolError};
use crate::model::{BatchReport, CompressionMethod, CompressionVerdict};

/// Progress and result notifications emitted by the arbiter and driver
#[derive(Debug)]
pub enum Event<'a> {
    RequiredTools {
        method: CompressionMethod,
    },
    MethodSucceeded {
        method: CompressionMethod,
        output_size: u64,
    },
    MethodFailed {
        method: CompressionMethod,
        error: &'a ToolError,
    },
    FallingBack {
        from: CompressionMethod,
        to: CompressionMethod,
    },
    RaceWinner {
        method: CompressionMethod,
        output_size: u64,
    },
    Verdict {
        input: &'a Path,
        original_size: u64,
        verdict: &'a CompressionVerdict,
    },
    NoInputs {
        root: &'a Path,
    },
    /// A directory or entry below the batch root that could not be read
    Unreadable {
        error: &'a walkdir::Error,
    },
    BatchStarted {
        root: &'a Path,
        total: usize,
    },
    FileStarted {
        index: usize,
        total: usize,
        relative: &'a Path,
    },
    FileError {
        relative: &'a Path,
        error: &'a CompressError,
    },
    BatchFinished {
        report: &'a BatchReport,
    },
}

/// Sink for [`Event`]s
pub trait Reporter: Sync {
    fn report(&self, event: &Event<'_>);
}

/// Forwards events to the `log` facade.
///
/// A missing tool stays missing for every file of a run, so its install
/// hint is logged as a warning once and at debug level afterwards.
#[derive(Debug, Default)]
pub struct LogReporter {
    missing_tools: Mutex<HashSet<String>>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a method failure deserves a warning rather than a debug line
    fn is_news(&self, error: &ToolError) -> bool {
        if error.is_retryable() {
            return true;
        }
        match self.missing_tools.lock() {
            Ok(mut seen) => seen.insert(error.to_string()),
            Err(_) => true,
        }
    }
}

fn kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

impl Reporter for LogReporter {
    fn report(&self, event: &Event<'_>) {
        match event {
            Event::RequiredTools { method } => {
                let tools = method.required_tools();
                if tools.is_empty() {
                    log::debug!("{} needs no external tools", method);
                } else {
                    log::info!("Required dependencies for {}: {}", method, tools.join(", "));
                }
                if method.is_lossy_for_text() {
                    log::info!(
                        "{} rasterizes pages; text may no longer be selectable",
                        method
                    );
                }
            }
            Event::MethodSucceeded {
                method,
                output_size,
            } => log::info!("Method {} succeeded: {:.2} KB", method, kb(*output_size)),
            Event::MethodFailed { method, error } => {
                if self.is_news(error) {
                    log::warn!("Method {} failed: {}", method, error)
                } else {
                    log::debug!("Method {} failed: {}", method, error)
                }
            }
            Event::FallingBack { from, to } => {
                log::warn!("{} failed, falling back to {}", from, to)
            }
            Event::RaceWinner {
                method,
                output_size,
            } => log::info!("Best method: {}, size: {:.2} KB", method, kb(*output_size)),
            Event::Verdict {
                input,
                original_size,
                verdict,
            } => match verdict {
                CompressionVerdict::Applied {
                    method,
                    output_size,
                    ratio,
                    ..
                } => {
                    log::info!("Original size: {:.2} KB", kb(*original_size));
                    log::info!("Compressed size: {:.2} KB ({})", kb(*output_size), method);
                    log::info!("Compression ratio: {:.2}%", ratio * 100.0);
                }
                CompressionVerdict::Skipped(reason) => log::warn!(
                    "Compression did not reduce {} ({}), keeping the original",
                    input.display(),
                    reason
                ),
                CompressionVerdict::Failed(failures) => {
                    log::error!("All attempted methods failed for {}", input.display());
                    for failure in failures {
                        log::error!("  - {}: {}", failure.method, failure.error);
                    }
                }
            },
            Event::NoInputs { root } => log::warn!("No PDF files found in {}", root.display()),
            Event::Unreadable { error } => log::warn!("Skipping unreadable entry: {}", error),
            Event::BatchStarted { root, total } => {
                log::info!("Found {} PDF files to process in {}", total, root.display())
            }
            Event::FileStarted {
                index,
                total,
                relative,
            } => log::info!("Processing [{}/{}]: {}", index, total, relative.display()),
            Event::FileError { relative, error } => {
                log::error!("Failed to process {}: {}", relative.display(), error)
            }
            Event::BatchFinished { report } => {
                log::info!(
                    "Compression finished: {}/{} files compressed, {} unchanged",
                    report.succeeded,
                    report.total,
                    report.skipped
                );
                log::info!("Total saved: {:.2} KB", kb(report.bytes_saved));
                if !report.failed_paths.is_empty() {
                    log::warn!("The following files failed:");
                    for path in &report.failed_paths {
                        log::warn!("  - {}", path.display());
                    }
                }
            }
        }
    }
}
