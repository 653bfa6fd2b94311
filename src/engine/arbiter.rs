//! Single-file arbitration
//!
//! Every candidate output is written into a private scratch directory next
//! to the destination. Only a candidate strictly smaller than the original
//! is renamed onto the destination; the scratch directory and everything
//! left in it are removed when arbitration returns, on every path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::CompressError;
use crate::model::{
    CompressionMethod, CompressionOptions, CompressionRequest, CompressionVerdict, MethodFailure,
    MethodSelection,
};
use crate::tools::{discard, Toolbox};

use super::reporter::{Event, Reporter};

/// How the arbiter chooses which methods to run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Run exactly the selected method, or race all of them.
    /// A failed single method is never replaced by another one.
    Explicit(MethodSelection),
    /// Ghostscript preset first; lopdf only if Ghostscript fails outright
    LegacyFallback,
}

impl Policy {
    /// Methods this policy may run, in the order it runs them
    pub fn methods(&self) -> Vec<CompressionMethod> {
        match self {
            Policy::Explicit(selection) => selection.methods(),
            Policy::LegacyFallback => vec![
                CompressionMethod::PostScriptOptimize,
                CompressionMethod::StreamOptimize,
            ],
        }
    }
}

/// A successful adapter output waiting in the scratch directory
#[derive(Debug)]
struct Candidate {
    method: CompressionMethod,
    path: PathBuf,
    size: u64,
}

/// Produces a safe, measured result for one input file
#[derive(Clone, Copy)]
pub struct Arbiter<'a> {
    toolbox: &'a dyn Toolbox,
    reporter: &'a dyn Reporter,
}

impl<'a> Arbiter<'a> {
    pub fn new(toolbox: &'a dyn Toolbox, reporter: &'a dyn Reporter) -> Self {
        Self { toolbox, reporter }
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    /// Compress `input` to `output`, or in place when `output` is `None`.
    ///
    /// The destination is only written when the verdict is `Applied`, which
    /// guarantees the new file is strictly smaller than the original.
    pub fn compress(
        &self,
        input: &Path,
        output: Option<&Path>,
        policy: Policy,
        options: &CompressionOptions,
    ) -> Result<CompressionVerdict, CompressError> {
        let metadata = fs::metadata(input).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CompressError::MissingInput(input.to_path_buf()),
            _ => CompressError::io(input, e),
        })?;
        if !metadata.is_file() {
            return Err(CompressError::NotAFile(input.to_path_buf()));
        }
        let original_size = metadata.len();

        let destination = output.unwrap_or(input);
        let workspace = scratch_dir_for(destination)?;

        let selected = match policy {
            Policy::Explicit(MethodSelection::Single(method)) => self
                .attempt(input, workspace.path(), method, options)
                .map_err(|failure| vec![failure]),
            Policy::Explicit(MethodSelection::All) => self.race(input, workspace.path(), options),
            Policy::LegacyFallback => self.legacy(input, workspace.path(), options),
        };

        let verdict = match selected {
            Ok(candidate) => {
                let verdict =
                    CompressionVerdict::measure(candidate.method, original_size, candidate.size);
                if verdict.is_applied() {
                    fs::rename(&candidate.path, destination)
                        .map_err(|e| CompressError::io(destination, e))?;
                }
                verdict
            }
            Err(failures) => CompressionVerdict::Failed(failures),
        };

        self.reporter.report(&Event::Verdict {
            input,
            original_size,
            verdict: &verdict,
        });
        Ok(verdict)
    }

    /// Run every method into its own scratch file and keep the smallest.
    fn race(
        &self,
        input: &Path,
        workspace: &Path,
        options: &CompressionOptions,
    ) -> Result<Candidate, Vec<MethodFailure>> {
        let mut candidates = Vec::new();
        let mut failures = Vec::new();

        for method in CompressionMethod::ALL {
            match self.attempt(input, workspace, method, options) {
                Ok(candidate) => candidates.push(candidate),
                Err(failure) => failures.push(failure),
            }
        }

        // min_by_key keeps the first of equal minima, i.e. declaration order
        let best = candidates
            .iter()
            .enumerate()
            .min_by_key(|(_, candidate)| candidate.size)
            .map(|(index, _)| index);

        let Some(best) = best else {
            return Err(failures);
        };
        let winner = candidates.swap_remove(best);
        for loser in &candidates {
            discard(&loser.path);
        }

        self.reporter.report(&Event::RaceWinner {
            method: winner.method,
            output_size: winner.size,
        });
        Ok(winner)
    }

    /// Ghostscript preset, then lopdf if and only if Ghostscript failed.
    fn legacy(
        &self,
        input: &Path,
        workspace: &Path,
        options: &CompressionOptions,
    ) -> Result<Candidate, Vec<MethodFailure>> {
        let options = CompressionOptions {
            preset: Some(options.preset.unwrap_or_default()),
            ..options.clone()
        };

        let gs = CompressionMethod::PostScriptOptimize;
        let lopdf = CompressionMethod::StreamOptimize;

        let first = match self.attempt(input, workspace, gs, &options) {
            Ok(candidate) => return Ok(candidate),
            Err(failure) => failure,
        };

        self.reporter.report(&Event::FallingBack {
            from: gs,
            to: lopdf,
        });
        self.attempt(input, workspace, lopdf, &options)
            .map_err(|second| vec![first, second])
    }

    fn attempt(
        &self,
        input: &Path,
        workspace: &Path,
        method: CompressionMethod,
        options: &CompressionOptions,
    ) -> Result<Candidate, MethodFailure> {
        let request = CompressionRequest::new(
            input,
            workspace.join(format!("{}.pdf", method.name())),
            method,
            options,
        );
        let outcome = self.toolbox.compressor(method).compress(&request);

        match &outcome.result {
            Ok(size) => self.reporter.report(&Event::MethodSucceeded {
                method,
                output_size: *size,
            }),
            Err(error) => self.reporter.report(&Event::MethodFailed { method, error }),
        }

        let size = outcome.into_result()?;
        Ok(Candidate {
            method,
            path: request.output_path,
            size,
        })
    }
}

/// Scratch directory on the destination's filesystem so the final rename is atomic
fn scratch_dir_for(destination: &Path) -> Result<TempDir, CompressError> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| CompressError::io(parent, e))?;
    tempfile::Builder::new()
        .prefix(".pdf-shrink-")
        .tempdir_in(parent)
        .map_err(|e| CompressError::io(parent, e))
}
