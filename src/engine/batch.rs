use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::cli::SkippedPolicy;
use crate::error::{BatchError, CompressError};
use crate::model::{BatchReport, CompressionOptions, CompressionVerdict};

use super::arbiter::{Arbiter, Policy};
use super::reporter::{Event, Reporter};

/// Applies the arbiter to every PDF under a directory tree, mirroring the
/// tree into an output root.
pub struct BatchDriver<'a> {
    arbiter: Arbiter<'a>,
    skipped_policy: SkippedPolicy,
    jobs: usize,
}

impl<'a> BatchDriver<'a> {
    pub fn new(arbiter: Arbiter<'a>) -> Self {
        Self {
            arbiter,
            skipped_policy: SkippedPolicy::default(),
            jobs: 1,
        }
    }

    pub fn skipped_policy(mut self, policy: SkippedPolicy) -> Self {
        self.skipped_policy = policy;
        self
    }

    /// Number of files compressed concurrently; 1 keeps processing sequential
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn process_directory(
        &self,
        input_root: &Path,
        output_root: Option<&Path>,
        policy: Policy,
        options: &CompressionOptions,
    ) -> Result<BatchReport, BatchError> {
        let output_root = output_root.ok_or(BatchError::MissingOutputDir)?;
        if !input_root.is_dir() {
            return Err(BatchError::InputNotDirectory(input_root.to_path_buf()));
        }
        fs::create_dir_all(output_root).map_err(|source| BatchError::CreateOutputDir {
            path: output_root.to_path_buf(),
            source,
        })?;

        let reporter = self.arbiter.reporter();
        let files = discover_pdfs(input_root, Some(output_root), reporter)?;
        if files.is_empty() {
            reporter.report(&Event::NoInputs { root: input_root });
            return Ok(BatchReport::default());
        }

        let total = files.len();
        reporter.report(&Event::BatchStarted {
            root: input_root,
            total,
        });

        let process = |(index, relative): (usize, &PathBuf)| {
            reporter.report(&Event::FileStarted {
                index: index + 1,
                total,
                relative: relative.as_path(),
            });
            self.process_file(input_root, output_root, relative, policy, options)
        };

        let results: Vec<Result<CompressionVerdict, CompressError>> = if self.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()?;
            pool.install(|| files.par_iter().enumerate().map(process).collect())
        } else {
            files.iter().enumerate().map(process).collect()
        };

        // Folded in discovery order so failed_paths order is stable
        let mut report = BatchReport::default();
        for (relative, result) in files.into_iter().zip(results) {
            match result {
                Ok(verdict) => report.record(relative, &verdict),
                Err(error) => {
                    reporter.report(&Event::FileError {
                        relative: relative.as_path(),
                        error: &error,
                    });
                    report.record_error(relative);
                }
            }
        }

        reporter.report(&Event::BatchFinished { report: &report });
        Ok(report)
    }

    fn process_file(
        &self,
        input_root: &Path,
        output_root: &Path,
        relative: &Path,
        policy: Policy,
        options: &CompressionOptions,
    ) -> Result<CompressionVerdict, CompressError> {
        let input = input_root.join(relative);
        let output = output_root.join(relative);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| CompressError::io(parent, e))?;
        }

        let verdict = self
            .arbiter
            .compress(&input, Some(&output), policy, options)?;

        if matches!(verdict, CompressionVerdict::Skipped(_))
            && self.skipped_policy == SkippedPolicy::CopyOriginal
        {
            fs::copy(&input, &output).map_err(|e| CompressError::io(&output, e))?;
        }
        Ok(verdict)
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Relative paths of all PDF files under `root`, sorted.
///
/// `exclude` prunes a directory nested inside `root`, so an output tree
/// placed under the input tree is never picked up as input. Entries below
/// the root that cannot be read are reported and skipped; only an
/// unreadable root is an error.
pub fn discover_pdfs(
    root: &Path,
    exclude: Option<&Path>,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>, BatchError> {
    let exclude = exclude.and_then(|path| path.canonicalize().ok());
    let is_excluded = |entry: &DirEntry| {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && exclude.as_ref().is_some_and(|excluded| {
                entry
                    .path()
                    .canonicalize()
                    .is_ok_and(|path| &path == excluded)
            })
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_excluded(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => return Err(error.into()),
            Err(error) => {
                reporter.report(&Event::Unreadable { error: &error });
                continue;
            }
        };
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
    }
    files.sort();
    Ok(files)
}
