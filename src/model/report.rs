use std::path::PathBuf;

use super::CompressionVerdict;

/// Aggregate result of one batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    /// Relative paths of failed files, in discovery order
    pub failed_paths: Vec<PathBuf>,
    pub bytes_saved: u64,
}

impl BatchReport {
    /// Fold one file's verdict into the totals.
    pub fn record(&mut self, relative: PathBuf, verdict: &CompressionVerdict) {
        self.total += 1;
        match verdict {
            CompressionVerdict::Applied { .. } => {
                self.succeeded += 1;
                self.bytes_saved += verdict.bytes_saved();
            }
            CompressionVerdict::Skipped(_) => self.skipped += 1,
            CompressionVerdict::Failed(_) => self.failed_paths.push(relative),
        }
    }

    /// Count a file that could not even be arbitrated (missing, I/O error).
    pub fn record_error(&mut self, relative: PathBuf) {
        self.total += 1;
        self.failed_paths.push(relative);
    }

    pub fn failed(&self) -> usize {
        self.failed_paths.len()
    }
}
