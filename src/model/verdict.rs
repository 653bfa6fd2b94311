use std::fmt;

use super::{CompressionMethod, MethodFailure};

/// Why a file was left alone even though compression ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Best candidate was not strictly smaller than the original
    NoReduction,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoReduction => "no_reduction",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision of the arbiter for one file
#[derive(Debug)]
pub enum CompressionVerdict {
    /// A strictly smaller output was written to the destination
    Applied {
        method: CompressionMethod,
        original_size: u64,
        output_size: u64,
        /// `1 - output_size / original_size`, in `[0, 1)`
        ratio: f64,
    },
    Skipped(SkipReason),
    /// Every attempted method failed
    Failed(Vec<MethodFailure>),
}

impl CompressionVerdict {
    /// Build an `Applied` verdict, or `Skipped` if the candidate is not smaller.
    pub fn measure(method: CompressionMethod, original_size: u64, output_size: u64) -> Self {
        if output_size >= original_size {
            return CompressionVerdict::Skipped(SkipReason::NoReduction);
        }
        let ratio = 1.0 - output_size as f64 / original_size as f64;
        CompressionVerdict::Applied {
            method,
            original_size,
            output_size,
            ratio,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, CompressionVerdict::Applied { .. })
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            CompressionVerdict::Applied { ratio, .. } => Some(*ratio),
            _ => None,
        }
    }

    /// Bytes removed relative to the original (0 unless applied)
    pub fn bytes_saved(&self) -> u64 {
        match self {
            CompressionVerdict::Applied {
                original_size,
                output_size,
                ..
            } => original_size - output_size,
            _ => 0,
        }
    }

    /// One line per failed method, naming the method and the cause
    pub fn failure_summary(&self) -> Option<String> {
        match self {
            CompressionVerdict::Failed(failures) => Some(
                failures
                    .iter()
                    .map(|f| format!("{}: {}", f.method, f.error))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }
}
