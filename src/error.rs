use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification of an adapter failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    MissingInputFile,
    ToolMissing,
    ToolRejectedInput,
    NoOutputProduced,
    Timeout,
    Io,
}

/// Failure of a single external compressor run.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("{tool} is not installed (install {hint})")]
    Missing { tool: String, hint: &'static str },

    #[error("{tool} rejected the input (exit code {code}): {stderr}")]
    RejectedInput {
        tool: String,
        code: String,
        stderr: String,
    },

    #[error("{tool} produced no usable output")]
    NoOutput { tool: String },

    #[error("{tool} timed out after {}s", .after.as_secs())]
    TimedOut { tool: String, after: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ToolError::MissingInput(_) => FailureKind::MissingInputFile,
            ToolError::Missing { .. } => FailureKind::ToolMissing,
            ToolError::RejectedInput { .. } => FailureKind::ToolRejectedInput,
            ToolError::NoOutput { .. } => FailureKind::NoOutputProduced,
            ToolError::TimedOut { .. } => FailureKind::Timeout,
            ToolError::Io(_) => FailureKind::Io,
        }
    }

    /// A missing tool will be missing for every file; anything else may
    /// succeed with a different method.
    pub fn is_retryable(&self) -> bool {
        self.kind() != FailureKind::ToolMissing
    }
}

/// Failure to arbitrate a single file, independent of any adapter.
#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("Input is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompressError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompressError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure that aborts a whole batch before or while enumerating inputs.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Batch mode requires an output directory (--output)")]
    MissingOutputDir,

    #[error("Input is not a directory: {0}")]
    InputNotDirectory(PathBuf),

    #[error("Failed to enumerate input files: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
