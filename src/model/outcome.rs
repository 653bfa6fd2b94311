use crate::error::ToolError;

use super::CompressionMethod;

/// What an adapter reports back for one request.
///
/// On success the output file exists at the requested path and
/// `output_size` is its length in bytes. On failure nothing is left at
/// the output path.
#[derive(Debug)]
pub struct CompressionOutcome {
    pub method: CompressionMethod,
    pub result: Result<u64, ToolError>,
}

impl CompressionOutcome {
    pub fn succeeded(method: CompressionMethod, output_size: u64) -> Self {
        Self {
            method,
            result: Ok(output_size),
        }
    }

    pub fn failed(method: CompressionMethod, error: ToolError) -> Self {
        Self {
            method,
            result: Err(error),
        }
    }

    pub fn success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn output_size(&self) -> Option<u64> {
        self.result.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.result.as_ref().err()
    }

    pub fn into_result(self) -> Result<u64, MethodFailure> {
        let method = self.method;
        self.result.map_err(|error| MethodFailure { method, error })
    }
}

/// A method that was attempted and failed, kept for user-facing reporting.
#[derive(Debug)]
pub struct MethodFailure {
    pub method: CompressionMethod,
    pub error: ToolError,
}
