//! External compressor adapters
//!
//! Each adapter turns a [`CompressionRequest`] into one or more tool runs
//! and reports a [`CompressionOutcome`]. Adapters never panic or return
//! early with an error: every expected failure is classified into the
//! outcome, and a failed run leaves nothing at the output path.

pub mod ghostscript;
pub mod ocrmypdf;
pub mod process;
pub mod qpdf;
pub mod raster;
pub mod stream;

use std::fs;
use std::path::Path;

use crate::config::ToolCommands;
use crate::error::ToolError;
use crate::model::{CompressionMethod, CompressionOutcome, CompressionRequest};

pub use ghostscript::Ghostscript;
pub use ocrmypdf::OcrMyPdf;
pub use process::ToolInvocation;
pub use qpdf::Qpdf;
pub use raster::RasterReencoder;
pub use stream::StreamOptimizer;

/// One compression strategy
pub trait Compressor: Send + Sync {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome;
}

/// Dispatch from the closed method set to concrete compressors
pub trait Toolbox: Send + Sync {
    fn compressor(&self, method: CompressionMethod) -> &dyn Compressor;
}

/// Toolbox backed by the real external programs
#[derive(Debug, Clone)]
pub struct ExternalToolbox {
    ghostscript: Ghostscript,
    qpdf: Qpdf,
    raster: RasterReencoder,
    ocr: OcrMyPdf,
    stream: StreamOptimizer,
}

impl ExternalToolbox {
    pub fn new(commands: &ToolCommands) -> Self {
        Self {
            ghostscript: Ghostscript::new(&commands.ghostscript),
            qpdf: Qpdf::new(&commands.qpdf),
            raster: RasterReencoder::new(&commands.pdftoppm, &commands.img2pdf),
            ocr: OcrMyPdf::new(&commands.ocrmypdf),
            stream: StreamOptimizer,
        }
    }
}

impl Default for ExternalToolbox {
    fn default() -> Self {
        Self::new(&ToolCommands::default())
    }
}

impl Toolbox for ExternalToolbox {
    fn compressor(&self, method: CompressionMethod) -> &dyn Compressor {
        match method {
            CompressionMethod::PostScriptOptimize => &self.ghostscript,
            CompressionMethod::StructuralOptimize => &self.qpdf,
            CompressionMethod::RasterReencode => &self.raster,
            CompressionMethod::OcrOptimize => &self.ocr,
            CompressionMethod::StreamOptimize => &self.stream,
        }
    }
}

/// Run an adapter body and normalize its result.
///
/// Checks the input first, then measures the output the body was supposed
/// to write. Any failure removes whatever was left at the output path.
pub(crate) fn run_adapter<F>(
    request: &CompressionRequest<'_>,
    tool: &str,
    body: F,
) -> CompressionOutcome
where
    F: FnOnce(&CompressionRequest<'_>) -> Result<(), ToolError>,
{
    let result = if request.input_path.is_file() {
        body(request).and_then(|()| measure_output(tool, &request.output_path))
    } else {
        Err(ToolError::MissingInput(request.input_path.to_path_buf()))
    };

    if result.is_err() {
        discard(&request.output_path);
    }

    CompressionOutcome {
        method: request.method,
        result,
    }
}

fn measure_output(tool: &str, output: &Path) -> Result<u64, ToolError> {
    match fs::metadata(output) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(meta.len()),
        _ => Err(ToolError::NoOutput {
            tool: tool.to_string(),
        }),
    }
}

/// Best-effort removal of a partial or rejected output file
pub(crate) fn discard(path: &Path) {
    if path.is_file() {
        if let Err(e) = fs::remove_file(path) {
            log::debug!("Could not remove {}: {}", path.display(), e);
        }
    }
}
