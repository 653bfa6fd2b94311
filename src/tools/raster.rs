use std::fs;
use std::path::PathBuf;

use crate::error::ToolError;
use crate::model::{CompressionOutcome, CompressionRequest};

use super::{run_adapter, Compressor, ToolInvocation};

/// Rasterize pages with pdftoppm, then rebuild the PDF with img2pdf.
///
/// Text in the result is no longer selectable.
#[derive(Debug, Clone)]
pub struct RasterReencoder {
    pdftoppm: String,
    img2pdf: String,
}

impl RasterReencoder {
    pub fn new(pdftoppm: impl Into<String>, img2pdf: impl Into<String>) -> Self {
        Self {
            pdftoppm: pdftoppm.into(),
            img2pdf: img2pdf.into(),
        }
    }
}

impl Compressor for RasterReencoder {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        run_adapter(request, &self.img2pdf, |req| {
            let pages_dir = tempfile::Builder::new().prefix("pdf-shrink-pages-").tempdir()?;

            ToolInvocation::new(&self.pdftoppm, "poppler-utils")
                .arg("-png")
                .arg("-r")
                .arg(req.options.dpi.to_string())
                .arg(req.input_path)
                .arg(pages_dir.path().join("page"))
                .timeout(req.options.timeout)
                .run()?;

            let mut pages: Vec<PathBuf> = fs::read_dir(pages_dir.path())?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
                .collect();
            pages.sort();

            if pages.is_empty() {
                return Err(ToolError::NoOutput {
                    tool: self.pdftoppm.clone(),
                });
            }
            log::debug!(
                "Rasterized {} pages at {} dpi",
                pages.len(),
                req.options.dpi
            );

            ToolInvocation::new(&self.img2pdf, "img2pdf")
                .args(&pages)
                .arg("-o")
                .arg(&req.output_path)
                .timeout(req.options.timeout)
                .run()
        })
    }
}
