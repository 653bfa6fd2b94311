use crate::config::defaults::OCR_OPTIMIZE_LEVEL;
use crate::model::{CompressionOutcome, CompressionRequest};

use super::{run_adapter, Compressor, ToolInvocation};

/// OCRmyPDF: adds a text layer to scanned pages and optimizes images.
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    program: String,
}

impl OcrMyPdf {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Compressor for OcrMyPdf {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        run_adapter(request, &self.program, |req| {
            ToolInvocation::new(&self.program, "ocrmypdf and tesseract")
                .arg("--optimize")
                .arg(OCR_OPTIMIZE_LEVEL.to_string())
                // Pages that already carry text are left alone
                .args(["--skip-text", "--deskew", "--clean", "--rotate-pages"])
                .arg(req.input_path)
                .arg(&req.output_path)
                .timeout(req.options.timeout)
                .run()
        })
    }
}
