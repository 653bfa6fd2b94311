use crate::config::defaults::QPDF_COMPRESSION_LEVEL;
use crate::model::{CompressionOutcome, CompressionRequest};

use super::{run_adapter, Compressor, ToolInvocation};

const INSTALL_HINT: &str = "qpdf";

/// qpdf exits 3 when it wrote output but issued warnings
const QPDF_SUCCESS_CODES: &[i32] = &[0, 3];

/// Structural optimizer: linearize, then regenerate object streams with
/// maximum flate recompression.
///
/// Linearization goes to a private scratch copy; the input is never touched.
#[derive(Debug, Clone)]
pub struct Qpdf {
    program: String,
}

impl Qpdf {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Compressor for Qpdf {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        run_adapter(request, &self.program, |req| {
            let scratch = tempfile::Builder::new().prefix("pdf-shrink-qpdf-").tempdir()?;
            let linearized = scratch.path().join("linearized.pdf");

            ToolInvocation::new(&self.program, INSTALL_HINT)
                .arg("--linearize")
                .arg(req.input_path)
                .arg(&linearized)
                .success_codes(QPDF_SUCCESS_CODES)
                .timeout(req.options.timeout)
                .run()?;

            ToolInvocation::new(&self.program, INSTALL_HINT)
                .arg(&linearized)
                .arg("--object-streams=generate")
                .arg(format!("--compression-level={}", QPDF_COMPRESSION_LEVEL))
                .arg("--recompress-flate")
                .arg("--decode-level=specialized")
                .arg(&req.output_path)
                .success_codes(QPDF_SUCCESS_CODES)
                .timeout(req.options.timeout)
                .run()
        })
    }
}
