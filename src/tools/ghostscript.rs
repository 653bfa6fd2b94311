use std::path::Path;

use crate::cli::Quality;
use crate::model::{CompressionOptions, CompressionOutcome, CompressionRequest, ImageResolution};

use super::{run_adapter, Compressor, ToolInvocation};

const INSTALL_HINT: &str = "ghostscript";

/// Ghostscript `pdfwrite` rewrite.
///
/// With a preset in the options it runs the plain `-dPDFSETTINGS` profile;
/// otherwise it runs the tuned profile with explicit per-channel image
/// downsampling and font subsetting.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    program: String,
}

impl Ghostscript {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn invocation(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressionOptions,
    ) -> ToolInvocation<'_> {
        let base = ToolInvocation::new(&self.program, INSTALL_HINT)
            .arg("-sDEVICE=pdfwrite")
            .timeout(options.timeout);

        let base = match options.preset {
            Some(quality) => preset_args(base, quality),
            None => tuned_args(base, &options.image_resolution),
        };

        base.args(["-dNOPAUSE", "-dQUIET", "-dBATCH"])
            .keyed_arg("-sOutputFile=", output)
            .arg(input)
    }
}

fn preset_args(base: ToolInvocation<'_>, quality: Quality) -> ToolInvocation<'_> {
    base.arg(format!("-dPDFSETTINGS={}", quality.pdf_setting()))
        .arg("-dCompatibilityLevel=1.4")
}

fn tuned_args<'a>(base: ToolInvocation<'a>, resolution: &ImageResolution) -> ToolInvocation<'a> {
    base.args([
        "-dPDFA=2",
        "-dCompatibilityLevel=1.5",
        "-dPDFSETTINGS=/printer",
        "-dDetectDuplicateImages=true",
        "-dCompressFonts=true",
        "-dSubsetFonts=true",
        "-dCompressPages=true",
        "-dEmbedAllFonts=true",
    ])
    // Colour
    .arg("-dDownsampleColorImages=true")
    .arg(format!("-dColorImageResolution={}", resolution.color))
    .arg("-dAutoFilterColorImages=true")
    .arg("-dColorImageFilter=/DCTEncode")
    // Gray
    .arg("-dDownsampleGrayImages=true")
    .arg(format!("-dGrayImageResolution={}", resolution.gray))
    .arg("-dAutoFilterGrayImages=true")
    // Mono
    .arg("-dDownsampleMonoImages=true")
    .arg(format!("-dMonoImageResolution={}", resolution.mono))
}

impl Compressor for Ghostscript {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        run_adapter(request, &self.program, |req| {
            self.invocation(req.input_path, &req.output_path, req.options)
                .run()
        })
    }
}
