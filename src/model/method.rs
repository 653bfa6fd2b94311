use std::fmt;

/// A compression strategy backed by one external tool chain.
///
/// The declaration order is significant: it is the order in which the
/// "all" race runs the variants and the tie-break order when two
/// variants produce outputs of equal size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompressionMethod {
    /// Ghostscript `pdfwrite` rewrite with image downsampling and font subsetting
    PostScriptOptimize,
    /// qpdf linearization followed by object stream regeneration
    StructuralOptimize,
    /// Rasterize every page and reassemble the images into a new PDF
    RasterReencode,
    /// OCRmyPDF text layer plus its own optimizer
    OcrOptimize,
    /// In-process stream recompression with lopdf
    StreamOptimize,
}

impl CompressionMethod {
    pub const ALL: [CompressionMethod; 5] = [
        CompressionMethod::PostScriptOptimize,
        CompressionMethod::StructuralOptimize,
        CompressionMethod::RasterReencode,
        CompressionMethod::OcrOptimize,
        CompressionMethod::StreamOptimize,
    ];

    /// Name used on the command line and in log output
    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::PostScriptOptimize => "advanced-gs",
            CompressionMethod::StructuralOptimize => "qpdf",
            CompressionMethod::RasterReencode => "img2pdf",
            CompressionMethod::OcrOptimize => "ocrmypdf",
            CompressionMethod::StreamOptimize => "lopdf",
        }
    }

    /// External dependencies a user must install for this method
    pub fn required_tools(&self) -> &'static [&'static str] {
        match self {
            CompressionMethod::PostScriptOptimize => &["Ghostscript (gs)"],
            CompressionMethod::StructuralOptimize => &["QPDF"],
            CompressionMethod::RasterReencode => &["pdftoppm (poppler-utils)", "img2pdf"],
            CompressionMethod::OcrOptimize => &["OCRmyPDF", "Tesseract"],
            CompressionMethod::StreamOptimize => &[],
        }
    }

    /// Whether the output may lose selectable text
    pub fn is_lossy_for_text(&self) -> bool {
        matches!(self, CompressionMethod::RasterReencode)
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which methods the explicit policy should run for one file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodSelection {
    Single(CompressionMethod),
    All,
}

impl MethodSelection {
    pub fn methods(&self) -> Vec<CompressionMethod> {
        match self {
            MethodSelection::Single(method) => vec![*method],
            MethodSelection::All => CompressionMethod::ALL.to_vec(),
        }
    }
}

impl fmt::Display for MethodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodSelection::Single(method) => method.fmt(f),
            MethodSelection::All => f.write_str("all"),
        }
    }
}
