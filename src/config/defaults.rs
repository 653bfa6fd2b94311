/// Default rasterization resolution for img2pdf in dpi
pub const DEFAULT_DPI: u32 = 150;

/// Ghostscript colour image downsampling target in dpi
pub const DEFAULT_COLOR_IMAGE_RESOLUTION: u32 = 150;

/// Ghostscript grayscale image downsampling target in dpi
pub const DEFAULT_GRAY_IMAGE_RESOLUTION: u32 = 150;

/// Ghostscript monochrome image downsampling target in dpi
pub const DEFAULT_MONO_IMAGE_RESOLUTION: u32 = 300;

/// qpdf `--compression-level` (maximum)
pub const QPDF_COMPRESSION_LEVEL: u8 = 9;

/// ocrmypdf `--optimize` level (maximum)
pub const OCR_OPTIMIZE_LEVEL: u8 = 3;

/// Poll interval while waiting on an external tool
pub const PROCESS_POLL_INTERVAL_MS: u64 = 50;

pub const DEFAULT_GS_PROGRAM: &str = "gs";
pub const DEFAULT_QPDF_PROGRAM: &str = "qpdf";
pub const DEFAULT_PDFTOPPM_PROGRAM: &str = "pdftoppm";
pub const DEFAULT_IMG2PDF_PROGRAM: &str = "img2pdf";
pub const DEFAULT_OCRMYPDF_PROGRAM: &str = "ocrmypdf";
