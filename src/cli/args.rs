use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::defaults::DEFAULT_DPI;
use crate::model::{CompressionMethod, MethodSelection};

#[derive(Parser, Debug)]
#[command(name = "pdf-shrink")]
#[command(
    author,
    version,
    about = "Shrink PDF files with external optimizers, never keeping a larger result"
)]
pub struct Args {
    /// Input PDF file or directory
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file or directory (defaults to replacing the input in place)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compression method
    #[arg(short = 'm', long, value_enum, default_value = "advanced-gs")]
    pub method: MethodArg,

    /// Image resolution for the img2pdf method
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(36..=1200))]
    pub dpi: u32,

    /// Only report warnings and errors
    #[arg(long)]
    pub silent: bool,

    /// Process a whole directory tree
    #[arg(long)]
    pub batch: bool,

    /// Ghostscript preset first, lopdf if Ghostscript fails (ignores --method)
    #[arg(long)]
    pub legacy: bool,

    /// Ghostscript preset for the legacy mode
    #[arg(short = 'q', long, value_enum, default_value = "printer")]
    pub quality: Quality,

    /// Kill an external tool after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of files compressed concurrently in batch mode
    #[arg(short = 'j', long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// What batch mode writes when compression does not reduce a file
    #[arg(long, value_enum, default_value = "copy")]
    pub on_skip: SkippedPolicy,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Method names accepted by `--method`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Ghostscript with tuned image downsampling
    AdvancedGs,
    /// qpdf linearization and object streams
    Qpdf,
    /// Rasterize pages and rebuild the PDF (text may stop being selectable)
    Img2pdf,
    /// OCRmyPDF, for scanned documents
    Ocrmypdf,
    /// In-process stream recompression
    Lopdf,
    /// Try every method and keep the smallest result
    All,
}

impl MethodArg {
    pub fn selection(&self) -> MethodSelection {
        match self {
            MethodArg::AdvancedGs => MethodSelection::Single(CompressionMethod::PostScriptOptimize),
            MethodArg::Qpdf => MethodSelection::Single(CompressionMethod::StructuralOptimize),
            MethodArg::Img2pdf => MethodSelection::Single(CompressionMethod::RasterReencode),
            MethodArg::Ocrmypdf => MethodSelection::Single(CompressionMethod::OcrOptimize),
            MethodArg::Lopdf => MethodSelection::Single(CompressionMethod::StreamOptimize),
            MethodArg::All => MethodSelection::All,
        }
    }
}

/// Ghostscript `-dPDFSETTINGS` preset
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Quality {
    /// 72 dpi
    Screen,
    /// 150 dpi
    Ebook,
    /// 300 dpi
    #[default]
    Printer,
    /// 300 dpi, colour preserving
    Prepress,
    Default,
}

impl Quality {
    pub fn pdf_setting(&self) -> &'static str {
        match self {
            Quality::Screen => "/screen",
            Quality::Ebook => "/ebook",
            Quality::Printer => "/printer",
            Quality::Prepress => "/prepress",
            Quality::Default => "/default",
        }
    }
}

/// Batch handling of files that compression did not shrink
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum SkippedPolicy {
    /// Copy the original through unchanged
    #[default]
    #[value(name = "copy")]
    CopyOriginal,
    /// Leave no file at the output path
    Omit,
}

impl Args {
    /// Directory input or `--batch` selects batch mode
    pub fn is_batch(&self) -> bool {
        self.batch || self.input.is_dir()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.silent {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
