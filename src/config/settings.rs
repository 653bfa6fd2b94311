use std::time::Duration;

use crate::cli::{Args, Quality, SkippedPolicy};
use crate::engine::Policy;
use crate::model::{CompressionMethod, CompressionOptions, ImageResolution, MethodSelection};

use super::defaults::*;

/// Program names for the external tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommands {
    pub ghostscript: String,
    pub qpdf: String,
    pub pdftoppm: String,
    pub img2pdf: String,
    pub ocrmypdf: String,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            ghostscript: DEFAULT_GS_PROGRAM.to_string(),
            qpdf: DEFAULT_QPDF_PROGRAM.to_string(),
            pdftoppm: DEFAULT_PDFTOPPM_PROGRAM.to_string(),
            img2pdf: DEFAULT_IMG2PDF_PROGRAM.to_string(),
            ocrmypdf: DEFAULT_OCRMYPDF_PROGRAM.to_string(),
        }
    }
}

/// Runtime settings for a compression run
#[derive(Debug, Clone)]
pub struct Settings {
    pub selection: MethodSelection,
    /// Ghostscript preset first, lopdf on failure
    pub legacy: bool,

    // Adapter tuning
    pub dpi: u32,
    pub quality: Quality,
    pub image_resolution: ImageResolution,
    pub timeout: Option<Duration>,

    // Batch behaviour
    pub jobs: usize,
    pub skipped_policy: SkippedPolicy,

    pub tools: ToolCommands,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selection: MethodSelection::Single(CompressionMethod::PostScriptOptimize),
            legacy: false,

            dpi: DEFAULT_DPI,
            quality: Quality::default(),
            image_resolution: ImageResolution::default(),
            timeout: None,

            jobs: 1,
            skipped_policy: SkippedPolicy::default(),

            tools: ToolCommands::default(),
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            selection: args.method.selection(),
            legacy: args.legacy,
            dpi: args.dpi,
            quality: args.quality,
            timeout: args.timeout.map(Duration::from_secs),
            jobs: usize::from(args.jobs),
            skipped_policy: args.on_skip,
            ..Default::default()
        }
    }

    /// Options handed to every adapter
    pub fn options(&self) -> CompressionOptions {
        CompressionOptions {
            dpi: self.dpi,
            preset: self.legacy.then_some(self.quality),
            image_resolution: self.image_resolution,
            timeout: self.timeout,
        }
    }

    /// Arbitration policy selected by these settings
    pub fn policy(&self) -> Policy {
        if self.legacy {
            Policy::LegacyFallback
        } else {
            Policy::Explicit(self.selection)
        }
    }
}
