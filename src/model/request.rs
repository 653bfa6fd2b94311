use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Quality;
use crate::config::defaults::*;

use super::CompressionMethod;

/// Target image resolutions (dpi) for Ghostscript downsampling
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageResolution {
    pub color: u32,
    pub gray: u32,
    pub mono: u32,
}

impl Default for ImageResolution {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR_IMAGE_RESOLUTION,
            gray: DEFAULT_GRAY_IMAGE_RESOLUTION,
            mono: DEFAULT_MONO_IMAGE_RESOLUTION,
        }
    }
}

/// Per-run tuning passed to every adapter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressionOptions {
    /// Rasterization resolution, only meaningful for raster re-encode
    pub dpi: u32,
    /// Ghostscript preset; `None` selects the tuned downsampling profile
    pub preset: Option<Quality>,
    pub image_resolution: ImageResolution,
    pub timeout: Option<Duration>,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            preset: None,
            image_resolution: ImageResolution::default(),
            timeout: None,
        }
    }
}

/// One adapter invocation
#[derive(Clone, Debug)]
pub struct CompressionRequest<'a> {
    pub input_path: &'a Path,
    pub output_path: PathBuf,
    pub method: CompressionMethod,
    pub options: &'a CompressionOptions,
}

impl<'a> CompressionRequest<'a> {
    pub fn new(
        input_path: &'a Path,
        output_path: impl Into<PathBuf>,
        method: CompressionMethod,
        options: &'a CompressionOptions,
    ) -> Self {
        Self {
            input_path,
            output_path: output_path.into(),
            method,
            options,
        }
    }
}
