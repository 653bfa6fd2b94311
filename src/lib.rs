pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod tools;

pub use cli::{MethodArg, Quality, SkippedPolicy};
pub use config::Settings;
pub use engine::{Arbiter, BatchDriver, LogReporter, Policy, Reporter};
pub use error::{BatchError, CompressError, ToolError};
pub use model::{BatchReport, CompressionMethod, CompressionVerdict, MethodSelection};
pub use tools::{Compressor, ExternalToolbox, Toolbox};

use std::path::Path;

/// Compress one PDF with the external tools described by `settings`.
///
/// This is the recommended entry point for library consumers. Progress is
/// sent to the `log` facade; the caller decides whether a logger is
/// installed.
///
/// # Arguments
///
/// * `input` - PDF file to compress
/// * `output` - Destination path, or `None` to replace `input` in place
/// * `settings` - Method selection, tuning and tool locations
///
/// # Returns
///
/// The arbiter's verdict. The destination is written only when the verdict
/// is `Applied`, in which case the new file is strictly smaller.
///
/// # Example
///
/// ```no_run
/// use pdf_shrink::{compress_file, CompressionVerdict, MethodSelection, Settings};
///
/// let settings = Settings {
///     selection: MethodSelection::All,
///     ..Settings::default()
/// };
///
/// match compress_file("scan.pdf".as_ref(), Some("scan-small.pdf".as_ref()), &settings).unwrap() {
///     CompressionVerdict::Applied { method, ratio, .. } => {
///         println!("{} saved {:.1}%", method, ratio * 100.0)
///     }
///     other => println!("left unchanged: {:?}", other),
/// }
/// ```
pub fn compress_file(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<CompressionVerdict, CompressError> {
    let toolbox = ExternalToolbox::new(&settings.tools);
    let reporter = LogReporter::new();
    let arbiter = Arbiter::new(&toolbox, &reporter);
    arbiter.compress(input, output, settings.policy(), &settings.options())
}

/// Compress every PDF under `input_root` into the mirrored `output_root`.
pub fn compress_directory(
    input_root: &Path,
    output_root: &Path,
    settings: &Settings,
) -> Result<BatchReport, BatchError> {
    let toolbox = ExternalToolbox::new(&settings.tools);
    let reporter = LogReporter::new();
    let arbiter = Arbiter::new(&toolbox, &reporter);
    BatchDriver::new(arbiter)
        .jobs(settings.jobs)
        .skipped_policy(settings.skipped_policy)
        .process_directory(
            input_root,
            Some(output_root),
            settings.policy(),
            &settings.options(),
        )
}
