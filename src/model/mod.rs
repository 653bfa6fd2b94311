pub mod method;
pub mod outcome;
pub mod report;
pub mod request;
pub mod verdict;

pub use method::{CompressionMethod, MethodSelection};
pub use outcome::{CompressionOutcome, MethodFailure};
pub use report::BatchReport;
pub use request::{CompressionOptions, CompressionRequest, ImageResolution};
pub use verdict::{CompressionVerdict, SkipReason};
