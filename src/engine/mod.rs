//! Arbitration and batch processing

pub mod arbiter;
pub mod batch;
pub mod reporter;

pub use arbiter::{Arbiter, Policy};
pub use batch::{discover_pdfs, BatchDriver};
pub use reporter::{Event, LogReporter, Reporter};
