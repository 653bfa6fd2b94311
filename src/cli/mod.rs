pub mod args;

pub use args::{Args, MethodArg, Quality, SkippedPolicy};
