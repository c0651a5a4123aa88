pub mod engine;
pub mod generator;
pub mod postprocess;
pub mod prompt;

pub use crate::domain::model::{GeneratedTestCases, OutputFormat, SourceDocuments};
pub use crate::domain::ports::{ConfigProvider, OutputSink, TextGenerator};
pub use crate::utils::error::Result;
