pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::gemini::GeminiClient;
pub use adapters::output::{FileSink, StdoutSink};
pub use config::Settings;
pub use crate::core::{engine::GenerationEngine, generator::GherkinGenerator, prompt::PromptBuilder};
pub use domain::model::{GeneratedTestCases, OutputFormat, SourceDocuments};
pub use utils::error::{GenError, Result};
