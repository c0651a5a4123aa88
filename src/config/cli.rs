use crate::domain::model::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Default, Parser)]
#[command(name = "gherkin-gen")]
#[command(about = "Generate Gherkin BDD test cases from a PRD and a Figma design with Gemini")]
pub struct CliConfig {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// URL of the product requirements document
    #[arg(long, env = "PRD_URL")]
    pub prd_url: Option<String>,

    /// URL of the Figma design
    #[arg(long, env = "FIGMA_URL")]
    pub figma_url: Option<String>,

    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "GEMINI_BASE_URL")]
    pub base_url: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Strip non-Gherkin text around the generated feature
    #[arg(long)]
    pub clean: bool,

    /// JSON file with learned test patterns
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
