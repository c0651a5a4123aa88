#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, SourceDocuments};
use std::fmt;
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use cli::CliConfig;

/// Fully resolved run configuration. Values are used as given: an empty
/// key or URL is forwarded to the service unchanged.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub prd_url: String,
    pub figma_url: String,
    pub model: String,
    pub base_url: String,
    pub output_path: Option<String>,
    pub format: OutputFormat,
    pub clean: bool,
    pub patterns_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            prd_url: String::new(),
            figma_url: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: None,
            format: OutputFormat::Text,
            clean: false,
            patterns_path: None,
        }
    }
}

// API key 不可出現在日誌中
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("prd_url", &self.prd_url)
            .field("figma_url", &self.figma_url)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("output_path", &self.output_path)
            .field("format", &self.format)
            .field("clean", &self.clean)
            .field("patterns_path", &self.patterns_path)
            .finish()
    }
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_key: config.gemini.api_key.unwrap_or(defaults.api_key),
            prd_url: config.sources.prd_url.unwrap_or(defaults.prd_url),
            figma_url: config.sources.figma_url.unwrap_or(defaults.figma_url),
            model: config.gemini.model.unwrap_or(defaults.model),
            base_url: config.gemini.base_url.unwrap_or(defaults.base_url),
            output_path: config.output.path,
            format: config.output.format.unwrap_or(defaults.format),
            clean: config.output.clean.unwrap_or(defaults.clean),
            patterns_path: config.prompt.patterns_file,
        }
    }

    /// 命令列（含環境變數）優先於 TOML 檔案
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_toml(TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };

        if let Some(api_key) = &cli.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(prd_url) = &cli.prd_url {
            settings.prd_url = prd_url.clone();
        }
        if let Some(figma_url) = &cli.figma_url {
            settings.figma_url = figma_url.clone();
        }
        if let Some(model) = &cli.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &cli.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(output) = &cli.output {
            settings.output_path = Some(output.clone());
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        if cli.clean {
            settings.clean = true;
        }
        if let Some(patterns) = &cli.patterns {
            settings.patterns_path = Some(patterns.clone());
        }

        Ok(settings)
    }

    pub fn sources(&self) -> SourceDocuments {
        SourceDocuments::new(self.prd_url(), self.figma_url())
    }
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn prd_url(&self) -> &str {
        &self.prd_url
    }

    fn figma_url(&self) -> &str {
        &self.figma_url
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn clean_output(&self) -> bool {
        self.clean
    }

    fn patterns_path(&self) -> Option<&Path> {
        self.patterns_path.as_deref()
    }
}
