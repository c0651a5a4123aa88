use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// The external generative-AI service. One call per `generate`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub trait OutputSink: Send + Sync {
    /// Writes the rendered output and returns where it went.
    fn write_output(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn prd_url(&self) -> &str;
    fn figma_url(&self) -> &str;
    fn model(&self) -> &str;
    fn base_url(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn clean_output(&self) -> bool;
    fn patterns_path(&self) -> Option<&Path>;
}
