use crate::core::postprocess::clean_gherkin;
use crate::core::prompt::PromptBuilder;
use crate::domain::model::{GeneratedTestCases, GenerationMetadata, SourceDocuments};
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use chrono::Utc;

pub struct GherkinGenerator<G: TextGenerator> {
    generator: G,
    prompts: PromptBuilder,
    clean: bool,
}

impl<G: TextGenerator> GherkinGenerator<G> {
    pub fn new(generator: G, prompts: PromptBuilder) -> Self {
        Self {
            generator,
            prompts,
            clean: false,
        }
    }

    pub fn with_cleaning(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub async fn generate(&self, sources: &SourceDocuments) -> Result<GeneratedTestCases> {
        let prompt = self.prompts.build(sources);
        tracing::debug!(
            "Built prompt ({} chars) with {} learned patterns",
            prompt.len(),
            self.prompts.patterns().len()
        );

        // 只呼叫一次，失敗直接往上傳，不重試
        tracing::info!("🤖 Requesting test cases from {}", self.generator.model());
        let raw = self.generator.generate(&prompt).await?;
        tracing::debug!("Model returned {} chars", raw.len());

        let test_cases = if self.clean {
            clean_gherkin(&raw)
        } else {
            raw
        };

        Ok(GeneratedTestCases {
            test_cases,
            metadata: GenerationMetadata {
                prd_url: sources.prd_url.clone(),
                figma_url: sources.figma_url.clone(),
                generation_timestamp: Utc::now(),
                model_version: self.generator.model().to_string(),
            },
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::error::GenError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    pub(crate) struct RecordingGenerator {
        pub(crate) prompts: Arc<Mutex<Vec<String>>>,
        response: std::result::Result<String, u16>,
    }

    impl RecordingGenerator {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                prompts: Arc::new(Mutex::new(Vec::new())),
                response: Ok(text.to_string()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                prompts: Arc::new(Mutex::new(Vec::new())),
                response: Err(status),
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn model(&self) -> &str {
            "stub-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GenError::ServiceError {
                    status: *status,
                    body: "stub failure".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_single_call_with_both_urls() {
        let stub = RecordingGenerator::replying("Feature: Login");
        let generator = GherkinGenerator::new(stub.clone(), PromptBuilder::default());
        let sources = SourceDocuments::new("https://example.com/prd", "https://example.com/figma");

        let result = generator.generate(&sources).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("https://example.com/prd"));
        assert!(calls[0].contains("https://example.com/figma"));
        assert_eq!(result.test_cases, "Feature: Login");
        assert_eq!(result.metadata.model_version, "stub-model");
        assert_eq!(result.metadata.prd_url, "https://example.com/prd");
    }

    #[tokio::test]
    async fn test_output_is_not_modified_by_default() {
        let raw = "  Here you go:\n```\nFeature: X\n  Scenario: y\n```\nNote: bye  ";
        let stub = RecordingGenerator::replying(raw);
        let generator = GherkinGenerator::new(stub, PromptBuilder::default());

        let result = generator
            .generate(&SourceDocuments::new("a", "b"))
            .await
            .unwrap();
        assert_eq!(result.test_cases, raw);
    }

    #[tokio::test]
    async fn test_cleaning_is_opt_in() {
        let raw = "Here you go:\nFeature: X\n  Scenario: y\n\nNote: bye";
        let stub = RecordingGenerator::replying(raw);
        let generator = GherkinGenerator::new(stub, PromptBuilder::default()).with_cleaning(true);

        let result = generator
            .generate(&SourceDocuments::new("a", "b"))
            .await
            .unwrap();
        assert_eq!(result.test_cases, "Feature: X\n  Scenario: y");
    }

    #[tokio::test]
    async fn test_empty_values_are_passed_through() {
        let stub = RecordingGenerator::replying("");
        let generator = GherkinGenerator::new(stub.clone(), PromptBuilder::new(vec![]));

        let result = generator.generate(&SourceDocuments::new("", "")).await.unwrap();

        assert_eq!(stub.calls().len(), 1);
        assert_eq!(result.test_cases, "");
        assert_eq!(result.metadata.figma_url, "");
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let stub = RecordingGenerator::failing(503);
        let generator = GherkinGenerator::new(stub.clone(), PromptBuilder::default());

        let err = generator
            .generate(&SourceDocuments::new("a", "b"))
            .await
            .unwrap_err();

        assert!(matches!(err, GenError::ServiceError { status: 503, .. }));
        assert_eq!(stub.calls().len(), 1);
    }
}
