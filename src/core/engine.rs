use crate::core::generator::GherkinGenerator;
use crate::domain::model::{GeneratedTestCases, OutputFormat, SourceDocuments};
use crate::domain::ports::{OutputSink, TextGenerator};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    status: &'static str,
    #[serde(flatten)]
    result: &'a GeneratedTestCases,
}

pub fn render(result: &GeneratedTestCases, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.test_cases.clone()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonEnvelope {
            status: "success",
            result,
        })?),
    }
}

pub struct GenerationEngine<G: TextGenerator, S: OutputSink> {
    generator: GherkinGenerator<G>,
    sink: S,
    format: OutputFormat,
}

impl<G: TextGenerator, S: OutputSink> GenerationEngine<G, S> {
    pub fn new(generator: GherkinGenerator<G>, sink: S) -> Self {
        Self {
            generator,
            sink,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub async fn run(&self, sources: &SourceDocuments) -> Result<String> {
        tracing::info!("📄 PRD: {}", sources.prd_url);
        tracing::info!("🎨 Figma: {}", sources.figma_url);

        let result = self.generator.generate(sources).await?;
        let rendered = render(&result, self.format)?;

        // 生成成功之後才寫出，失敗時不會留下部分輸出
        let location = self.sink.write_output(&rendered).await?;
        tracing::debug!("Wrote {} bytes to {}", rendered.len(), location);

        Ok(location)
    }
}
