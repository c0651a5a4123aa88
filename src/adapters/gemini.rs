use crate::core::{ConfigProvider, TextGenerator};
use crate::utils::error::{GenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.api_key(), config.model(), config.base_url())
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// The request is sent as built: an empty key is still sent, and the
    /// service decides whether it is acceptable.
    pub fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        self.client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
    }

    /// 讀取錯誤內容失敗時保留狀態碼，並把讀取錯誤放進 body
    fn service_error(status: u16, body: reqwest::Result<String>) -> GenError {
        let body = body.unwrap_or_else(|e| format!("<failed to read response body: {}>", e));
        GenError::ServiceError { status, body }
    }

    /// 2xx 但內容無法解析時視為服務端錯誤，而非傳輸錯誤
    fn parse_response(body: &str) -> Result<String> {
        let parsed: GenerateContentResponse =
            serde_json::from_str(body).map_err(|e| GenError::MalformedResponse {
                message: format!("response body is not valid JSON: {}", e),
            })?;
        Self::extract_text(parsed)
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .map(|feedback| feedback.to_string())
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(GenError::MalformedResponse { message: reason });
        };

        let parts: Vec<String> = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if parts.is_empty() {
            return Err(GenError::MalformedResponse {
                message: format!(
                    "candidate has no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(parts.concat())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Making API request to: {}", self.endpoint());
        let response = self.request(prompt).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(Self::service_error(status.as_u16(), response.text().await));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }
}
