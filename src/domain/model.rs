use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two documents the test cases are generated from. Both are kept as the
/// exact strings the user supplied; they are handed to the model as text and
/// never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocuments {
    pub prd_url: String,
    pub figma_url: String,
}

impl SourceDocuments {
    pub fn new(prd_url: impl Into<String>, figma_url: impl Into<String>) -> Self {
        Self {
            prd_url: prd_url.into(),
            figma_url: figma_url.into(),
        }
    }
}

/// File key and node id extracted from a Figma design URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigmaReference {
    pub file_key: Option<String>,
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPattern {
    pub pattern_type: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub prd_url: String,
    pub figma_url: String,
    pub generation_timestamp: DateTime<Utc>,
    pub model_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTestCases {
    pub test_cases: String,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The generated text exactly as returned by the model
    #[default]
    Text,
    /// A JSON envelope with the test cases and generation metadata
    Json,
}
