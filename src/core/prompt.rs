use crate::domain::model::{FigmaReference, SourceDocuments, TestPattern};
use crate::utils::error::Result;
use std::path::Path;
use url::Url;

pub const SYSTEM_PROMPT: &str = "\
You are a professional QA test automation expert specializing in creating Gherkin-style test cases.

Your task is to analyze the Product Requirements Document (PRD) and UI designs to generate comprehensive BDD test cases.

Please follow these guidelines:
1. Properly create the Feature, Background, and Scenario sections
2. Cover all major user flows described in the requirements
3. Include both positive and negative test scenarios
4. Reference the exact UI element names from the design
5. Clearly specify preconditions, actions, and expected outcomes
6. Include data validation test cases where applicable
7. Consider boundary conditions and error-handling scenarios
8. Use correct Gherkin syntax and indentation
9. Ensure test cases are repeatable
10. Include sufficient verification points
11. Account for various combinations of business logic
12. Be mindful of data dependencies

The output should contain only valid Gherkin syntax, without any explanations or markdown.";

const CLOSING_INSTRUCTION: &str = "\
Generate comprehensive Gherkin test cases for the feature described above.
Include Feature, Background, and multiple Scenarios that cover both happy paths and edge cases.";

pub fn default_patterns() -> Vec<TestPattern> {
    vec![
        TestPattern {
            pattern_type: "validation".to_string(),
            description: "Include explicit validation for user inputs with specific error messages"
                .to_string(),
            examples: vec![
                "Then I should see error message \"Discount must be at least 5%\"".to_string(),
            ],
        },
        TestPattern {
            pattern_type: "ui_interaction".to_string(),
            description: "Specify exact UI element names and locations".to_string(),
            examples: vec![
                "When I tap on the \"Offer to Likers\" button in the listing actions section"
                    .to_string(),
            ],
        },
    ]
}

/// 載入學習到的測試模式；未指定或檔案不存在時使用預設模式
pub fn load_patterns(path: Option<&Path>) -> Result<Vec<TestPattern>> {
    match path {
        Some(path) if path.exists() => {
            tracing::debug!("Loading learned patterns from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let patterns: Vec<TestPattern> = serde_json::from_str(&content)?;
            Ok(patterns)
        }
        Some(path) => {
            tracing::warn!(
                "Pattern file {} not found, using built-in patterns",
                path.display()
            );
            Ok(default_patterns())
        }
        None => Ok(default_patterns()),
    }
}

/// Reads the file key (second path segment) and `node-id` query parameter
/// out of a Figma URL. Anything unparsable yields an empty reference.
pub fn parse_figma_reference(figma_url: &str) -> FigmaReference {
    let Ok(url) = Url::parse(figma_url) else {
        return FigmaReference::default();
    };

    let file_key = url
        .path_segments()
        .and_then(|mut segments| segments.nth(1))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string);

    let node_id = url
        .query_pairs()
        .find(|(key, _)| key == "node-id")
        .map(|(_, value)| value.into_owned());

    FigmaReference { file_key, node_id }
}

/// Page id from a Confluence URL (`.../pages/<id>/...`). Only
/// `atlassian.net` hosts are recognised.
pub fn parse_confluence_page_id(prd_url: &str) -> Option<String> {
    let url = Url::parse(prd_url).ok()?;
    if !url.host_str()?.ends_with("atlassian.net") {
        return None;
    }

    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == "pages")?;
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    patterns: Vec<TestPattern>,
}

impl PromptBuilder {
    pub fn new(patterns: Vec<TestPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[TestPattern] {
        &self.patterns
    }

    pub fn build(&self, sources: &SourceDocuments) -> String {
        let figma = parse_figma_reference(&sources.figma_url);
        let mut sections = vec![SYSTEM_PROMPT.to_string()];

        let mut prd = format!("# PRD DOCUMENT:\nPRD URL: {}", sources.prd_url);
        if let Some(page_id) = parse_confluence_page_id(&sources.prd_url) {
            prd.push_str(&format!("\nConfluence page id: {}", page_id));
        }
        sections.push(prd);

        let mut design = format!("# UI DESIGN:\nFIGMA URL: {}", sources.figma_url);
        if let Some(file_key) = &figma.file_key {
            design.push_str(&format!("\nFigma file key: {}", file_key));
        }
        if let Some(node_id) = &figma.node_id {
            design.push_str(&format!("\nFigma node id: {}", node_id));
        }
        sections.push(design);

        if !self.patterns.is_empty() {
            let mut learned = String::from("# LEARNED TEST PATTERNS:");
            for pattern in &self.patterns {
                learned.push_str(&format!(
                    "\n- [{}] {}",
                    pattern.pattern_type, pattern.description
                ));
                for example in &pattern.examples {
                    learned.push_str(&format!("\n  e.g. {}", example));
                }
            }
            sections.push(learned);
        }

        sections.push(CLOSING_INSTRUCTION.to_string());
        sections.join("\n\n")
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(default_patterns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIGMA: &str =
        "https://www.figma.com/design/QQb1FVxgvmUN79gjavh31u/Offer-to-likers?node-id=1-8&t=abc-1";

    #[test]
    fn test_prompt_contains_both_urls_verbatim() {
        let sources = SourceDocuments::new("https://example.com/prd?x=1&y=2", FIGMA);
        let prompt = PromptBuilder::default().build(&sources);

        assert!(prompt.contains("https://example.com/prd?x=1&y=2"));
        assert!(prompt.contains(FIGMA));
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with(CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_prompt_includes_figma_reference_and_patterns() {
        let sources = SourceDocuments::new("https://example.com/prd", FIGMA);
        let prompt = PromptBuilder::default().build(&sources);

        assert!(prompt.contains("Figma file key: QQb1FVxgvmUN79gjavh31u"));
        assert!(prompt.contains("Figma node id: 1-8"));
        assert!(prompt.contains("[validation]"));
        assert!(prompt.contains("Offer to Likers"));
    }

    #[test]
    fn test_prompt_with_empty_urls_is_still_built() {
        let sources = SourceDocuments::new("", "");
        let prompt = PromptBuilder::new(vec![]).build(&sources);

        assert!(prompt.contains("PRD URL: \n"));
        assert!(prompt.contains("FIGMA URL: \n"));
        assert!(!prompt.contains("LEARNED TEST PATTERNS"));
        assert!(!prompt.contains("Figma file key"));
    }

    #[test]
    fn test_parse_figma_reference() {
        let reference = parse_figma_reference(FIGMA);
        assert_eq!(reference.file_key.as_deref(), Some("QQb1FVxgvmUN79gjavh31u"));
        assert_eq!(reference.node_id.as_deref(), Some("1-8"));

        let no_node = parse_figma_reference("https://www.figma.com/file/KEY123/Name");
        assert_eq!(no_node.file_key.as_deref(), Some("KEY123"));
        assert_eq!(no_node.node_id, None);

        assert_eq!(parse_figma_reference("not a url"), FigmaReference::default());
        assert_eq!(parse_figma_reference("https://www.figma.com/"), FigmaReference::default());
    }

    #[test]
    fn test_parse_confluence_page_id() {
        assert_eq!(
            parse_confluence_page_id(
                "https://acme.atlassian.net/wiki/spaces/UAC/pages/2741403649/PRD+Offer+to+Likers"
            )
            .as_deref(),
            Some("2741403649")
        );
        assert_eq!(parse_confluence_page_id("https://example.com/wiki/pages/12/x"), None);
        assert_eq!(parse_confluence_page_id("https://acme.atlassian.net/wiki/home"), None);
        assert_eq!(parse_confluence_page_id(""), None);
    }

    #[test]
    fn test_prompt_includes_confluence_page_id() {
        let prd = "https://acme.atlassian.net/wiki/spaces/UAC/pages/2741403649/PRD";
        let prompt = PromptBuilder::default().build(&SourceDocuments::new(prd, FIGMA));

        assert!(prompt.contains(&format!("PRD URL: {}\nConfluence page id: 2741403649", prd)));

        let plain = PromptBuilder::default()
            .build(&SourceDocuments::new("https://example.com/prd", FIGMA));
        assert!(!plain.contains("Confluence page id"));
    }

    #[test]
    fn test_load_patterns_defaults() {
        assert_eq!(load_patterns(None).unwrap(), default_patterns());

        let missing = Path::new("/definitely/not/here/learned_patterns.json");
        assert_eq!(load_patterns(Some(missing)).unwrap().len(), 2);
    }

    #[test]
    fn test_load_patterns_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = r#"[
            {"pattern_type": "navigation", "description": "Name the screen after each step"}
        ]"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let patterns = load_patterns(Some(temp_file.path())).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern_type, "navigation");
        assert!(patterns[0].examples.is_empty());
    }

    #[test]
    fn test_load_patterns_rejects_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ not json").unwrap();

        assert!(load_patterns(Some(temp_file.path())).is_err());
    }
}
