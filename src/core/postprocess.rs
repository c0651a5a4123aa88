const TRAILING_MARKERS: [&str; 7] = [
    "Note:",
    "Notes:",
    "Comment:",
    "Comments:",
    "Explanation:",
    "#",
    "```",
];

/// Strips model chatter around the Gherkin document: everything before the
/// first `Feature:` and, after the last scenario header, everything from the
/// first trailing marker on.
pub fn clean_gherkin(raw_output: &str) -> String {
    let mut cleaned = raw_output.trim();

    if let Some(feature_index) = cleaned.find("Feature:") {
        cleaned = &cleaned[feature_index..];
    }

    let last_scenario = [
        cleaned.rfind("Scenario:"),
        cleaned.rfind("Scenario Outline:"),
    ]
    .into_iter()
    .flatten()
    .max();

    if let Some(last_scenario) = last_scenario {
        let tail = &cleaned[last_scenario..];
        let end = TRAILING_MARKERS
            .iter()
            .filter_map(|marker| tail.find(marker))
            .min();

        if let Some(end) = end {
            cleaned = cleaned[..last_scenario + end].trim();
        }
    }

    cleaned.to_string()
}
