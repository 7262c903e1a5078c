//! Prompt text for scenario generation.

use serde_json::Value;

/// Scenario themes the model picks from, one per scenario.
pub const SCENARIO_TYPES: [&str; 10] = [
    "Unexpected expense",
    "Positive financial event",
    "Social obligation",
    "Temptation purchase",
    "Debt or credit situation",
    "Work-related change",
    "Long-term planning",
    "Ethical financial dilemma",
    "Windfall opportunity",
    "Financial mistake recovery",
];

const SCENARIO_SCHEMA: &str = r#"{
  "title": "string",
  "description": "string",
  "options": ["string", "string", "string"],
  "consequences": {
    "0": { "shortTerm": "string", "longTerm": "string" },
    "1": { "shortTerm": "string", "longTerm": "string" },
    "2": { "shortTerm": "string", "longTerm": "string" }
  },
  "learningTip": "string"
}"#;

/// Build the batch request prompt.
///
/// `recent_titles` are listed verbatim, one per line, as scenarios to avoid.
pub fn scenario_batch_prompt(batch_size: usize, recent_titles: &[String], user_profile: &Value) -> String {
    let avoid = if recent_titles.is_empty() {
        "- (none yet)".to_string()
    } else {
        recent_titles
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let themes = SCENARIO_TYPES
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");

    let profile = serde_json::to_string(user_profile).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Generate exactly {batch_size} different personal-finance decision scenarios as a single JSON array.\n\
         Return ONLY the JSON array. DO NOT return markdown, code blocks, or explanations.\n\
         \n\
         AVOID generating ANY scenario similar to these recent ones:\n\
         {avoid}\n\
         \n\
         Give each scenario a distinct title and pick a different type for each from:\n\
         {themes}\n\
         \n\
         Be creative, unpredictable, and vary tone and stakes.\n\
         \n\
         Every element of the array must have EXACTLY this structure, with exactly three options\n\
         and one consequence per option:\n\
         {SCENARIO_SCHEMA}\n\
         \n\
         User profile:\n\
         {profile}\n"
    )
}
