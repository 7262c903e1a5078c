//! Pull a JSON payload out of free-form LLM output.
//!
//! Models wrap JSON in markdown fences or add chatter around it despite
//! being told not to. Extraction strips the fences, then keeps the widest
//! `[...]` span, else the widest `{...}` span. If neither exists the cleaned
//! text is returned as-is and the caller's JSON parse reports the failure.

use regex_lite::Regex;
use std::sync::LazyLock;

// Greedy: first opening bracket to last closing bracket.
static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));
static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Best-effort JSON substring. Never fails.
pub fn extract_json(raw: &str) -> String {
    let cleaned = strip_code_fences(raw);

    if let Some(m) = ARRAY_RE.find(&cleaned) {
        return m.as_str().to_string();
    }
    if let Some(m) = OBJECT_RE.find(&cleaned) {
        return m.as_str().to_string();
    }

    cleaned
}
