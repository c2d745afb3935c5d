//! Helpers for turning free-form model replies into structured values.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Maximum length GitHub accepts for a repository description.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

fn fenced_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)```").expect("valid regex"))
}

fn fence_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("valid regex"))
}

fn option_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]\s*").expect("valid regex"))
}

/// Extract a JSON value from a model reply.
///
/// Accepts plain JSON, a fenced block (with or without a language tag) inside
/// surrounding prose, or as a last resort the outermost `{...}` / `[...]`
/// span. Returns `None` when nothing parses.
pub fn parse_json_response(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(v) = serde_json::from_str(trimmed) {
        return Some(v);
    }

    for caps in fenced_block_re().captures_iter(trimmed) {
        if let Some(body) = caps.get(1) {
            if let Ok(v) = serde_json::from_str(body.as_str().trim()) {
                return Some(v);
            }
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                if let Ok(v) = serde_json::from_str(&trimmed[start..=end]) {
                    return Some(v);
                }
            }
        }
    }

    None
}

/// Remove markdown fence markers (```` ``` ```` with an optional language tag)
/// and trim the result.
pub fn strip_code_fences(text: &str) -> String {
    fence_marker_re().replace_all(text, "").trim().to_string()
}

/// Split a numbered list reply into its options, dropping `1.` / `1)`
/// prefixes and blank lines.
pub fn parse_numbered_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| option_prefix_re().replace(l, "").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// First non-empty line of `text` with quote characters removed.
pub fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .replace(['"', '\''], "")
        .trim()
        .to_string()
}

/// All non-empty lines of `text` joined by single spaces, quotes removed.
pub fn flatten_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['"', '\''], "")
        .trim()
        .to_string()
}

/// Prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Clamp a repository description to [`MAX_DESCRIPTION_CHARS`], ending in
/// `...` when cut.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        format!("{}...", truncate_chars(text, MAX_DESCRIPTION_CHARS - 3))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_json() {
        assert_eq!(parse_json_response(r#"{"key": "value"}"#), Some(json!({"key": "value"})));
        assert_eq!(parse_json_response("[1, 2, 3]"), Some(json!([1, 2, 3])));
    }

    #[test]
    fn parses_fenced_json_with_prose() {
        let text = "Here is the response:\n```json\n{\"key\": \"value\"}\n```\nHope this helps!";
        assert_eq!(parse_json_response(text), Some(json!({"key": "value"})));
    }

    #[test]
    fn parses_fence_without_language() {
        assert_eq!(
            parse_json_response("```\n{\"key\": \"value\"}\n```"),
            Some(json!({"key": "value"}))
        );
    }

    #[test]
    fn falls_back_to_outermost_braces() {
        let text = "Sure! {\"commands\": [\"mkdir src\"]} Let me know.";
        assert_eq!(parse_json_response(text), Some(json!({"commands": ["mkdir src"]})));
    }

    #[test]
    fn invalid_json_is_none() {
        assert_eq!(parse_json_response("Not a json"), None);
        assert_eq!(parse_json_response("} backwards {"), None);
    }

    #[test]
    fn strip_fences_keeps_body() {
        assert_eq!(
            strip_code_fences("```python\nprint('hi')\n```\n"),
            "print('hi')"
        );
        assert_eq!(strip_code_fences("plain"), "plain");
    }

    #[test]
    fn numbered_options_lose_prefixes() {
        let reply = "1. feat(api): add login\n\n2) fix: handle null\n 3.   docs: update readme \n4.\n";
        assert_eq!(
            parse_numbered_options(reply),
            vec!["feat(api): add login", "fix: handle null", "docs: update readme"]
        );
    }

    #[test]
    fn one_line_removes_quotes() {
        assert_eq!(one_line("\n\"feat: add 'x' support\"\nextra"), "feat: add x support");
        assert_eq!(one_line("   "), "");
    }

    #[test]
    fn flatten_lines_keeps_wrapped_text() {
        assert_eq!(
            flatten_lines("\"Automates repository\n  chores with Gemini.\"\n"),
            "Automates repository chores with Gemini."
        );
        assert_eq!(flatten_lines("\n\n"), "");
    }

    #[test]
    fn description_truncation() {
        let short = "Automates repository chores";
        assert_eq!(truncate_description(short), short);

        let long = "a".repeat(250);
        let cut = truncate_description(&long);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with("..."));

        let exact = "b".repeat(200);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
