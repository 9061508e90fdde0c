//! Lenient parsing of judge replies.
//!
//! Replies are free text expected to carry a PASS/FAIL marker. Recognized
//! forms, in priority order:
//!
//! 1. a JSON object with a `"result"` field (optionally inside a markdown
//!    code fence, optionally surrounded by prose);
//! 2. a bare keyword on the first line (`PASS`, `FAIL`, `yes`, `no`, ...);
//! 3. a single unambiguous uppercase `PASS` or `FAIL` word anywhere in the
//!    reply.
//!
//! Anything else is an interpretation error — never a defaulted verdict, so
//! a malfunctioning judge cannot masquerade as a legitimate test failure.

use crate::error::JudgeError;
use crate::types::truncate;

/// Verdict marker and reasoning extracted from a raw reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub passed: bool,
    pub reasoning: String,
}

/// Parse a raw model reply into a verdict marker and reasoning.
pub fn parse_reply(reply: &str) -> Result<ParsedReply, JudgeError> {
    let text = strip_code_fences(reply);

    if let Some(value) = extract_json_object(text) {
        if let Some(result) = value.get("result").and_then(|v| v.as_str()) {
            let reasoning = value
                .get("reasoning")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            // The reply committed to the structured shape; an unrecognized
            // result value is an interpretation error, not a fallthrough.
            return match classify(result) {
                Some(passed) => Ok(ParsedReply { passed, reasoning }),
                None => Err(interpretation_error(reply)),
            };
        }
    }

    let mut parts = text.splitn(2, '\n');
    let first_line = parts.next().unwrap_or("").trim();
    let token = first_line.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if let Some(passed) = classify(token) {
        let reasoning = match parts.next().map(str::trim) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => text.to_string(),
        };
        return Ok(ParsedReply { passed, reasoning });
    }

    if let Some(passed) = scan_for_marker(text) {
        return Ok(ParsedReply {
            passed,
            reasoning: text.to_string(),
        });
    }

    Err(interpretation_error(reply))
}

fn interpretation_error(reply: &str) -> JudgeError {
    JudgeError::Interpretation {
        reply: truncate(reply, 200),
    }
}

fn classify(token: &str) -> Option<bool> {
    match token.to_ascii_uppercase().as_str() {
        "PASS" | "PASSED" | "YES" | "TRUE" => Some(true),
        "FAIL" | "FAILED" | "NO" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Return the contents of the first fenced block, or the trimmed text when
/// no fence is present.
fn strip_code_fences(text: &str) -> &str {
    let t = text.trim();
    let Some(start) = t.find("```") else { return t };
    let rest = &t[start + 3..];
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    match rest.find("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Try the whole text as JSON, then the first-`{`-to-last-`}` substring for
/// objects embedded in prose.
fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        if value.is_object() {
            return Some(value);
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end])
        .ok()
        .filter(serde_json::Value::is_object)
}

/// Accept a marker buried in prose only when it is unambiguous: exactly one
/// of `PASS`/`FAIL` appears as a standalone uppercase word.
fn scan_for_marker(text: &str) -> Option<bool> {
    let mut saw_pass = false;
    let mut saw_fail = false;
    for word in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        match word {
            "PASS" | "PASSED" => saw_pass = true,
            "FAIL" | "FAILED" => saw_fail = true,
            _ => {}
        }
    }
    match (saw_pass, saw_fail) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_pass() {
        let parsed =
            parse_reply(r#"{"result": "PASS", "reasoning": "content is a greeting"}"#).unwrap();
        assert!(parsed.passed);
        assert_eq!(parsed.reasoning, "content is a greeting");
    }

    #[test]
    fn test_parse_json_fail() {
        let parsed = parse_reply(r#"{"result": "FAIL", "reasoning": "not met"}"#).unwrap();
        assert!(!parsed.passed);
        assert_eq!(parsed.reasoning, "not met");
    }

    #[test]
    fn test_parse_json_case_insensitive_result() {
        assert!(parse_reply(r#"{"result": "pass", "reasoning": "ok"}"#).unwrap().passed);
        assert!(!parse_reply(r#"{"result": "Fail", "reasoning": "no"}"#).unwrap().passed);
    }

    #[test]
    fn test_parse_json_missing_reasoning_defaults_empty() {
        let parsed = parse_reply(r#"{"result": "PASS"}"#).unwrap();
        assert!(parsed.passed);
        assert_eq!(parsed.reasoning, "");
    }

    #[test]
    fn test_parse_json_in_code_fence() {
        let reply = "```json\n{\"result\": \"PASS\", \"reasoning\": \"fine\"}\n```";
        let parsed = parse_reply(reply).unwrap();
        assert!(parsed.passed);
        assert_eq!(parsed.reasoning, "fine");
    }

    #[test]
    fn test_parse_json_in_untagged_fence() {
        let reply = "```\n{\"result\": \"FAIL\", \"reasoning\": \"nope\"}\n```";
        let parsed = parse_reply(reply).unwrap();
        assert!(!parsed.passed);
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let reply = "Here is my evaluation:\n{\"result\": \"PASS\", \"reasoning\": \"ok\"}\nLet me know if you need more.";
        let parsed = parse_reply(reply).unwrap();
        assert!(parsed.passed);
        assert_eq!(parsed.reasoning, "ok");
    }

    #[test]
    fn test_parse_json_fence_with_prose_before() {
        let reply = "Sure!\n```json\n{\"result\": \"FAIL\", \"reasoning\": \"missing\"}\n```";
        let parsed = parse_reply(reply).unwrap();
        assert!(!parsed.passed);
        assert_eq!(parsed.reasoning, "missing");
    }

    #[test]
    fn test_parse_json_unrecognized_result_is_error() {
        let err = parse_reply(r#"{"result": "MAYBE", "reasoning": "unsure"}"#).unwrap_err();
        assert!(matches!(err, JudgeError::Interpretation { .. }));
    }

    #[test]
    fn test_parse_bare_keyword_first_line() {
        let parsed = parse_reply("PASS\nThe content clearly indicates success.").unwrap();
        assert!(parsed.passed);
        assert_eq!(parsed.reasoning, "The content clearly indicates success.");
    }

    #[test]
    fn test_parse_bare_keyword_variants() {
        assert!(parse_reply("yes").unwrap().passed);
        assert!(parse_reply("True").unwrap().passed);
        assert!(parse_reply("PASSED").unwrap().passed);
        assert!(!parse_reply("no").unwrap().passed);
        assert!(!parse_reply("FALSE").unwrap().passed);
        assert!(!parse_reply("Failed.").unwrap().passed);
    }

    #[test]
    fn test_parse_keyword_with_surrounding_whitespace() {
        let parsed = parse_reply("   \n  FAIL  \n  too short  ").unwrap();
        assert!(!parsed.passed);
    }

    #[test]
    fn test_parse_marker_in_prose() {
        let parsed = parse_reply("After careful review the verdict is PASS here.").unwrap();
        assert!(parsed.passed);
        assert!(!parsed.reasoning.is_empty());
    }

    #[test]
    fn test_parse_ambiguous_prose_is_error() {
        let err = parse_reply("Could be PASS or FAIL, hard to say.").unwrap_err();
        assert!(matches!(err, JudgeError::Interpretation { .. }));
    }

    #[test]
    fn test_parse_lowercase_prose_marker_not_matched() {
        // A lowercase "pass" mid-sentence is too weak a signal
        let err = parse_reply("I would let this pass under some readings.").unwrap_err();
        assert!(matches!(err, JudgeError::Interpretation { .. }));
    }

    #[test]
    fn test_parse_garbage_is_interpretation_error() {
        let err = parse_reply("@@#$%INVALID").unwrap_err();
        match err {
            JudgeError::Interpretation { reply } => assert!(reply.contains("INVALID")),
            other => panic!("expected interpretation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_reply_is_interpretation_error() {
        assert!(matches!(
            parse_reply("").unwrap_err(),
            JudgeError::Interpretation { .. }
        ));
    }

    #[test]
    fn test_interpretation_error_truncates_long_reply() {
        let long = "x".repeat(1000);
        match parse_reply(&long).unwrap_err() {
            JudgeError::Interpretation { reply } => {
                assert!(reply.chars().count() <= 200);
            }
            other => panic!("expected interpretation error, got {other:?}"),
        }
    }
}
