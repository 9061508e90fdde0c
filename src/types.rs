//! Verdict and call metadata types.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// The outcome of one evaluation: a boolean plus the judge's reasoning.
///
/// Truthiness depends only on the parsed PASS/FAIL marker, never on the
/// reasoning text. `Display` renders a test-failure-friendly summary.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    passed: bool,
    pub criterion: String,
    pub reasoning: String,
    pub content_preview: String,
}

impl Verdict {
    pub(crate) fn new(passed: bool, criterion: &str, reasoning: String, content: &str) -> Self {
        Verdict {
            passed,
            criterion: criterion.to_string(),
            reasoning,
            content_preview: truncate(content, 100),
        }
    }

    /// Whether the criterion was judged met.
    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> bool {
        verdict.passed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(
            f,
            "{status}: {:?}\n  Content: {:?}\n  Reasoning: {}",
            self.criterion, self.content_preview, self.reasoning
        )
    }
}

/// Metadata from the most recent completed judge call.
///
/// Token and cost fields are `None` when the provider omits usage data.
#[derive(Debug, Clone, Serialize)]
pub struct LlmResponse {
    /// Model name as reported by the provider
    pub model: String,
    pub response_id: Option<String>,
    pub created: Option<u64>,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    /// Estimated cost in USD, when the model's pricing is known
    pub cost: Option<f64>,
    /// Wall-clock time of the HTTP round trip
    pub latency: Duration,
}

/// Truncate to at most `max_len` characters, appending `...` when cut.
pub(crate) fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}
