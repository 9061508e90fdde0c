//! The judge: one LLM call per assertion.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use tracing::debug;

use crate::error::JudgeError;
use crate::parse;
use crate::pricing;
use crate::provider::{self, ModelId};
use crate::types::{LlmResponse, Verdict};

/// Default instruction template. The user turn is a JSON object so the model
/// can never confuse delimiter-looking text inside the content with the
/// criterion itself.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assertion evaluator. \
The user message is a JSON object with two fields: \"content\" (the text under test) \
and \"criterion\" (the question being asked about it). \
Evaluate strictly whether the content satisfies the criterion. \
Do not restate the content.\n\n\
Respond in JSON format:\n\
{\"result\": \"PASS\" or \"FAIL\", \"reasoning\": \"brief explanation\"}";

/// Evaluates text content against natural-language criteria via an LLM.
///
/// Configuration is fixed at construction except for [`system_prompt`],
/// which is a plain mutable field with last-write-wins semantics.
///
/// `evaluate` takes `&mut self`, so a judge supports at most one evaluation
/// in flight; use one judge per concurrent caller.
///
/// [`system_prompt`]: LlmJudge::system_prompt
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), llm_assert::JudgeError> {
/// use llm_assert::LlmJudge;
///
/// let mut judge = LlmJudge::new("openai/gpt-4o-mini")?;
/// let verdict = judge
///     .evaluate("Hello! How can I help you today?", "Is this a friendly greeting?")
///     .await?;
/// assert!(verdict.passed(), "{verdict}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LlmJudge {
    model: ModelId,
    api_key: Option<String>,
    api_base: String,
    params: BTreeMap<String, Value>,
    timeout: Option<Duration>,
    /// Instruction template sent as the system message; later writes apply
    /// to subsequent calls.
    pub system_prompt: String,
    client: reqwest::Client,
    last_response: Option<LlmResponse>,
}

impl LlmJudge {
    /// Build a judge for `model` with default settings.
    pub fn new(model: &str) -> Result<Self, JudgeError> {
        Self::builder(model).build()
    }

    pub fn builder(model: impl Into<String>) -> JudgeBuilder {
        JudgeBuilder {
            model: model.into(),
            api_key: None,
            api_base: None,
            params: BTreeMap::new(),
            timeout: None,
        }
    }

    /// The configured `provider/model` identifier.
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Metadata from the most recent completed call, `None` before any call.
    ///
    /// The snapshot is overwritten on every completed HTTP call, including
    /// calls whose reply then fails to parse.
    pub fn last_response(&self) -> Option<&LlmResponse> {
        self.last_response.as_ref()
    }

    /// Ask the model whether `content` satisfies `criterion`.
    ///
    /// Empty content is valid and evaluated as-is; an empty criterion is a
    /// usage error and makes no outbound call. Exactly one request is sent
    /// per invocation, with no retries and no caching.
    pub async fn evaluate(
        &mut self,
        content: &str,
        criterion: &str,
    ) -> Result<Verdict, JudgeError> {
        if criterion.trim().is_empty() {
            return Err(JudgeError::EmptyCriterion);
        }

        let url = format!("{}/chat/completions", self.api_base);
        let body = self.request_body(content, criterion);

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {key}"));
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        debug!(model = %self.model, %url, "sending judge request");
        let start = Instant::now();
        let response = request.send().await.map_err(|source| JudgeError::Transport {
            model: self.model.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Provider {
                model: self.model.to_string(),
                status,
                body,
            });
        }

        let payload: Value = response.json().await.map_err(|source| JudgeError::Transport {
            model: self.model.to_string(),
            source,
        })?;
        let latency = start.elapsed();

        let reply = payload
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| JudgeError::MalformedCompletion {
                model: self.model.to_string(),
                reason: "no message content in first choice".to_string(),
            })?
            .to_string();

        // Snapshot metadata before parsing, so a reply that fails to parse
        // still reports its token usage and latency.
        self.record_response(&payload, latency);

        let parsed = parse::parse_reply(&reply)?;
        Ok(Verdict::new(parsed.passed, criterion, parsed.reasoning, content))
    }

    fn request_body(&self, content: &str, criterion: &str) -> Value {
        let user_message = json!({
            "content": content,
            "criterion": criterion,
        })
        .to_string();

        let mut body = json!({
            "model": self.model.model,
            "messages": [
                { "role": "system", "content": self.system_prompt },
                { "role": "user", "content": user_message },
            ],
        });
        for (key, value) in &self.params {
            body[key.as_str()] = value.clone();
        }
        body
    }

    fn record_response(&mut self, payload: &Value, latency: Duration) {
        let usage = payload.get("usage");
        let prompt_tokens = usage
            .and_then(|u| u.get("prompt_tokens"))
            .and_then(Value::as_u64);
        let completion_tokens = usage
            .and_then(|u| u.get("completion_tokens"))
            .and_then(Value::as_u64);
        let total_tokens = usage
            .and_then(|u| u.get("total_tokens"))
            .and_then(Value::as_u64);

        let model = payload
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(&self.model.model)
            .to_string();

        let cost = match (prompt_tokens, completion_tokens) {
            (Some(input), Some(output)) => pricing::estimate_cost(&model, input, output),
            _ => None,
        };

        debug!(%model, prompt_tokens, completion_tokens, ?latency, "judge reply received");

        self.last_response = Some(LlmResponse {
            model,
            response_id: payload
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string),
            created: payload.get("created").and_then(Value::as_u64),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            cost,
            latency,
        });
    }
}

/// Builder for [`LlmJudge`]. All validation happens in [`build`].
///
/// [`build`]: JudgeBuilder::build
pub struct JudgeBuilder {
    model: String,
    api_key: Option<String>,
    api_base: Option<String>,
    params: BTreeMap<String, Value>,
    timeout: Option<Duration>,
}

impl JudgeBuilder {
    /// API key for the provider; `${VAR}` references are expanded from the
    /// environment at build time.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Base URL override, e.g. for a proxy or an unlisted provider. Must
    /// include any version path segment (`https://host/v1`).
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Pass-through parameter merged into the outbound request body, e.g.
    /// `temperature` or `max_tokens`. The `timeout` key (seconds) is applied
    /// as the per-request HTTP timeout instead.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration and construct the judge.
    pub fn build(self) -> Result<LlmJudge, JudgeError> {
        let model = ModelId::parse(&self.model)?;
        let known = provider::lookup(&model.provider);

        let api_base = match (&self.api_base, known) {
            (Some(base), _) => base.trim_end_matches('/').to_string(),
            (None, Some(info)) => info.api_base.to_string(),
            (None, None) => {
                return Err(JudgeError::Config(format!(
                    "unknown provider {:?} and no api_base override given",
                    model.provider
                )))
            }
        };

        let api_key = match self.api_key {
            Some(key) => Some(expand_env(&key)),
            None => known
                .and_then(|info| info.key_env)
                .and_then(|var| std::env::var(var).ok()),
        };

        let mut params = self.params;
        let timeout = match params.remove("timeout") {
            Some(value) => {
                let secs = value.as_f64().ok_or_else(|| {
                    JudgeError::Config(format!("timeout parameter must be a number, got {value}"))
                })?;
                Some(Duration::from_secs_f64(secs))
            }
            None => self.timeout,
        };

        Ok(LlmJudge {
            model,
            api_key,
            api_base,
            params,
            timeout,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            client: reqwest::Client::new(),
            last_response: None,
        })
    }
}

/// Expand `${VAR}` references from the environment; unset variables are
/// left literal.
fn expand_env(value: &str) -> String {
    let Ok(pattern) = regex::Regex::new(r"\$\{([^}]+)\}") else {
        return value.to_string();
    };
    pattern
        .replace_all(value, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
