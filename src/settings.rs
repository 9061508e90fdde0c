//! Session-wide judge configuration.
//!
//! Settings are read once at session start, from CLI flags or their
//! environment fallbacks, and used to construct per-test judges. Inside
//! `cargo test` there are no custom CLI flags, so [`Settings::from_env`]
//! builds the same settings from the environment alone.

use clap::Parser;

use crate::error::JudgeError;
use crate::judge::{JudgeBuilder, LlmJudge};

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

#[derive(Debug, Clone, Parser)]
pub struct Settings {
    /// Judge model as "provider/model"
    #[arg(long = "llm-model", env = "LLM_ASSERT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Comma-separated models for sweep runs (one judge per model)
    #[arg(long = "llm-models", env = "LLM_ASSERT_MODELS", value_delimiter = ',')]
    pub models: Vec<String>,

    /// API key for the provider; supports ${ENV_VAR} expansion
    #[arg(long = "llm-api-key", env = "LLM_ASSERT_API_KEY")]
    pub api_key: Option<String>,

    /// API base URL override (proxies, gateways, self-hosted endpoints)
    #[arg(long = "llm-api-base", env = "LLM_ASSERT_API_BASE")]
    pub api_base: Option<String>,
}

impl Settings {
    /// Settings from environment variables and defaults only.
    pub fn from_env() -> Self {
        Self::parse_from(std::iter::once("llm-assert"))
    }

    fn configure(&self, model: &str) -> JudgeBuilder {
        let mut builder = LlmJudge::builder(model);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(base) = &self.api_base {
            builder = builder.api_base(base);
        }
        builder
    }

    /// Builder for the default model, with credentials and endpoint applied.
    pub fn builder(&self) -> JudgeBuilder {
        self.configure(&self.model)
    }

    /// A ready-to-use judge for the configured default model.
    pub fn judge(&self) -> Result<LlmJudge, JudgeError> {
        self.builder().build()
    }

    /// One judge per sweep model, falling back to the default model when no
    /// sweep list is configured. The analog of a parameterized fixture for
    /// comparing models within a single test.
    pub fn judges(&self) -> Result<Vec<LlmJudge>, JudgeError> {
        if self.models.is_empty() {
            return Ok(vec![self.judge()?]);
        }
        self.models
            .iter()
            .map(|model| self.configure(model).build())
            .collect()
    }
}
