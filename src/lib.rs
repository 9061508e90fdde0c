//! llm-assert — natural-language assertions judged by an LLM.
//!
//! Given text content and a plain-language criterion, ask a model whether
//! the content satisfies the criterion and get back a pass/fail [`Verdict`]
//! with reasoning:
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), llm_assert::JudgeError> {
//! use llm_assert::Settings;
//!
//! let mut judge = Settings::from_env().judge()?;
//! let verdict = judge
//!     .evaluate("Operation completed successfully", "Does this indicate success?")
//!     .await?;
//! assert!(verdict.passed(), "{verdict}");
//! # Ok(())
//! # }
//! ```
//!
//! The judge sends exactly one request per evaluation to an OpenAI-compatible
//! chat completions endpoint, selected by the `provider/model` prefix or an
//! explicit base-URL override. A reply with no recognizable PASS/FAIL marker
//! is a [`JudgeError::Interpretation`], never a silently defaulted verdict.

pub mod error;
pub mod judge;
pub mod parse;
pub mod pricing;
pub mod provider;
pub mod settings;
pub mod types;

pub use error::{ExitCode, JudgeError};
pub use judge::{JudgeBuilder, LlmJudge, DEFAULT_SYSTEM_PROMPT};
pub use settings::Settings;
pub use types::{LlmResponse, Verdict};
