//! Error types and exit codes for llm-assert
//!
//! Exit codes:
//! - 0: criterion met
//! - 1: criterion not met (a normal, expected test failure)
//! - 2: usage or configuration error (bad flags, bad model identifier)
//! - 3: judge error (transport failure or uninterpretable reply)

use thiserror::Error;

/// Exit codes for the `llm-assert` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Criterion met (0)
    Pass = 0,
    /// Criterion not met (1)
    Fail = 1,
    /// Usage or configuration error (2)
    Usage = 2,
    /// Judge could not run or could not be interpreted (3)
    Judge = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while configuring or running a judge
#[derive(Error, Debug)]
pub enum JudgeError {
    // Usage/configuration errors (exit code 2)
    #[error("invalid judge configuration: {0}")]
    Config(String),

    #[error("criterion must not be empty")]
    EmptyCriterion,

    // Judge errors (exit code 3)
    #[error("request to {model} failed: {source}")]
    Transport {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned {status} for {model}: {body}")]
    Provider {
        model: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed completion from {model}: {reason}")]
    MalformedCompletion { model: String, reason: String },

    /// The reply carried no recognizable PASS/FAIL marker. Distinct from a
    /// FAIL verdict so a broken judge is never mistaken for a failed test.
    #[error("could not interpret judge reply (no PASS/FAIL marker): {reply:?}")]
    Interpretation { reply: String },
}

impl JudgeError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            JudgeError::Config(_) | JudgeError::EmptyCriterion => ExitCode::Usage,
            JudgeError::Transport { .. }
            | JudgeError::Provider { .. }
            | JudgeError::MalformedCompletion { .. }
            | JudgeError::Interpretation { .. } => ExitCode::Judge,
        }
    }
}
