use clap::Parser;

use llm_assert::Settings;

/// Ask an LLM whether content satisfies a plain-language criterion.
///
/// Exits 0 when the criterion is met, 1 when it is not, 2 on usage or
/// configuration errors, and 3 when the judge could not run or its reply
/// could not be interpreted.
#[derive(Parser)]
#[command(name = "llm-assert", author, version, about, long_about = None)]
pub struct Cli {
    /// The criterion to check, e.g. "Does this indicate success?"
    pub criterion: String,

    /// Content to evaluate (read from stdin when omitted)
    #[arg(long)]
    pub content: Option<String>,

    #[command(flatten)]
    pub settings: Settings,

    /// Sampling temperature passed through to the provider
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum seconds to wait for the provider
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Emit the verdict and call metadata as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
