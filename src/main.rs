//! llm-assert — natural-language assertions judged by an LLM.
//!
//! Shell-facing entry point: evaluates one (content, criterion) pair and
//! maps the verdict to an exit code for use in scripts and CI gates.

mod cli;

use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use llm_assert::error::ExitCode as JudgeExit;
use llm_assert::JudgeError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "llm_assert=debug"
    } else {
        "llm_assert=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: cli::Cli) -> Result<JudgeExit, JudgeError> {
    let content = match cli.content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| JudgeError::Config(format!("failed to read content from stdin: {e}")))?;
            buf
        }
    };

    let mut builder = cli.settings.builder();
    if let Some(temperature) = cli.temperature {
        builder = builder.param("temperature", temperature);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let mut judge = builder.build()?;

    let verdict = judge.evaluate(&content, &cli.criterion).await?;

    if cli.json {
        let report = serde_json::json!({
            "verdict": &verdict,
            "response": judge.last_response(),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => eprintln!("error: failed to render JSON report: {e}"),
        }
    } else {
        println!("{verdict}");
    }

    Ok(if verdict.passed() {
        JudgeExit::Pass
    } else {
        JudgeExit::Fail
    })
}
