use assert_cmd::{cargo::cargo_bin_cmd, Command};

/// Get a Command for llm-assert
pub fn llm_assert() -> Command {
    cargo_bin_cmd!("llm-assert")
}
