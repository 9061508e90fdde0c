//! Provider routing for `provider/model` identifiers.
//!
//! The judge speaks the OpenAI-compatible chat completions protocol, which
//! most hosted providers (and local ollama) expose. The provider prefix of a
//! model identifier selects the base URL and the conventional credential
//! environment variable; `--llm-api-base` overrides the URL for proxies,
//! gateways, and providers not listed here.

use std::fmt;

use crate::error::JudgeError;

/// A validated `provider/model` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    pub provider: String,
    pub model: String,
}

impl ModelId {
    /// Split and validate a raw model identifier.
    ///
    /// Fails when the string is empty, has no `/` separator, or either side
    /// of the separator is empty. The model part may itself contain slashes
    /// (e.g. `openrouter/meta-llama/llama-3-8b-instruct`).
    pub fn parse(raw: &str) -> Result<Self, JudgeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(JudgeError::Config(
                "model identifier must not be empty".to_string(),
            ));
        }
        let (provider, model) = raw.split_once('/').ok_or_else(|| {
            JudgeError::Config(format!(
                "model identifier {raw:?} has no provider prefix (expected \"provider/model\")"
            ))
        })?;
        if provider.is_empty() || model.is_empty() {
            return Err(JudgeError::Config(format!(
                "model identifier {raw:?} is malformed (expected \"provider/model\")"
            )));
        }
        Ok(ModelId {
            provider: provider.to_lowercase(),
            model: model.to_string(),
        })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Endpoint and credential convention for a known provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderInfo {
    pub api_base: &'static str,
    pub key_env: Option<&'static str>,
}

/// Look up a known provider by its (lowercased) prefix.
pub fn lookup(provider: &str) -> Option<ProviderInfo> {
    let info = match provider {
        "openai" => ProviderInfo {
            api_base: "https://api.openai.com/v1",
            key_env: Some("OPENAI_API_KEY"),
        },
        "openrouter" => ProviderInfo {
            api_base: "https://openrouter.ai/api/v1",
            key_env: Some("OPENROUTER_API_KEY"),
        },
        "groq" => ProviderInfo {
            api_base: "https://api.groq.com/openai/v1",
            key_env: Some("GROQ_API_KEY"),
        },
        "mistral" => ProviderInfo {
            api_base: "https://api.mistral.ai/v1",
            key_env: Some("MISTRAL_API_KEY"),
        },
        "deepseek" => ProviderInfo {
            api_base: "https://api.deepseek.com/v1",
            key_env: Some("DEEPSEEK_API_KEY"),
        },
        "together" => ProviderInfo {
            api_base: "https://api.together.xyz/v1",
            key_env: Some("TOGETHER_API_KEY"),
        },
        "xai" => ProviderInfo {
            api_base: "https://api.x.ai/v1",
            key_env: Some("XAI_API_KEY"),
        },
        // Local ollama needs no credential
        "ollama" => ProviderInfo {
            api_base: "http://localhost:11434/v1",
            key_env: None,
        },
        _ => return None,
    };
    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_model_id() {
        let id = ModelId::parse("openai/gpt-4o-mini").unwrap();
        assert_eq!(id.provider, "openai");
        assert_eq!(id.model, "gpt-4o-mini");
        assert_eq!(id.to_string(), "openai/gpt-4o-mini");
    }

    #[test]
    fn test_parse_provider_prefix_is_lowercased() {
        let id = ModelId::parse("OpenAI/gpt-4o").unwrap();
        assert_eq!(id.provider, "openai");
        assert_eq!(id.model, "gpt-4o");
    }

    #[test]
    fn test_parse_nested_model_path() {
        let id = ModelId::parse("openrouter/meta-llama/llama-3-8b-instruct").unwrap();
        assert_eq!(id.provider, "openrouter");
        assert_eq!(id.model, "meta-llama/llama-3-8b-instruct");
    }

    #[test]
    fn test_parse_empty_is_config_error() {
        let err = ModelId::parse("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_parse_missing_prefix_is_config_error() {
        let err = ModelId::parse("gpt-4o-mini").unwrap_err();
        assert!(err.to_string().contains("no provider prefix"));
    }

    #[test]
    fn test_parse_empty_provider_or_model() {
        assert!(ModelId::parse("/gpt-4o").is_err());
        assert!(ModelId::parse("openai/").is_err());
    }

    #[test]
    fn test_lookup_known_providers() {
        let openai = lookup("openai").unwrap();
        assert_eq!(openai.api_base, "https://api.openai.com/v1");
        assert_eq!(openai.key_env, Some("OPENAI_API_KEY"));

        let ollama = lookup("ollama").unwrap();
        assert_eq!(ollama.key_env, None);
    }

    #[test]
    fn test_lookup_unknown_provider() {
        assert!(lookup("acme").is_none());
    }
}
