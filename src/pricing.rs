//! Cost estimation for judge calls.
//!
//! Prices are per 1k tokens in USD. Lookup is by longest substring match on
//! the lowercased model name, so versioned names like
//! `gpt-4o-mini-2024-07-18` resolve to their family. Unknown models yield no
//! estimate rather than a guess.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_cost_per_1k_tokens: f64,
    pub output_cost_per_1k_tokens: f64,
}

const PRICING: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.6),
    ("gpt-4o", 2.5, 10.0),
    ("gpt-4-turbo", 10.0, 30.0),
    ("gpt-4", 30.0, 60.0),
    ("gpt-3.5", 0.5, 1.5),
    ("claude-3-5-sonnet", 3.0, 15.0),
    ("claude-3-5-haiku", 0.8, 4.0),
    ("claude-3-opus", 15.0, 75.0),
    ("claude", 3.0, 15.0),
    ("mistral-large", 2.0, 6.0),
    ("mistral-small", 0.1, 0.3),
    ("deepseek-chat", 0.27, 1.1),
    ("deepseek-reasoner", 0.55, 2.19),
    ("grok", 2.0, 10.0),
];

pub fn get_model_pricing(model: &str) -> Option<ModelPricing> {
    let model = model.to_lowercase();
    PRICING
        .iter()
        .filter(|(family, _, _)| model.contains(family))
        .max_by_key(|(family, _, _)| family.len())
        .map(|&(_, input, output)| ModelPricing {
            input_cost_per_1k_tokens: input,
            output_cost_per_1k_tokens: output,
        })
}

/// Estimate the USD cost of one call, or `None` for unknown models.
pub fn estimate_cost(model: &str, prompt_tokens: u64, completion_tokens: u64) -> Option<f64> {
    let pricing = get_model_pricing(model)?;
    Some(
        prompt_tokens as f64 / 1000.0 * pricing.input_cost_per_1k_tokens
            + completion_tokens as f64 / 1000.0 * pricing.output_cost_per_1k_tokens,
    )
}
