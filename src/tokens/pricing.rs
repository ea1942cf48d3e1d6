//! Input pricing and context-window share.

use serde::{Deserialize, Serialize};

use crate::types::ModelVersion;

/// Context window the share is reported against.
pub const DEFAULT_CONTEXT_WINDOW: usize = 128_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    pub model: ModelVersion,
    pub input_cost_per_1m: f64,
    pub currency: String,
}

impl ModelPricing {
    pub fn new(model: ModelVersion, input_cost_per_1m: f64) -> Self {
        Self {
            model,
            input_cost_per_1m,
            currency: "USD".into(),
        }
    }
    pub fn gemini_25() -> Self {
        Self::new(ModelVersion::Gemini25, 0.075)
    }
    pub fn gemini_30() -> Self {
        Self::new(ModelVersion::Gemini30, 1.25)
    }
    pub fn for_version(version: ModelVersion) -> Self {
        match version {
            ModelVersion::Gemini25 => Self::gemini_25(),
            ModelVersion::Gemini30 => Self::gemini_30(),
        }
    }
    pub fn calculate_cost(&self, input_tokens: usize) -> CostEstimate {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input_cost_per_1m;
        CostEstimate {
            model: self.model,
            input_tokens,
            input_cost,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub model: ModelVersion,
    pub input_tokens: usize,
    pub input_cost: f64,
    pub currency: String,
}

impl CostEstimate {
    pub fn format(&self) -> String {
        format!("{} {:.6}", self.currency, self.input_cost)
    }
}

/// Percentage of `window` consumed by `total` tokens.
pub fn context_share(total: usize, window: usize) -> f64 {
    if window == 0 {
        return 0.0;
    }
    total as f64 / window as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_per_version() {
        let est = ModelPricing::for_version(ModelVersion::Gemini30).calculate_cost(1_000_000);
        assert!((est.input_cost - 1.25).abs() < 1e-12);
        assert_eq!(est.format(), "USD 1.250000");

        let est = ModelPricing::for_version(ModelVersion::Gemini25).calculate_cost(10_000);
        assert!((est.input_cost - 0.00075).abs() < 1e-12);
        assert_eq!(est.format(), "USD 0.000750");
    }

    #[test]
    fn test_context_share() {
        assert_eq!(context_share(64_000, DEFAULT_CONTEXT_WINDOW), 50.0);
        assert_eq!(context_share(10, 0), 0.0);
    }
}
