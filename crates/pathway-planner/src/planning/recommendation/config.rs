use serde::{Deserialize, Serialize};

/// Tunables for the scoring rules. Weights themselves are fixed by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Annual profit (RMB) above which protecting the business favours Plan A.
    pub high_profit_threshold: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            high_profit_threshold: 500_000.0,
        }
    }
}
