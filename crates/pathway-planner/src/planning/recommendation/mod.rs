mod config;
mod policy;
mod rules;

pub use config::RecommendationConfig;
pub use rules::RuleId;

use super::catalog::CostCatalog;
use super::costs::first_year_cost;
use super::domain::{DecisionInput, PlanId, PlanningError, UserSelection};
use policy::{closing_actions, confidence, decide};
use rules::{score_rules, RuleContext, STANDARD_RULES};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless engine folding the scoring rules over a questionnaire.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    pub fn recommend(
        &self,
        catalog: &CostCatalog,
        selection: &UserSelection,
        input: &DecisionInput,
    ) -> Result<RecommendationResult, PlanningError> {
        // Budget rules price the same lifestyle under each plan regardless of the selected one.
        let first_year_a = first_year_cost(catalog, &selection.with_plan(PlanId::A))?.total;
        let first_year_b = first_year_cost(catalog, &selection.with_plan(PlanId::B))?.total;

        let ctx = RuleContext {
            input,
            config: &self.config,
            first_year_a,
            first_year_b,
        };
        let mut tally = score_rules(&STANDARD_RULES, &ctx);

        let recommended = decide(tally.score_a, tally.score_b);
        let confidence = confidence(tally.score_a, tally.score_b);
        tally.action_items.extend(
            closing_actions(recommended)
                .iter()
                .map(|item| item.to_string()),
        );

        debug!(
            score_a = tally.score_a,
            score_b = tally.score_b,
            %recommended,
            confidence,
            "recommendation generated"
        );

        Ok(RecommendationResult {
            recommended,
            confidence,
            score_a: tally.score_a,
            score_b: tally.score_b,
            reasons: tally.reasons,
            warnings: tally.warnings,
            action_items: tally.action_items,
            components: tally.components,
        })
    }
}

/// Scores with the default configuration.
pub fn generate_recommendation(
    catalog: &CostCatalog,
    selection: &UserSelection,
    input: &DecisionInput,
) -> Result<RecommendationResult, PlanningError> {
    RecommendationEngine::default().recommend(catalog, selection, input)
}

/// Contribution of one fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: RuleId,
    pub plan: Option<PlanId>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommended: PlanId,
    /// Winning share of the combined score, 0-100.
    pub confidence: u8,
    pub score_a: u32,
    pub score_b: u32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub action_items: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

#[cfg(test)]
mod tests;
