use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{CostCatalog, PlanOption};
use super::costs::{
    first_year_cost, monthly_cost, seven_year_cost, yearly_projection, FirstYearBreakdown,
    MonthlyCostBreakdown, YearlyCost,
};
use super::domain::{DecisionInput, PlanId, PlanningError, UserSelection};
use super::recommendation::{RecommendationConfig, RecommendationEngine, RecommendationResult};

/// Full cost picture for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub plan: PlanId,
    pub monthly: MonthlyCostBreakdown,
    pub first_year: FirstYearBreakdown,
    pub seven_year_total: f64,
    pub projection: Vec<YearlyCost>,
    pub rmb: RmbEquivalents,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RmbEquivalents {
    pub monthly: f64,
    pub first_year: f64,
    pub seven_year_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub selection: UserSelection,
    pub input: DecisionInput,
}

/// Plan descriptor plus the figures the comparison view derives from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    #[serde(flatten)]
    pub plan: PlanOption,
    pub one_time_total: f64,
    pub overall_risk: f64,
}

/// Validates caller input and runs the engines against a shared catalog.
#[derive(Debug, Clone)]
pub struct PlannerService {
    catalog: Arc<CostCatalog>,
    engine: RecommendationEngine,
}

impl PlannerService {
    pub fn new(catalog: Arc<CostCatalog>, config: RecommendationConfig) -> Self {
        info!(
            plans = catalog.plans.len(),
            high_profit_threshold = config.high_profit_threshold,
            "planner service initialised"
        );
        Self {
            catalog,
            engine: RecommendationEngine::new(config),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Arc::new(CostCatalog::standard()),
            RecommendationConfig::default(),
        )
    }

    pub fn catalog(&self) -> &CostCatalog {
        &self.catalog
    }

    pub fn cost_report(&self, selection: &UserSelection) -> Result<CostReport, PlanningError> {
        selection.validate()?;
        let plan = selection.plan.plan_id()?;

        let monthly = monthly_cost(&self.catalog, selection)?;
        let first_year = first_year_cost(&self.catalog, selection)?;
        let seven_year_total = seven_year_cost(&self.catalog, selection)?;
        let projection = yearly_projection(&self.catalog, selection)?;

        let rate = self.catalog.exchange_rate;
        let rmb = RmbEquivalents {
            monthly: rate.to_rmb(monthly.total),
            first_year: rate.to_rmb(first_year.total),
            seven_year_total: rate.to_rmb(seven_year_total),
        };

        Ok(CostReport {
            plan,
            monthly,
            first_year,
            seven_year_total,
            projection,
            rmb,
        })
    }

    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, PlanningError> {
        request.selection.validate()?;
        request.input.validate()?;
        self.engine
            .recommend(&self.catalog, &request.selection, &request.input)
    }

    pub fn plan_summaries(&self) -> Vec<PlanSummary> {
        self.catalog
            .plans
            .values()
            .map(|plan| PlanSummary {
                one_time_total: plan.one_time_cost.total(),
                overall_risk: plan.risks.overall(),
                plan: plan.clone(),
            })
            .collect()
    }
}
