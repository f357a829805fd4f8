//! Cost projection and plan recommendation for the two Hong Kong pathways.

pub mod catalog;
pub mod costs;
pub mod domain;
pub mod export;
pub mod recommendation;
pub mod router;
pub mod service;

pub use catalog::{
    CostCatalog, ExchangeRate, OneTimeCost, PlanOption, RiskDimension, RiskProfile, SchoolCost,
    TimelineEvent, TimelineEventKind, University,
};
pub use costs::{
    child_education_cost, first_year_cost, food_cost, housing_cost, insurance_cost, monthly_cost,
    seven_year_cost, yearly_projection, FirstYearBreakdown, MonthlyCostBreakdown, YearlyCost,
};
pub use domain::{
    Area, ChildEducation, DecisionInput, EnglishLevel, FoodMode, PlanChoice, PlanId,
    PlanningError, RiskTolerance, SchoolType, StudyDuration, UserSelection,
};
pub use export::write_projection_csv;
pub use recommendation::{
    generate_recommendation, RecommendationConfig, RecommendationEngine, RecommendationResult,
    RuleId, ScoreComponent,
};
pub use router::planner_router;
pub use service::{CostReport, PlanSummary, PlannerService, RecommendationRequest};
