use serde::{Deserialize, Serialize};

use super::super::domain::{DecisionInput, EnglishLevel, PlanId, RiskTolerance};
use super::config::RecommendationConfig;
use super::ScoreComponent;

/// Identifies each scoring rule so results can be audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    PrincipalStaysHome,
    PrincipalRelocates,
    ReliableDelegate,
    NoReliableDelegate,
    AdvancedEnglish,
    IntermediateEnglish,
    BasicEnglish,
    LowRiskTolerance,
    HighRiskTolerance,
    BudgetShortfallPlanA,
    BudgetShortfallPlanB,
    HighBusinessProfit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Note {
    Reason(&'static str),
    Warning(&'static str),
    Action(&'static str),
}

/// Inputs a rule predicate may inspect.
pub(crate) struct RuleContext<'a> {
    pub input: &'a DecisionInput,
    pub config: &'a RecommendationConfig,
    pub first_year_a: f64,
    pub first_year_b: f64,
}

impl RuleContext<'_> {
    fn annual_budget(&self) -> f64 {
        self.input.monthly_budget * 12.0
    }
}

pub(crate) struct ScoringRule {
    pub id: RuleId,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub award: Option<(PlanId, u32)>,
    pub notes: &'static [Note],
}

pub(crate) static STANDARD_RULES: [ScoringRule; 12] = [
    ScoringRule {
        id: RuleId::PrincipalStaysHome,
        applies: |ctx| !ctx.input.principal_can_relocate,
        award: Some((PlanId::B, 30)),
        notes: &[Note::Reason(
            "The principal applicant cannot leave for long periods, so Plan B fits better",
        )],
    },
    ScoringRule {
        id: RuleId::PrincipalRelocates,
        applies: |ctx| ctx.input.principal_can_relocate,
        award: Some((PlanId::A, 15)),
        notes: &[],
    },
    ScoringRule {
        id: RuleId::ReliableDelegate,
        applies: |ctx| ctx.input.has_reliable_delegate,
        award: Some((PlanId::A, 20)),
        notes: &[Note::Reason(
            "A reliable team can run the business, which makes Plan A more feasible",
        )],
    },
    ScoringRule {
        id: RuleId::NoReliableDelegate,
        applies: |ctx| !ctx.input.has_reliable_delegate,
        award: Some((PlanId::B, 25)),
        notes: &[Note::Warning(
            "Without a reliable team to run the business, Plan A carries higher risk",
        )],
    },
    ScoringRule {
        id: RuleId::AdvancedEnglish,
        applies: |ctx| ctx.input.english_level == EnglishLevel::Advanced,
        award: Some((PlanId::B, 25)),
        notes: &[Note::Reason(
            "Advanced English raises the chance of a successful study application",
        )],
    },
    ScoringRule {
        id: RuleId::IntermediateEnglish,
        applies: |ctx| ctx.input.english_level == EnglishLevel::Intermediate,
        award: Some((PlanId::B, 15)),
        notes: &[Note::Action(
            "Start IELTS preparation, targeting an overall band of 6.0",
        )],
    },
    ScoringRule {
        id: RuleId::BasicEnglish,
        applies: |ctx| ctx.input.english_level == EnglishLevel::Basic,
        award: Some((PlanId::B, 5)),
        notes: &[
            Note::Warning(
                "English foundation needs strengthening; allow 3-4 months of IELTS preparation",
            ),
            Note::Action("Begin IELTS preparation immediately and consider a training course"),
        ],
    },
    ScoringRule {
        id: RuleId::LowRiskTolerance,
        applies: |ctx| ctx.input.risk_tolerance == RiskTolerance::Low,
        award: Some((PlanId::B, 20)),
        notes: &[Note::Reason(
            "Low risk tolerance favours the more dependable success rate of Plan B",
        )],
    },
    ScoringRule {
        id: RuleId::HighRiskTolerance,
        applies: |ctx| ctx.input.risk_tolerance == RiskTolerance::High,
        award: Some((PlanId::A, 10)),
        notes: &[],
    },
    ScoringRule {
        id: RuleId::BudgetShortfallPlanA,
        applies: |ctx| ctx.annual_budget() < ctx.first_year_a,
        award: Some((PlanId::B, 10)),
        notes: &[Note::Warning(
            "The current budget may not cover Plan A's first-year costs",
        )],
    },
    ScoringRule {
        id: RuleId::BudgetShortfallPlanB,
        applies: |ctx| ctx.annual_budget() < ctx.first_year_b,
        award: None,
        notes: &[Note::Warning(
            "The current budget may not cover Plan B's first-year costs",
        )],
    },
    ScoringRule {
        id: RuleId::HighBusinessProfit,
        applies: |ctx| ctx.input.annual_profit > ctx.config.high_profit_threshold,
        award: Some((PlanId::A, 15)),
        notes: &[Note::Reason(
            "High annual business profit makes protecting business continuity worthwhile",
        )],
    },
];

/// Accumulated scores and messages after every rule has been evaluated.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub score_a: u32,
    pub score_b: u32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub action_items: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

pub(crate) fn score_rules(rules: &[ScoringRule], ctx: &RuleContext<'_>) -> Tally {
    rules
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .fold(Tally::default(), |mut tally, rule| {
            if let Some((plan, points)) = rule.award {
                match plan {
                    PlanId::A => tally.score_a += points,
                    PlanId::B => tally.score_b += points,
                }
            }

            for note in rule.notes {
                match *note {
                    Note::Reason(text) => tally.reasons.push(text.to_string()),
                    Note::Warning(text) => tally.warnings.push(text.to_string()),
                    Note::Action(text) => tally.action_items.push(text.to_string()),
                }
            }

            tally.components.push(ScoreComponent {
                rule: rule.id,
                plan: rule.award.map(|(plan, _)| plan),
                points: rule.award.map(|(_, points)| points).unwrap_or(0),
            });
            tally
        })
}
