use super::*;
use crate::planning::domain::{
    Area, ChildEducation, EnglishLevel, FoodMode, PlanChoice, RiskTolerance, SchoolType,
};

fn frugal_selection() -> UserSelection {
    let child = ChildEducation {
        school_type: SchoolType::Government,
        tutoring: false,
        tutoring_sessions: 1,
        extracurricular: false,
        extracurricular_sessions: 1,
    };
    UserSelection {
        area: Area::NewTerritories,
        food_mode: FoodMode::Frugal,
        child1: child,
        child2: child,
        include_insurance: false,
        ..UserSelection::default()
    }
}

fn stay_home_input() -> DecisionInput {
    DecisionInput {
        annual_profit: 300_000.0,
        monthly_budget: 50_000.0,
        principal_can_relocate: false,
        has_reliable_delegate: false,
        english_level: EnglishLevel::Basic,
        risk_tolerance: RiskTolerance::Low,
    }
}

fn relocating_owner_input() -> DecisionInput {
    DecisionInput {
        annual_profit: 800_000.0,
        monthly_budget: 100_000.0,
        principal_can_relocate: true,
        has_reliable_delegate: true,
        english_level: EnglishLevel::Basic,
        risk_tolerance: RiskTolerance::High,
    }
}

#[test]
fn principal_staying_home_recommends_plan_b_with_full_confidence() {
    let catalog = CostCatalog::standard();
    let result = generate_recommendation(&catalog, &frugal_selection(), &stay_home_input())
        .expect("recommendation builds");

    assert_eq!(result.score_a, 0);
    assert_eq!(result.score_b, 80);
    assert_eq!(result.recommended, PlanId::B);
    assert_eq!(result.confidence, 100);
    assert_eq!(result.reasons.len(), 2);
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn relocating_owner_with_team_recommends_plan_a() {
    let catalog = CostCatalog::standard();
    let result = generate_recommendation(
        &catalog,
        &UserSelection::default(),
        &relocating_owner_input(),
    )
    .expect("recommendation builds");

    assert_eq!(result.score_a, 60);
    assert_eq!(result.score_b, 5);
    assert_eq!(result.recommended, PlanId::A);
    assert_eq!(result.confidence, 92);
    assert_eq!(
        result.action_items.last().map(String::as_str),
        Some("Start surveying rental districts in Hong Kong")
    );
}

#[test]
fn budget_shortfall_adds_warnings_and_favours_plan_b() {
    let catalog = CostCatalog::standard();
    // Default lifestyle costs 729k (A) and 850k (B) in year one, above a 600k budget.
    let result = generate_recommendation(&catalog, &UserSelection::default(), &stay_home_input())
        .expect("recommendation builds");

    assert_eq!(result.score_b, 90);
    assert!(result
        .warnings
        .iter()
        .any(|warning| warning.contains("Plan A's first-year")));
    assert!(result
        .warnings
        .iter()
        .any(|warning| warning.contains("Plan B's first-year")));
    let shortfall_b = result
        .components
        .iter()
        .find(|component| component.rule == RuleId::BudgetShortfallPlanB)
        .expect("plan b shortfall recorded");
    assert_eq!(shortfall_b.points, 0);
    assert_eq!(shortfall_b.plan, None);
}

#[test]
fn budget_rules_ignore_the_selected_plan() {
    let catalog = CostCatalog::standard();
    let input = stay_home_input();
    let for_a = generate_recommendation(
        &catalog,
        &UserSelection {
            plan: PlanChoice::A,
            ..UserSelection::default()
        },
        &input,
    )
    .unwrap();
    let for_mixed = generate_recommendation(
        &catalog,
        &UserSelection {
            plan: PlanChoice::Mixed,
            ..UserSelection::default()
        },
        &input,
    )
    .expect("mixed selections can still be scored");

    assert_eq!(for_a, for_mixed);
}

#[test]
fn tied_scores_resolve_to_plan_a_at_even_confidence() {
    let catalog = CostCatalog::standard();
    let input = DecisionInput {
        annual_profit: 800_000.0,
        monthly_budget: 50_000.0,
        principal_can_relocate: false,
        has_reliable_delegate: true,
        english_level: EnglishLevel::Basic,
        risk_tolerance: RiskTolerance::High,
    };

    let result = generate_recommendation(&catalog, &UserSelection::default(), &input).unwrap();

    assert_eq!(result.score_a, 45);
    assert_eq!(result.score_b, 45);
    assert_eq!(result.recommended, PlanId::A);
    assert_eq!(result.confidence, 50);
}

#[test]
fn messages_follow_rule_order_then_closing_checklist() {
    let catalog = CostCatalog::standard();
    let result =
        generate_recommendation(&catalog, &frugal_selection(), &stay_home_input()).unwrap();

    assert!(result.reasons[0].contains("cannot leave"));
    assert!(result.reasons[1].contains("Low risk tolerance"));
    assert!(result.warnings[0].contains("reliable team"));
    assert!(result.warnings[1].contains("English foundation"));
    assert_eq!(result.action_items.len(), 5);
    assert!(result.action_items[0].contains("IELTS preparation immediately"));
    assert_eq!(result.action_items[1], "By March 2026: sit the IELTS exam");

    let fired: Vec<RuleId> = result.components.iter().map(|component| component.rule).collect();
    assert_eq!(
        fired,
        vec![
            RuleId::PrincipalStaysHome,
            RuleId::NoReliableDelegate,
            RuleId::BasicEnglish,
            RuleId::LowRiskTolerance,
        ]
    );
}

#[test]
fn intermediate_english_only_adds_an_action_item() {
    let catalog = CostCatalog::standard();
    let input = DecisionInput {
        english_level: EnglishLevel::Intermediate,
        risk_tolerance: RiskTolerance::Medium,
        ..stay_home_input()
    };
    let result = generate_recommendation(&catalog, &frugal_selection(), &input).unwrap();

    assert_eq!(result.score_b, 30 + 25 + 15);
    assert!(result.action_items[0].contains("band of 6.0"));
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn profit_threshold_is_configurable() {
    let catalog = CostCatalog::standard();
    let input = DecisionInput {
        annual_profit: 300_000.0,
        ..relocating_owner_input()
    };

    let default_result =
        generate_recommendation(&catalog, &UserSelection::default(), &input).unwrap();
    assert_eq!(default_result.score_a, 45);

    let engine = RecommendationEngine::new(RecommendationConfig {
        high_profit_threshold: 200_000.0,
    });
    let tuned = engine
        .recommend(&catalog, &UserSelection::default(), &input)
        .unwrap();
    assert_eq!(tuned.score_a, 60);
}

#[test]
fn profit_exactly_at_threshold_does_not_score() {
    let catalog = CostCatalog::standard();
    let input = DecisionInput {
        annual_profit: 500_000.0,
        ..relocating_owner_input()
    };
    let result = generate_recommendation(&catalog, &UserSelection::default(), &input).unwrap();
    assert!(!result
        .components
        .iter()
        .any(|component| component.rule == RuleId::HighBusinessProfit));
}

#[test]
fn identical_inputs_produce_identical_results() {
    let catalog = CostCatalog::standard();
    let selection = UserSelection::default();
    let input = DecisionInput::default();

    let first = generate_recommendation(&catalog, &selection, &input).unwrap();
    let second = generate_recommendation(&catalog, &selection, &input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_plan_descriptor_is_reported() {
    let mut catalog = CostCatalog::standard();
    catalog.plans.remove(&PlanId::B);
    let err = generate_recommendation(
        &catalog,
        &UserSelection::default(),
        &DecisionInput::default(),
    )
    .expect_err("plan b missing");
    assert!(matches!(err, PlanningError::InvalidArgument(_)));
}
