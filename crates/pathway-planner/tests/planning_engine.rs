use std::fs;
use std::sync::Arc;

use pathway_planner::planning::{
    first_year_cost, generate_recommendation, housing_cost, monthly_cost, seven_year_cost,
    write_projection_csv, yearly_projection, Area, CostCatalog, DecisionInput, EnglishLevel,
    PlanChoice, PlanId, PlannerService, PlanningError, RecommendationConfig,
    RecommendationRequest, RiskTolerance, UserSelection,
};

fn household() -> UserSelection {
    UserSelection {
        plan: PlanChoice::A,
        area: Area::HongKongIsland,
        ..UserSelection::default()
    }
}

#[test]
fn island_household_costs_follow_the_tables() {
    let catalog = CostCatalog::standard();
    let selection = household();

    assert_eq!(housing_cost(&catalog, Area::HongKongIsland).unwrap(), 32_500.0);

    let monthly = monthly_cost(&catalog, &selection).expect("monthly cost");
    let first = first_year_cost(&catalog, &selection).expect("first-year cost");
    assert_eq!(first.one_time, 35_000.0);
    assert_eq!(first.total, 35_000.0 + monthly.total * 12.0);

    let seven = seven_year_cost(&catalog, &selection).expect("seven-year cost");
    let mut expected = first.total;
    for year in 2..=7 {
        expected += monthly.total * 12.0 * 1.03_f64.powi(year - 1);
    }
    assert_eq!(seven, expected.round());
}

#[test]
fn recommendation_scenarios_match_the_rule_table() {
    let catalog = CostCatalog::standard();

    let stay_home = DecisionInput {
        annual_profit: 300_000.0,
        monthly_budget: 50_000.0,
        principal_can_relocate: false,
        has_reliable_delegate: false,
        english_level: EnglishLevel::Basic,
        risk_tolerance: RiskTolerance::Low,
    };
    let result = generate_recommendation(&catalog, &household(), &stay_home).unwrap();
    assert_eq!(result.recommended, PlanId::B);
    assert_eq!(result.score_a, 0);
    assert_eq!(result.confidence, 100);

    let relocate = DecisionInput {
        annual_profit: 800_000.0,
        monthly_budget: 120_000.0,
        principal_can_relocate: true,
        has_reliable_delegate: true,
        english_level: EnglishLevel::Basic,
        risk_tolerance: RiskTolerance::High,
    };
    let result = generate_recommendation(&catalog, &household(), &relocate).unwrap();
    assert_eq!(result.recommended, PlanId::A);
    assert_eq!((result.score_a, result.score_b), (60, 5));
    assert_eq!(result.confidence, 92);
    assert_eq!(result.action_items.len(), 5);
}

#[test]
fn service_loads_a_swapped_catalog_from_disk() {
    let mut catalog = CostCatalog::standard();
    catalog
        .housing
        .get_mut(&Area::Kowloon)
        .expect("kowloon entry")
        .avg = 28_000.0;

    let path = std::env::temp_dir().join(format!(
        "pathway-planner-catalog-{}.json",
        std::process::id()
    ));
    fs::write(&path, serde_json::to_vec(&catalog).unwrap()).expect("catalog written");
    let loaded = CostCatalog::from_path(&path).expect("catalog loads");
    fs::remove_file(&path).ok();

    let service = PlannerService::new(Arc::new(loaded), RecommendationConfig::default());
    let report = service
        .cost_report(&UserSelection::default())
        .expect("report builds");
    assert_eq!(report.monthly.housing, 28_000.0);
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let err = CostCatalog::from_path("/nonexistent/pathway/catalog.json").expect_err("missing");
    assert!(matches!(err, PlanningError::Io(_)));
}

#[test]
fn service_recommendation_validates_sessions() {
    let service = PlannerService::standard();
    let mut selection = UserSelection::default();
    selection.child2.tutoring_sessions = 0;

    let err = service
        .recommend(&RecommendationRequest {
            selection,
            input: DecisionInput::default(),
        })
        .expect_err("zero sessions rejected");
    assert!(matches!(err, PlanningError::InvalidArgument(_)));
}

#[test]
fn projection_exports_to_csv() {
    let catalog = CostCatalog::standard();
    let projection = yearly_projection(&catalog, &household()).unwrap();

    let mut out = Vec::new();
    write_projection_csv(&mut out, &projection).unwrap();
    let rows = String::from_utf8(out).unwrap();

    assert_eq!(rows.lines().count(), 1 + projection.len());
    assert!(rows.lines().last().unwrap_or_default().starts_with("7,"));
}
