use crate::infra::{build_planner_service, parse_choice, read_selection};
use clap::Args;
use pathway_planner::config::AppConfig;
use pathway_planner::error::AppError;
use pathway_planner::telemetry;
use pathway_planner::planning::{
    write_projection_csv, Area, CostReport, DecisionInput, EnglishLevel, FoodMode, PlanChoice,
    PlanSummary, PlannerService, RecommendationRequest, RecommendationResult, RiskTolerance,
    UserSelection,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SelectionArgs {
    /// JSON file describing the full selection; flags below override it
    #[arg(long)]
    pub(crate) selection: Option<PathBuf>,
    /// Plan to price (a, b)
    #[arg(long, value_parser = parse_choice::<PlanChoice>)]
    pub(crate) plan: Option<PlanChoice>,
    /// Residential area (new_territories, kowloon, hong_kong_island)
    #[arg(long, value_parser = parse_choice::<Area>)]
    pub(crate) area: Option<Area>,
    /// Food mode (frugal, normal, comfortable)
    #[arg(long, value_parser = parse_choice::<FoodMode>)]
    pub(crate) food_mode: Option<FoodMode>,
    /// Drop medical insurance from the projection
    #[arg(long)]
    pub(crate) no_insurance: bool,
    /// JSON cost catalog replacing the built-in tables
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

impl SelectionArgs {
    fn resolve(&self) -> Result<UserSelection, AppError> {
        let mut selection = match &self.selection {
            Some(path) => read_selection(path)?,
            None => UserSelection::default(),
        };

        if let Some(plan) = self.plan {
            selection.plan = plan;
        }
        if let Some(area) = self.area {
            selection.area = area;
        }
        if let Some(food_mode) = self.food_mode {
            selection.food_mode = food_mode;
        }
        if self.no_insurance {
            selection.include_insurance = false;
        }

        Ok(selection)
    }
}

#[derive(Args, Debug)]
pub(crate) struct CostArgs {
    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
    /// Print the yearly projection as CSV instead of the summary
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
    /// Annual business profit in RMB
    #[arg(long, default_value_t = 300_000.0)]
    pub(crate) annual_profit: f64,
    /// Monthly household budget in HKD
    #[arg(long, default_value_t = 50_000.0)]
    pub(crate) monthly_budget: f64,
    /// The principal applicant can relocate to Hong Kong
    #[arg(long)]
    pub(crate) principal_can_relocate: bool,
    /// A reliable team can run the business in the principal's absence
    #[arg(long)]
    pub(crate) reliable_delegate: bool,
    /// English level of the study applicant (basic, intermediate, advanced)
    #[arg(long, value_parser = parse_choice::<EnglishLevel>, default_value = "intermediate")]
    pub(crate) english_level: EnglishLevel,
    /// Risk tolerance (low, medium, high)
    #[arg(long, value_parser = parse_choice::<RiskTolerance>, default_value = "medium")]
    pub(crate) risk_tolerance: RiskTolerance,
}

impl RecommendArgs {
    fn decision_input(&self) -> DecisionInput {
        DecisionInput {
            annual_profit: self.annual_profit,
            monthly_budget: self.monthly_budget,
            principal_can_relocate: self.principal_can_relocate,
            has_reliable_delegate: self.reliable_delegate,
            english_level: self.english_level,
            risk_tolerance: self.risk_tolerance,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct PlansArgs {
    /// JSON cost catalog replacing the built-in tables
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Include each plan's milestone timeline
    #[arg(long)]
    pub(crate) timeline: bool,
}

fn planner_service(catalog: Option<PathBuf>) -> Result<PlannerService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    build_planner_service(&config.planner, catalog)
}

pub(crate) fn run_costs(args: CostArgs) -> Result<(), AppError> {
    let selection = args.selection.resolve()?;
    let service = planner_service(args.selection.catalog.clone())?;
    let report = service.cost_report(&selection)?;

    if args.csv {
        write_projection_csv(std::io::stdout().lock(), &report.projection)?;
    } else {
        render_cost_report(&selection, &report);
    }
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let request = RecommendationRequest {
        selection: args.selection.resolve()?,
        input: args.decision_input(),
    };
    let service = planner_service(args.selection.catalog.clone())?;
    let result = service.recommend(&request)?;
    render_recommendation(&result);
    Ok(())
}

pub(crate) fn run_plans(args: PlansArgs) -> Result<(), AppError> {
    let service = planner_service(args.catalog)?;
    render_plans(&service.plan_summaries(), args.timeline);
    Ok(())
}

fn render_cost_report(selection: &UserSelection, report: &CostReport) {
    println!("Cost projection ({})", report.plan);
    println!(
        "Area: {} | food: {:?} | insurance: {}",
        selection.area.label(),
        selection.food_mode,
        if selection.include_insurance { "included" } else { "excluded" }
    );

    let monthly = &report.monthly;
    println!("\nMonthly living costs (HKD)");
    for (label, amount) in [
        ("Housing", monthly.housing),
        ("Food", monthly.food),
        ("Transport", monthly.transport),
        ("Utilities", monthly.utilities),
        ("Education", monthly.education),
        ("Insurance", monthly.insurance),
        ("Miscellaneous", monthly.miscellaneous),
    ] {
        println!("- {label}: {amount:.0}");
    }
    println!("Total: {:.0} (RMB {:.0})", monthly.total, report.rmb.monthly);

    let first = &report.first_year;
    println!("\nFirst year (HKD)");
    println!(
        "- One-time: {:.0} (visa {:.0}, relocation {:.0}, tuition {:.0}, exam {:.0})",
        first.one_time,
        first.breakdown.visa,
        first.breakdown.relocation,
        first.breakdown.tuition,
        first.breakdown.exam
    );
    println!("- Living: {:.0}", first.yearly);
    println!("Total: {:.0} (RMB {:.0})", first.total, report.rmb.first_year);

    println!("\nProjection");
    for year in &report.projection {
        println!("- Year {}: {:.0}", year.year, year.total);
    }
    println!(
        "Seven-year total: {:.0} (RMB {:.0})",
        report.seven_year_total, report.rmb.seven_year_total
    );
}

fn render_recommendation(result: &RecommendationResult) {
    println!(
        "Recommended: {} ({}% confidence; A {} vs B {})",
        result.recommended, result.confidence, result.score_a, result.score_b
    );

    for (heading, items) in [
        ("Reasons", &result.reasons),
        ("Warnings", &result.warnings),
        ("Action items", &result.action_items),
    ] {
        if items.is_empty() {
            println!("\n{heading}: none");
            continue;
        }
        println!("\n{heading}");
        for item in items {
            println!("- {item}");
        }
    }
}

fn render_plans(summaries: &[PlanSummary], include_timeline: bool) {
    for summary in summaries {
        let plan = &summary.plan;
        println!(
            "{}: {} ({}) - applicant: {}",
            plan.id, plan.name, plan.local_name, plan.applicant
        );
        println!(
            "Success rate {}% | one-time costs HKD {:.0} | overall risk score {:.1}/10",
            plan.success_rate, summary.one_time_total, summary.overall_risk
        );
        for (dimension, score) in plan.risks.dimensions() {
            println!("  {}: {}", dimension.label(), score);
        }
        println!("  Pros: {}", plan.pros.join("; "));
        println!("  Cons: {}", plan.cons.join("; "));
        if include_timeline {
            for event in &plan.timeline {
                println!("  [{}] {}: {}", event.date, event.title, event.description);
            }
        }
        println!();
    }
}
