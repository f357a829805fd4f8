use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Area, FoodMode, PlanId, PlanningError, SchoolType};

/// Monthly cost band. Only `avg` feeds the projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCost {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub name: String,
    pub description: String,
}

/// Yearly school fees plus a flag for the local diploma exam track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolCost {
    pub tuition: f64,
    pub extras: f64,
    pub name: String,
    pub description: String,
    pub dse_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsurancePremiums {
    pub adult: f64,
    pub child: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherCosts {
    pub transport: RangeCost,
    pub utilities: RangeCost,
    pub miscellaneous: RangeCost,
    pub tutoring_per_session: f64,
    pub extracurricular_per_session: f64,
    /// Annual medical premiums per covered person.
    pub insurance: InsurancePremiums,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneTimeCost {
    pub visa: f64,
    pub relocation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuition: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam: Option<f64>,
}

impl OneTimeCost {
    pub fn total(&self) -> f64 {
        self.visa + self.relocation + self.tuition.unwrap_or(0.0) + self.exam.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Preparation,
    Application,
    Approval,
    Relocation,
    Education,
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub kind: TimelineEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    ApplicationSuccess,
    RenewalStability,
    BusinessImpact,
    FamilyImpact,
    FinancialPressure,
    Flexibility,
}

impl RiskDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicationSuccess => "Application success",
            Self::RenewalStability => "Renewal stability",
            Self::BusinessImpact => "Business impact",
            Self::FamilyImpact => "Family impact",
            Self::FinancialPressure => "Financial pressure",
            Self::Flexibility => "Flexibility",
        }
    }
}

/// Six 1-10 ratings where higher is more favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub application_success: u8,
    pub renewal_stability: u8,
    pub business_impact: u8,
    pub family_impact: u8,
    pub financial_pressure: u8,
    pub flexibility: u8,
}

impl RiskProfile {
    pub fn dimensions(&self) -> [(RiskDimension, u8); 6] {
        [
            (RiskDimension::ApplicationSuccess, self.application_success),
            (RiskDimension::RenewalStability, self.renewal_stability),
            (RiskDimension::BusinessImpact, self.business_impact),
            (RiskDimension::FamilyImpact, self.family_impact),
            (RiskDimension::FinancialPressure, self.financial_pressure),
            (RiskDimension::Flexibility, self.flexibility),
        ]
    }

    /// Mean rating rounded to one decimal.
    pub fn overall(&self) -> f64 {
        let dimensions = self.dimensions();
        let sum: u32 = dimensions.iter().map(|(_, score)| u32::from(*score)).sum();
        let mean = f64::from(sum) / dimensions.len() as f64;
        (mean * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOption {
    pub id: PlanId,
    pub name: String,
    pub local_name: String,
    pub applicant: String,
    pub success_rate: u8,
    pub one_time_cost: OneTimeCost,
    pub timeline: Vec<TimelineEvent>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub risks: RiskProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub local_name: String,
    pub program: String,
    pub tuition: f64,
    pub duration: String,
    pub requirements: Vec<String>,
    pub features: Vec<String>,
    pub recommended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub hkd_to_rmb: f64,
    pub last_update: NaiveDate,
}

impl ExchangeRate {
    /// Whole-yuan equivalent of an HKD amount.
    pub fn to_rmb(&self, hkd: f64) -> f64 {
        (hkd * self.hkd_to_rmb).round()
    }

    pub fn to_hkd(&self, rmb: f64) -> f64 {
        rmb / self.hkd_to_rmb
    }
}

/// Read-only lookup tables every projection and recommendation reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCatalog {
    pub housing: BTreeMap<Area, RangeCost>,
    pub food: BTreeMap<FoodMode, RangeCost>,
    pub schools: BTreeMap<SchoolType, SchoolCost>,
    pub other: OtherCosts,
    pub plans: BTreeMap<PlanId, PlanOption>,
    #[serde(default)]
    pub universities: Vec<University>,
    pub exchange_rate: ExchangeRate,
}

impl CostCatalog {
    pub fn standard() -> Self {
        Self {
            housing: standard_housing(),
            food: standard_food(),
            schools: standard_schools(),
            other: standard_other_costs(),
            plans: BTreeMap::from([
                (PlanId::A, talent_admission_plan()),
                (PlanId::B, study_plan()),
            ]),
            universities: standard_universities(),
            exchange_rate: ExchangeRate {
                hkd_to_rmb: 0.92,
                last_update: NaiveDate::from_ymd_opt(2026, 1, 7).unwrap_or_default(),
            },
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PlanningError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PlanningError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn housing(&self, area: Area) -> Result<&RangeCost, PlanningError> {
        self.housing.get(&area).ok_or_else(|| {
            PlanningError::invalid(format!("no housing cost configured for {area:?}"))
        })
    }

    pub fn food(&self, mode: FoodMode) -> Result<&RangeCost, PlanningError> {
        self.food
            .get(&mode)
            .ok_or_else(|| PlanningError::invalid(format!("no food cost configured for {mode:?}")))
    }

    pub fn school(&self, school_type: SchoolType) -> Result<&SchoolCost, PlanningError> {
        self.schools.get(&school_type).ok_or_else(|| {
            PlanningError::invalid(format!("no school cost configured for {school_type:?}"))
        })
    }

    pub fn plan(&self, id: PlanId) -> Result<&PlanOption, PlanningError> {
        self.plans
            .get(&id)
            .ok_or_else(|| PlanningError::invalid(format!("no descriptor configured for {id}")))
    }

    pub fn dse_ready_schools(&self) -> Vec<(SchoolType, &SchoolCost)> {
        self.schools
            .iter()
            .filter(|(_, cost)| cost.dse_ready)
            .map(|(school_type, cost)| (*school_type, cost))
            .collect()
    }
}

impl Default for CostCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn range(min: f64, max: f64, avg: f64, name: &str, description: &str) -> RangeCost {
    RangeCost {
        min,
        max,
        avg,
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn standard_housing() -> BTreeMap<Area, RangeCost> {
    BTreeMap::from([
        (
            Area::NewTerritories,
            range(
                12_000.0,
                18_000.0,
                15_000.0,
                "New Territories",
                "Yuen Long / Tuen Mun / Tin Shui Wai: affordable, longer commutes",
            ),
        ),
        (
            Area::Kowloon,
            range(
                20_000.0,
                30_000.0,
                25_000.0,
                "Kowloon",
                "Kowloon Tong / Whampoa / Ho Man Tin: convenient transport, strong schools",
            ),
        ),
        (
            Area::HongKongIsland,
            range(
                25_000.0,
                40_000.0,
                32_500.0,
                "Hong Kong Island",
                "North Point / Fortress Hill / Tai Koo: convenient living, higher rents",
            ),
        ),
    ])
}

fn standard_food() -> BTreeMap<FoodMode, RangeCost> {
    BTreeMap::from([
        (
            FoodMode::Frugal,
            range(
                8_000.0,
                12_000.0,
                10_000.0,
                "Frugal",
                "Mostly home cooking, occasional meals out",
            ),
        ),
        (
            FoodMode::Normal,
            range(
                12_000.0,
                18_000.0,
                15_000.0,
                "Normal",
                "Mix of home cooking and dining out",
            ),
        ),
        (
            FoodMode::Comfortable,
            range(
                18_000.0,
                25_000.0,
                21_500.0,
                "Comfortable",
                "Frequent dining out, quality first",
            ),
        ),
    ])
}

fn school(tuition: f64, extras: f64, name: &str, description: &str, dse_ready: bool) -> SchoolCost {
    SchoolCost {
        tuition,
        extras,
        name: name.to_string(),
        description: description.to_string(),
        dse_ready,
    }
}

fn standard_schools() -> BTreeMap<SchoolType, SchoolCost> {
    BTreeMap::from([
        (
            SchoolType::Government,
            school(
                0.0,
                2_000.0,
                "Government / aided school",
                "Publicly funded, tuition free, Cantonese instruction, mainstream DSE path",
                true,
            ),
        ),
        (
            SchoolType::DirectEconomy,
            school(
                25_000.0,
                5_000.0,
                "Direct subsidy school (economy)",
                "Partly subsidised, higher quality, moderate fees",
                true,
            ),
        ),
        (
            SchoolType::DirectElite,
            school(
                45_000.0,
                8_000.0,
                "Direct subsidy school (elite)",
                "Interview required, highly competitive",
                true,
            ),
        ),
        (
            SchoolType::International,
            school(
                180_000.0,
                20_000.0,
                "International school",
                "IB / A-Level curriculum, not suited to the DSE route into mainland universities",
                false,
            ),
        ),
    ])
}

fn standard_other_costs() -> OtherCosts {
    OtherCosts {
        transport: range(
            2_000.0,
            3_000.0,
            2_500.0,
            "Transport",
            "Two adults and two children",
        ),
        utilities: range(
            1_500.0,
            2_500.0,
            2_000.0,
            "Utilities",
            "Water, electricity, gas, internet",
        ),
        miscellaneous: range(
            3_000.0,
            5_000.0,
            4_000.0,
            "Miscellaneous",
            "Day-to-day sundries",
        ),
        tutoring_per_session: 400.0,
        extracurricular_per_session: 300.0,
        insurance: InsurancePremiums {
            adult: 4_000.0,
            child: 3_000.0,
        },
    }
}

fn event(
    id: &str,
    date: &str,
    title: &str,
    description: &str,
    kind: TimelineEventKind,
) -> TimelineEvent {
    TimelineEvent {
        id: id.to_string(),
        date: date.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        kind,
    }
}

fn talent_admission_plan() -> PlanOption {
    use TimelineEventKind::*;

    PlanOption {
        id: PlanId::A,
        name: "Talent Admission Scheme".to_string(),
        local_name: "专才计划".to_string(),
        applicant: "Principal applicant (operations director)".to_string(),
        success_rate: 75,
        one_time_cost: OneTimeCost {
            visa: 5_000.0,
            relocation: 30_000.0,
            tuition: None,
            exam: None,
        },
        timeline: vec![
            event(
                "a1",
                "2026 Q1",
                "Prepare application documents",
                "Degrees, employment history and the employment contract",
                Preparation,
            ),
            event(
                "a2",
                "2026 Q1-Q2",
                "Submit talent admission application",
                "File with the Immigration Department and await review",
                Application,
            ),
            event(
                "a3",
                "2026 Q2-Q3",
                "Visa approved",
                "Typically 3-6 months; first visa valid for 2 years",
                Approval,
            ),
            event(
                "a4",
                "Summer 2026",
                "Family relocates",
                "Find a flat, settle in, adapt to the new environment",
                Relocation,
            ),
            event(
                "a5",
                "September 2026",
                "Children start school",
                "Both children enrol in Hong Kong schools",
                Education,
            ),
            event(
                "a6",
                "2028-2029",
                "First renewal",
                "Must evidence a genuine employment relationship; renewed for 3 years",
                Milestone,
            ),
            event(
                "a7",
                "2033",
                "Apply for permanent residency",
                "Eligible after 7 years of continuous residence",
                Milestone,
            ),
        ],
        pros: strings(&[
            "Existing employer relationship through a friend's education company",
            "Twenty years of international business experience to build the role on",
            "Whole family gains Hong Kong status immediately",
            "Business can be managed remotely",
            "Role can be framed as regional procurement director for education furniture",
        ]),
        cons: strings(&[
            "Must genuinely work in Hong Kong on weekdays",
            "Day-to-day business operations must be delegated to the team",
            "Renewal requires proof of a genuine employment relationship",
            "Income may drop in the short term",
            "Employer must cooperate with complete documentation",
        ]),
        risks: RiskProfile {
            application_success: 7,
            renewal_stability: 5,
            business_impact: 4,
            family_impact: 6,
            financial_pressure: 5,
            flexibility: 4,
        },
    }
}

fn study_plan() -> PlanOption {
    use TimelineEventKind::*;

    PlanOption {
        id: PlanId::B,
        name: "Study Immigration".to_string(),
        local_name: "进修移民".to_string(),
        applicant: "Second applicant (English major background)".to_string(),
        success_rate: 95,
        one_time_cost: OneTimeCost {
            visa: 3_000.0,
            relocation: 30_000.0,
            tuition: Some(120_000.0),
            exam: Some(3_000.0),
        },
        timeline: vec![
            event(
                "b1",
                "January-March 2026",
                "IELTS preparation",
                "Prepare for IELTS, targeting 6.0 or above",
                Preparation,
            ),
            event(
                "b2",
                "March-April 2026",
                "Submit applications",
                "Apply to target master's programmes",
                Application,
            ),
            event(
                "b3",
                "May-June 2026",
                "Receive offer",
                "Admission letter issued",
                Approval,
            ),
            event(
                "b4",
                "June-July 2026",
                "Apply for visas",
                "Student visa plus dependant visas",
                Application,
            ),
            event(
                "b5",
                "September 2026",
                "Family relocates",
                "Programme starts and children enrol in Hong Kong schools",
                Relocation,
            ),
            event(
                "b6",
                "September 2027",
                "Graduate with IANG",
                "Graduate and receive a two-year IANG visa",
                Milestone,
            ),
            event(
                "b7",
                "After 2027",
                "Status optimisation",
                "Renew through employment, business or other routes",
                Milestone,
            ),
            event(
                "b8",
                "2033",
                "Apply for permanent residency",
                "Eligible after 7 years of continuous residence",
                Milestone,
            ),
        ],
        pros: strings(&[
            "Highest application success rate (close to 100%)",
            "English major background matches TESOL / linguistics programmes",
            "Principal applicant keeps running the business full time",
            "IANG visa is flexible (work, start a business, or neither)",
            "Second applicant gains a master's degree",
            "Programme starts September 2026, a compact timeline",
        ]),
        cons: strings(&[
            "Full-time study during the first year",
            "Requires IELTS 6.0+ or TOEFL 80+",
            "High first-year tuition (roughly HKD 120-160k)",
            "Dependant cannot work in Hong Kong during the first year",
            "Some adjustment period for returning to study",
        ]),
        risks: RiskProfile {
            application_success: 9,
            renewal_stability: 8,
            business_impact: 8,
            family_impact: 7,
            financial_pressure: 6,
            flexibility: 8,
        },
    }
}

fn standard_universities() -> Vec<University> {
    vec![
        University {
            name: "The Education University of Hong Kong".to_string(),
            local_name: "香港教育大学".to_string(),
            program: "MA in TESOL".to_string(),
            tuition: 120_000.0,
            duration: "1 year full time".to_string(),
            requirements: strings(&[
                "Bachelor's degree",
                "IELTS 6.0 or TOEFL 80",
                "English-related background preferred",
            ]),
            features: strings(&[
                "Leading education faculty in Asia",
                "Practical curriculum",
                "High employment rate",
                "Comparatively low tuition",
            ]),
            recommended: true,
        },
        University {
            name: "Hong Kong Baptist University".to_string(),
            local_name: "香港浸会大学".to_string(),
            program: "MA in Applied Linguistics".to_string(),
            tuition: 150_000.0,
            duration: "1 year full time".to_string(),
            requirements: strings(&[
                "Bachelor's degree",
                "IELTS 6.5 or TOEFL 79",
                "Linguistics / English background",
            ]),
            features: strings(&[
                "Strong linguistics research",
                "Small classes",
                "Attractive campus",
            ]),
            recommended: false,
        },
        University {
            name: "Lingnan University".to_string(),
            local_name: "岭南大学".to_string(),
            program: "MA in Chinese / MA in Education".to_string(),
            tuition: 140_000.0,
            duration: "1 year full time".to_string(),
            requirements: strings(&[
                "Bachelor's degree",
                "IELTS 6.0 or TOEFL 80",
                "Relevant academic background",
            ]),
            features: strings(&[
                "Liberal arts tradition",
                "Favourable staff-student ratio",
                "International atmosphere",
            ]),
            recommended: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_key() {
        let catalog = CostCatalog::standard();
        for area in Area::ordered() {
            catalog.housing(area).expect("housing configured");
        }
        for mode in FoodMode::ordered() {
            catalog.food(mode).expect("food configured");
        }
        for school_type in SchoolType::ordered() {
            catalog.school(school_type).expect("school configured");
        }
        for id in PlanId::ordered() {
            assert_eq!(catalog.plan(id).expect("plan configured").id, id);
        }
    }

    #[test]
    fn one_time_totals_default_missing_fields_to_zero() {
        let catalog = CostCatalog::standard();
        assert_eq!(catalog.plan(PlanId::A).unwrap().one_time_cost.total(), 35_000.0);
        assert_eq!(catalog.plan(PlanId::B).unwrap().one_time_cost.total(), 156_000.0);
    }

    #[test]
    fn overall_risk_is_mean_to_one_decimal() {
        let catalog = CostCatalog::standard();
        assert_eq!(catalog.plan(PlanId::A).unwrap().risks.overall(), 5.2);
        assert_eq!(catalog.plan(PlanId::B).unwrap().risks.overall(), 7.7);
    }

    #[test]
    fn dse_ready_filter_excludes_international() {
        let catalog = CostCatalog::standard();
        let ready: Vec<SchoolType> = catalog
            .dse_ready_schools()
            .into_iter()
            .map(|(school_type, _)| school_type)
            .collect();
        assert_eq!(ready.len(), 3);
        assert!(!ready.contains(&SchoolType::International));
    }

    #[test]
    fn exchange_rate_converts_both_directions() {
        let rate = CostCatalog::standard().exchange_rate;
        assert_eq!(rate.to_rmb(100_000.0), 92_000.0);
        assert!((rate.to_hkd(92_000.0) - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn catalog_loads_from_json_with_enum_keys() {
        let catalog = CostCatalog::standard();
        let json = serde_json::to_string(&catalog).expect("catalog serializes");
        assert!(json.contains("\"hong_kong_island\""));

        let loaded = CostCatalog::from_reader(json.as_bytes()).expect("catalog parses");
        assert_eq!(loaded.housing(Area::HongKongIsland).unwrap().avg, 32_500.0);
        assert_eq!(loaded.plan(PlanId::B).unwrap().timeline.len(), 8);
        assert_eq!(loaded.universities.len(), 3);
    }

    #[test]
    fn missing_entries_are_invalid_arguments() {
        let mut catalog = CostCatalog::standard();
        catalog.housing.remove(&Area::Kowloon);
        let err = catalog.housing(Area::Kowloon).expect_err("kowloon removed");
        assert!(matches!(err, PlanningError::InvalidArgument(_)));
    }

    #[test]
    fn malformed_catalog_reports_parse_error() {
        let err = CostCatalog::from_reader("{\"housing\": 3}".as_bytes()).expect_err("bad json");
        assert!(matches!(err, PlanningError::Parse(_)));
    }
}
