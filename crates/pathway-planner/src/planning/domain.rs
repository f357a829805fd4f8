use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sessions per week accepted for tutoring and extracurricular classes.
pub const SESSION_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unable to parse JSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to write projection: {0}")]
    Export(#[from] csv::Error),
}

impl PlanningError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }
}

/// The two pathways being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    A,
    B,
}

impl PlanId {
    pub const fn ordered() -> [Self; 2] {
        [Self::A, Self::B]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Plan A",
            Self::B => "Plan B",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlanId {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            other => Err(PlanningError::invalid(format!("unknown plan '{other}'"))),
        }
    }
}

/// Plan chosen in the selection. `Mixed` is a comparison view and has no
/// one-time cost schedule of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChoice {
    A,
    B,
    Mixed,
}

impl PlanChoice {
    pub fn plan_id(self) -> Result<PlanId, PlanningError> {
        match self {
            Self::A => Ok(PlanId::A),
            Self::B => Ok(PlanId::B),
            Self::Mixed => Err(PlanningError::invalid(
                "plan must be 'a' or 'b' to price one-time costs",
            )),
        }
    }
}

impl From<PlanId> for PlanChoice {
    fn from(value: PlanId) -> Self {
        match value {
            PlanId::A => Self::A,
            PlanId::B => Self::B,
        }
    }
}

impl FromStr for PlanChoice {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mixed" => Ok(Self::Mixed),
            other => other.parse::<PlanId>().map(Self::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyDuration {
    OneYear,
    TwoYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    NewTerritories,
    Kowloon,
    HongKongIsland,
}

impl Area {
    pub const fn ordered() -> [Self; 3] {
        [Self::NewTerritories, Self::Kowloon, Self::HongKongIsland]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewTerritories => "New Territories",
            Self::Kowloon => "Kowloon",
            Self::HongKongIsland => "Hong Kong Island",
        }
    }
}

impl FromStr for Area {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "new_territories" => Ok(Self::NewTerritories),
            "kowloon" => Ok(Self::Kowloon),
            "hong_kong_island" => Ok(Self::HongKongIsland),
            other => Err(PlanningError::invalid(format!("unknown area '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodMode {
    Frugal,
    Normal,
    Comfortable,
}

impl FoodMode {
    pub const fn ordered() -> [Self; 3] {
        [Self::Frugal, Self::Normal, Self::Comfortable]
    }
}

impl FromStr for FoodMode {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "frugal" => Ok(Self::Frugal),
            "normal" => Ok(Self::Normal),
            "comfortable" => Ok(Self::Comfortable),
            other => Err(PlanningError::invalid(format!("unknown food mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    Government,
    DirectEconomy,
    DirectElite,
    International,
}

impl SchoolType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Government,
            Self::DirectEconomy,
            Self::DirectElite,
            Self::International,
        ]
    }
}

impl FromStr for SchoolType {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "government" => Ok(Self::Government),
            "direct_economy" => Ok(Self::DirectEconomy),
            "direct_elite" => Ok(Self::DirectElite),
            "international" => Ok(Self::International),
            other => Err(PlanningError::invalid(format!(
                "unknown school type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl FromStr for EnglishLevel {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "basic" => Ok(Self::Basic),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(PlanningError::invalid(format!(
                "unknown english level '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl FromStr for RiskTolerance {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PlanningError::invalid(format!(
                "unknown risk tolerance '{other}'"
            ))),
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Schooling configuration for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEducation {
    pub school_type: SchoolType,
    pub tutoring: bool,
    /// Weekly sessions, only meaningful when `tutoring` is set.
    pub tutoring_sessions: u8,
    pub extracurricular: bool,
    /// Weekly sessions, only meaningful when `extracurricular` is set.
    pub extracurricular_sessions: u8,
}

impl ChildEducation {
    pub fn validate(&self, child: &str) -> Result<(), PlanningError> {
        check_sessions(child, "tutoring", self.tutoring, self.tutoring_sessions)?;
        check_sessions(
            child,
            "extracurricular",
            self.extracurricular,
            self.extracurricular_sessions,
        )
    }
}

fn check_sessions(
    child: &str,
    kind: &str,
    enabled: bool,
    sessions: u8,
) -> Result<(), PlanningError> {
    if enabled && !SESSION_RANGE.contains(&sessions) {
        return Err(PlanningError::invalid(format!(
            "{child} {kind} sessions must be between {} and {} per week (found {sessions})",
            SESSION_RANGE.start(),
            SESSION_RANGE.end()
        )));
    }
    Ok(())
}

impl Default for ChildEducation {
    fn default() -> Self {
        Self {
            school_type: SchoolType::Government,
            tutoring: true,
            tutoring_sessions: 2,
            extracurricular: true,
            extracurricular_sessions: 1,
        }
    }
}

/// Lifestyle scenario priced by the cost projector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    pub plan: PlanChoice,
    pub study_duration: StudyDuration,
    pub area: Area,
    pub food_mode: FoodMode,
    pub child1: ChildEducation,
    pub child2: ChildEducation,
    pub include_insurance: bool,
    /// Number of covered children billed at the child premium.
    pub insurance_count: u8,
}

impl UserSelection {
    /// Input boundary check; the cost functions themselves trust their input.
    pub fn validate(&self) -> Result<(), PlanningError> {
        self.child1.validate("child1")?;
        self.child2.validate("child2")
    }

    /// Same lifestyle priced under another plan.
    pub fn with_plan(&self, plan: PlanId) -> Self {
        Self {
            plan: plan.into(),
            ..*self
        }
    }
}

impl Default for UserSelection {
    fn default() -> Self {
        Self {
            plan: PlanChoice::B,
            study_duration: StudyDuration::OneYear,
            area: Area::Kowloon,
            food_mode: FoodMode::Normal,
            child1: ChildEducation::default(),
            child2: ChildEducation::default(),
            include_insurance: true,
            insurance_count: 4,
        }
    }
}

/// Questionnaire answers feeding the recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionInput {
    /// Annual business profit (RMB).
    pub annual_profit: f64,
    pub monthly_budget: f64,
    pub principal_can_relocate: bool,
    pub has_reliable_delegate: bool,
    pub english_level: EnglishLevel,
    pub risk_tolerance: RiskTolerance,
}

impl DecisionInput {
    pub fn validate(&self) -> Result<(), PlanningError> {
        for (field, value) in [
            ("annual_profit", self.annual_profit),
            ("monthly_budget", self.monthly_budget),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanningError::invalid(format!(
                    "{field} must be a non-negative amount (found {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DecisionInput {
    fn default() -> Self {
        Self {
            annual_profit: 300_000.0,
            monthly_budget: 50_000.0,
            principal_can_relocate: false,
            has_reliable_delegate: false,
            english_level: EnglishLevel::Intermediate,
            risk_tolerance: RiskTolerance::Medium,
        }
    }
}
