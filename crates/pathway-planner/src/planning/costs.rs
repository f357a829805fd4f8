//! Monthly, first-year and seven-year living cost projections.
//!
//! Every figure is HKD and derived from the catalog's representative
//! (`avg`) values; min/max bands never feed the arithmetic.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::CostCatalog;
use super::domain::{Area, ChildEducation, FoodMode, PlanningError, UserSelection};

/// Annual living-cost growth applied from year two onward.
pub const LIVING_COST_GROWTH: f64 = 1.03;
pub const PROJECTION_YEARS: u8 = 7;
/// Weekly classes are billed 4 weeks a month for 10 months: 40 sessions per weekly slot.
pub const INSTRUCTIONAL_WEEKS_PER_MONTH: f64 = 4.0;
pub const INSTRUCTIONAL_MONTHS_PER_YEAR: f64 = 10.0;
/// The parent pair is always insured when insurance is selected.
pub const HOUSEHOLD_ADULTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCostBreakdown {
    pub housing: f64,
    pub food: f64,
    pub transport: f64,
    pub utilities: f64,
    pub education: f64,
    pub insurance: f64,
    pub miscellaneous: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneTimeBreakdown {
    pub visa: f64,
    pub relocation: f64,
    pub tuition: f64,
    pub exam: f64,
    pub living: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstYearBreakdown {
    pub one_time: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub total: f64,
    pub breakdown: OneTimeBreakdown,
}

/// One bar of the multi-year projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyCost {
    pub year: u8,
    pub living: f64,
    pub one_time: f64,
    pub total: f64,
}

pub fn housing_cost(catalog: &CostCatalog, area: Area) -> Result<f64, PlanningError> {
    Ok(catalog.housing(area)?.avg)
}

pub fn food_cost(catalog: &CostCatalog, mode: FoodMode) -> Result<f64, PlanningError> {
    Ok(catalog.food(mode)?.avg)
}

/// Annual schooling cost for one child, classes included.
pub fn child_education_cost(
    catalog: &CostCatalog,
    child: &ChildEducation,
) -> Result<f64, PlanningError> {
    let school = catalog.school(child.school_type)?;
    let mut total = school.tuition + school.extras;

    if child.tutoring {
        total += annual_sessions(child.tutoring_sessions) * catalog.other.tutoring_per_session;
    }

    if child.extracurricular {
        total += annual_sessions(child.extracurricular_sessions)
            * catalog.other.extracurricular_per_session;
    }

    Ok(total)
}

fn annual_sessions(per_week: u8) -> f64 {
    f64::from(per_week) * INSTRUCTIONAL_WEEKS_PER_MONTH * INSTRUCTIONAL_MONTHS_PER_YEAR
}

/// Annual medical premiums.
pub fn insurance_cost(catalog: &CostCatalog, adults: u32, children: u32) -> f64 {
    let premiums = catalog.other.insurance;
    f64::from(adults) * premiums.adult + f64::from(children) * premiums.child
}

pub fn monthly_cost(
    catalog: &CostCatalog,
    selection: &UserSelection,
) -> Result<MonthlyCostBreakdown, PlanningError> {
    let housing = housing_cost(catalog, selection.area)?;
    let food = food_cost(catalog, selection.food_mode)?;
    let transport = catalog.other.transport.avg;
    let utilities = catalog.other.utilities.avg;

    let child1 = child_education_cost(catalog, &selection.child1)?;
    let child2 = child_education_cost(catalog, &selection.child2)?;
    let education = (child1 + child2) / 12.0;

    let insurance = if selection.include_insurance {
        insurance_cost(
            catalog,
            HOUSEHOLD_ADULTS,
            u32::from(selection.insurance_count),
        ) / 12.0
    } else {
        0.0
    };

    let miscellaneous = catalog.other.miscellaneous.avg;
    let total = housing + food + transport + utilities + education + insurance + miscellaneous;

    debug!(?selection.area, ?selection.food_mode, total, "monthly cost computed");

    Ok(MonthlyCostBreakdown {
        housing,
        food,
        transport,
        utilities,
        education,
        insurance,
        miscellaneous,
        total,
    })
}

/// Year-one cost: the selected plan's one-time fees plus twelve months of living.
pub fn first_year_cost(
    catalog: &CostCatalog,
    selection: &UserSelection,
) -> Result<FirstYearBreakdown, PlanningError> {
    let plan = catalog.plan(selection.plan.plan_id()?)?;
    let monthly = monthly_cost(catalog, selection)?.total;

    let fees = plan.one_time_cost;
    let one_time = fees.total();
    let yearly = monthly * 12.0;
    let total = one_time + yearly;

    debug!(plan = %plan.id, one_time, yearly, total, "first-year cost computed");

    Ok(FirstYearBreakdown {
        one_time,
        monthly,
        yearly,
        total,
        breakdown: OneTimeBreakdown {
            visa: fees.visa,
            relocation: fees.relocation,
            tuition: fees.tuition.unwrap_or(0.0),
            exam: fees.exam.unwrap_or(0.0),
            living: yearly,
        },
    })
}

/// Per-year totals for the projection horizon. One-time fees land in year one only.
pub fn yearly_projection(
    catalog: &CostCatalog,
    selection: &UserSelection,
) -> Result<Vec<YearlyCost>, PlanningError> {
    let first = first_year_cost(catalog, selection)?;
    let mut years = Vec::with_capacity(usize::from(PROJECTION_YEARS));
    years.push(YearlyCost {
        year: 1,
        living: first.yearly,
        one_time: first.one_time,
        total: first.total,
    });

    let mut living = first.yearly;
    for year in 2..=PROJECTION_YEARS {
        living *= LIVING_COST_GROWTH;
        years.push(YearlyCost {
            year,
            living,
            one_time: 0.0,
            total: living,
        });
    }

    Ok(years)
}

/// Rounded total over the seven-year horizon.
pub fn seven_year_cost(
    catalog: &CostCatalog,
    selection: &UserSelection,
) -> Result<f64, PlanningError> {
    let total: f64 = yearly_projection(catalog, selection)?
        .iter()
        .map(|year| year.total)
        .sum();
    Ok(total.round())
}
