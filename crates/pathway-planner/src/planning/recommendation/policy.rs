use super::super::domain::PlanId;

/// Confidence reported when neither plan scored.
pub(crate) const NEUTRAL_CONFIDENCE: u8 = 50;

/// Plan B only wins on a strictly higher score.
pub(crate) fn decide(score_a: u32, score_b: u32) -> PlanId {
    if score_b > score_a {
        PlanId::B
    } else {
        PlanId::A
    }
}

pub(crate) fn confidence(score_a: u32, score_b: u32) -> u8 {
    let total = score_a + score_b;
    if total == 0 {
        return NEUTRAL_CONFIDENCE;
    }
    let share = f64::from(score_a.max(score_b)) / f64::from(total) * 100.0;
    share.round() as u8
}

/// Checklist appended after the rule-level action items.
pub(crate) fn closing_actions(plan: PlanId) -> [&'static str; 4] {
    match plan {
        PlanId::B => [
            "By March 2026: sit the IELTS exam",
            "April 2026: submit the Education University of Hong Kong application",
            "May-June 2026: prepare visa documents",
            "July-August 2026: start viewing flats in Hong Kong",
        ],
        PlanId::A => [
            "Confirm the employment offer and role details with the Hong Kong employer",
            "Prepare talent admission documents (degrees, proof of employment)",
            "Draw up a delegation plan for the business team",
            "Start surveying rental districts in Hong Kong",
        ],
    }
}
