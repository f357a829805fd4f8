use std::io::Write;

use super::costs::YearlyCost;
use super::domain::PlanningError;

/// Writes the projection as CSV with a `year,living,one_time,total` header.
pub fn write_projection_csv<W: Write>(
    writer: W,
    projection: &[YearlyCost],
) -> Result<(), PlanningError> {
    let mut csv = csv::Writer::from_writer(writer);
    for year in projection {
        csv.serialize(year)?;
    }
    csv.flush()?;
    Ok(())
}
