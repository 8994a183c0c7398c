//! Derived body measurements.

/// Compute body-mass index from imperial measurements.
///
/// `bmi = (weight_lb * 703) / (feet * 12 + inches)^2`, rounded to one decimal
/// place and rendered as a string for the target platform's custom field.
///
/// Returns `None` when any input is missing, empty, or fails numeric parse,
/// or when the total height is not positive. A missing BMI is omitted from
/// the client record entirely, never emitted as zero or null.
pub fn body_mass_index(height_feet: &str, height_inches: &str, weight_lb: &str) -> Option<String> {
    let feet = parse_measure(height_feet)?;
    let inches = parse_measure(height_inches)?;
    let weight = parse_measure(weight_lb)?;

    let total_inches = feet * 12.0 + inches;
    if total_inches <= 0.0 {
        return None;
    }

    let bmi = (weight * 703.0) / (total_inches * total_inches);
    Some(format!("{:.1}", (bmi * 10.0).round() / 10.0))
}

fn parse_measure(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
