use crate::domain::{
    common::entities::app_errors::CoreError,
    units::value_objects::{BodyMetrics, UnitSystem},
};

pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.453592;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Converts a length between centimetres (metric) and inches (imperial).
pub fn convert_length(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => value / CM_PER_INCH,
        (UnitSystem::Imperial, UnitSystem::Metric) => value * CM_PER_INCH,
        _ => value,
    }
}

/// Converts a mass between kilograms (metric) and pounds (imperial).
pub fn convert_mass(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => value / KG_PER_POUND,
        (UnitSystem::Imperial, UnitSystem::Metric) => value * KG_PER_POUND,
        _ => value,
    }
}

/// Splits a total number of inches into whole feet and the remaining inches.
pub fn split_feet_inches(total_inches: f64) -> (u32, f64) {
    let total_inches = total_inches.max(0.0);
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    (feet as u32, total_inches - feet * INCHES_PER_FOOT)
}

pub fn join_feet_inches(feet: u32, inches: f64) -> f64 {
    f64::from(feet) * INCHES_PER_FOOT + inches
}

/// Body mass index rounded to one decimal. Zero when height is not positive.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let meters = height_cm / 100.0;
    (weight_kg / (meters * meters) * 10.0).round() / 10.0
}

/// Parses a user-entered measurement. Empty, non-numeric and non-positive
/// values are rejected.
pub fn parse_measurement(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidMeasurement(format!("{field} must be a number")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::InvalidMeasurement(format!(
            "{field} must be greater than zero"
        )));
    }

    Ok(value)
}

/// Canonical metrics from raw height/weight entered in the given systems.
pub fn to_body_metrics(
    height: &str,
    height_unit: UnitSystem,
    weight: &str,
    weight_unit: UnitSystem,
) -> Result<BodyMetrics, CoreError> {
    let height = parse_measurement("height", height)?;
    let weight = parse_measurement("weight", weight)?;

    Ok(BodyMetrics {
        height_cm: convert_length(height, height_unit, UnitSystem::Metric),
        weight_kg: convert_mass(weight, weight_unit, UnitSystem::Metric),
    })
}
