use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    units::{BodyMetrics, UnitSystem, convert_length, convert_mass, to_body_metrics},
};

pub const SUGGESTED_INGREDIENTS: [&str; 10] = [
    "Chicken breast",
    "Rice",
    "Broccoli",
    "Eggs",
    "Pasta",
    "Salmon",
    "Spinach",
    "Sweet potato",
    "Quinoa",
    "Tofu",
];

/// Height and weight as entered, each with its own unit.
///
/// Imperial height is held in total inches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub height: String,
    pub weight: String,
    pub height_unit: UnitSystem,
    pub weight_unit: UnitSystem,
}

impl UserInfo {
    pub fn new(
        height: impl Into<String>,
        height_unit: UnitSystem,
        weight: impl Into<String>,
        weight_unit: UnitSystem,
    ) -> Self {
        Self {
            height: height.into(),
            weight: weight.into(),
            height_unit,
            weight_unit,
        }
    }

    /// Switches the height unit, converting the entered value to whole units.
    pub fn set_height_unit(&mut self, unit: UnitSystem) {
        if unit != self.height_unit {
            self.height = convert_entry(&self.height, |v| convert_length(v, self.height_unit, unit));
            self.height_unit = unit;
        }
    }

    /// Switches the weight unit, converting the entered value to whole units.
    pub fn set_weight_unit(&mut self, unit: UnitSystem) {
        if unit != self.weight_unit {
            self.weight = convert_entry(&self.weight, |v| convert_mass(v, self.weight_unit, unit));
            self.weight_unit = unit;
        }
    }

    pub fn body_metrics(&self) -> Result<BodyMetrics, CoreError> {
        to_body_metrics(&self.height, self.height_unit, &self.weight, self.weight_unit)
    }
}

/// Converted whole value, or empty when the entry is blank, unreadable or rounds to zero.
fn convert_entry(raw: &str, convert: impl Fn(f64) -> f64) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) => {
            let converted = convert(value).round();
            if converted > 0.0 {
                format!("{converted}")
            } else {
                String::new()
            }
        }
        Err(_) => String::new(),
    }
}

/// Pantry items in insertion order, no exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed item. Returns `false` for blanks and duplicates.
    pub fn add(&mut self, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() || self.contains(item) {
            return false;
        }
        self.0.push(item.to_string());
        true
    }

    /// Removes the item at `index`; out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|existing| existing == item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Suggested items not already in the list.
    pub fn suggestions(&self) -> Vec<&'static str> {
        SUGGESTED_INGREDIENTS
            .into_iter()
            .filter(|item| !self.contains(item))
            .collect()
    }
}
