use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::Validate;

use crate::domain::meal_plan::{entities::MealPlan, value_objects::GeneratedMeals};

static FENCED_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").ok());

/// What could be made of a raw model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMeals {
    /// JSON recovered and it satisfies the meal plan schema.
    Valid(MealPlan),
    /// JSON recovered but it does not satisfy the schema.
    InvalidShape(String),
    /// No JSON could be recovered from the text.
    Unparsable,
}

impl ParsedMeals {
    pub fn into_generated(self) -> GeneratedMeals {
        match self {
            ParsedMeals::Valid(plan) => GeneratedMeals::meals(plan.meals),
            ParsedMeals::InvalidShape(reason) => GeneratedMeals::degraded(format!(
                "The recipe generator returned meals in an unexpected format: {reason}"
            )),
            ParsedMeals::Unparsable => GeneratedMeals::degraded(
                "The recipe generator returned a response that could not be read as JSON",
            ),
        }
    }
}

/// Parses raw model text: direct JSON first, then salvage, then schema validation.
pub fn parse_model_output(raw: &str) -> ParsedMeals {
    match extract_json_value(raw) {
        Some(value) => validate_meal_plan(value),
        None => ParsedMeals::Unparsable,
    }
}

pub fn validate_meal_plan(value: Value) -> ParsedMeals {
    let plan: MealPlan = match serde_json::from_value(value) {
        Ok(plan) => plan,
        Err(e) => return ParsedMeals::InvalidShape(e.to_string()),
    };

    match plan.validate() {
        Ok(()) => ParsedMeals::Valid(plan),
        Err(errors) => ParsedMeals::InvalidShape(errors.to_string()),
    }
}

/// Best-effort JSON recovery from model output.
///
/// The full text is tried as-is. Failing that, objects are looked for in a
/// fenced code block, in the span from the first `{` to the last `}`, and in
/// the first brace-balanced span, in that order.
pub fn extract_json_value(raw: &str) -> Option<Value> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    salvage_candidates(text)
        .into_iter()
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate.trim()).ok())
        .find(Value::is_object)
}

fn salvage_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();

    if let Some(block) = FENCED_BLOCK
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
    {
        candidates.push(block.as_str());
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        candidates.push(&text[start..=end]);
    }

    if let Some(balanced) = first_balanced_object(text) {
        candidates.push(balanced);
    }

    candidates
}

/// First `{ ... }` span whose braces balance, ignoring braces inside strings.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
