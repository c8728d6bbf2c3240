use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{meal_plan::value_objects::GenerateMealsInput, units::BodyMetrics};

static SLOT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").ok());

const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "You output clean, strict JSON and follow nutrition best-practices. Theme is Halloween.";

const DEFAULT_TEMPLATE: &str = r#"You are a certified nutritionist and chef. Generate 3 Halloween-themed meal recipes using ONLY items from the pantry list whenever possible, and simple staples if absolutely needed.

Constraints:
- Respect dietary flags (vegetarian, vegan, dairyFree, glutenFree)
- Respect spice preference and available appliances
- Output JSON only (no markdown).

Rules:
- Do not invent ingredients that are not in the pantry unless they are universal staples (salt, pepper, water, oil).
- If the pantry is insufficient, keep recipes extremely simple rather than adding new ingredients.

For each meal include:
- "title": normal title
- "spookyName": a Halloween pun title
- "timeMinutes": realistic estimate
- "calories": total kcal
- "macros": { "protein_g", "carbs_g", "fat_g" }
- "ingredients": list of { "name", "amount" } (prefer pantry items)
- "steps": 5-8 numbered steps (concise, appliance-aware)

User details:
- unitSystem: {unit_system}
- height: {height}
- weight: {weight}
- canonical: {height_cm} cm, {weight_kg} kg, BMI {bmi}
- goal: {goal}
- activity: {activity}
- pantry: {pantry}
- prefs: {prefs}
- spice: {spice}
- appliances: {appliances}"#;

/// Instruction template with `{placeholder}` slots filled per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system_instruction: String,
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Fills every `{slot}` in one pass. Substituted text is never rescanned,
    /// and unknown slots are left as they are.
    pub fn render(&self, input: &GenerateMealsInput, metrics: &BodyMetrics) -> String {
        let Some(slot) = SLOT.as_ref() else {
            return self.template.clone();
        };

        slot.replace_all(&self.template, |caps: &Captures| {
            slot_value(&caps[1], input, metrics).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }
}

fn slot_value(name: &str, input: &GenerateMealsInput, metrics: &BodyMetrics) -> Option<String> {
    let value = match name {
        "unit_system" => input.unit_system.to_string(),
        "height" => input.height.trim().to_string(),
        "weight" => input.weight.trim().to_string(),
        "height_cm" => format!("{:.1}", metrics.height_cm),
        "weight_kg" => format!("{:.1}", metrics.weight_kg),
        "bmi" => format!("{:.1}", metrics.bmi()),
        "goal" => input.goal.trim().to_string(),
        "activity" => input.activity.as_deref().unwrap_or("unspecified").to_string(),
        "pantry" => input.pantry.join(", "),
        "prefs" => {
            let prefs = input.prefs.active_flags();
            if prefs.is_empty() {
                "none".to_string()
            } else {
                prefs.join(", ")
            }
        }
        "spice" => input.spice.as_deref().unwrap_or("medium").to_string(),
        "appliances" => input.appliances.join(", "),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{meal_plan::value_objects::Preferences, units::UnitSystem};

    #[test]
    fn test_render_fills_every_placeholder() {
        let input = GenerateMealsInput {
            unit_system: UnitSystem::Imperial,
            height: "70".to_string(),
            weight: "154".to_string(),
            goal: "maintain".to_string(),
            activity: None,
            pantry: vec!["rice".to_string(), "beans".to_string()],
            prefs: Preferences {
                vegan: true,
                ..Default::default()
            },
            spice: Some("hot".to_string()),
            appliances: vec!["oven".to_string()],
        };
        let metrics = BodyMetrics {
            height_cm: 177.8,
            weight_kg: 69.9,
        };

        let prompt = PromptTemplate::default().render(&input, &metrics);

        assert!(prompt.contains("- unitSystem: imperial"));
        assert!(prompt.contains("- canonical: 177.8 cm, 69.9 kg, BMI 22.1"));
        assert!(prompt.contains("- pantry: rice, beans"));
        assert!(prompt.contains("- prefs: vegan"));
        assert!(prompt.contains("- activity: unspecified"));
        assert!(prompt.contains("- appliances: oven"));
        // The JSON key hints use braces too; only the known slots are replaced.
        assert!(prompt.contains(r#""macros": { "protein_g", "carbs_g", "fat_g" }"#));
        assert!(!prompt.contains("{goal}"));
    }

    #[test]
    fn test_user_text_with_slot_names_is_not_expanded() {
        let input = GenerateMealsInput {
            unit_system: UnitSystem::Metric,
            height: "172".to_string(),
            weight: "68".to_string(),
            goal: "{pantry}".to_string(),
            activity: Some("moderate".to_string()),
            pantry: vec!["rice {spice}".to_string(), "{unknown}".to_string()],
            prefs: Preferences::default(),
            spice: Some("hot".to_string()),
            appliances: vec!["stovetop".to_string()],
        };
        let metrics = BodyMetrics {
            height_cm: 172.0,
            weight_kg: 68.0,
        };

        let prompt = PromptTemplate::default().render(&input, &metrics);

        assert!(prompt.contains("- goal: {pantry}\n"));
        assert!(prompt.contains("- pantry: rice {spice}, {unknown}\n"));
        assert!(prompt.contains("- spice: hot\n"));
    }
}
