use std::fmt;

use crate::domain::{
    meal_plan::{
        entities::Meal,
        value_objects::{GenerateMealsInput, Preferences},
    },
    units::{UnitSystem, parse_measurement},
    wizard::{
        entities::{IngredientList, UserInfo},
        errors::WizardError,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    UserInfo,
    Ingredients,
    Recipe,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::UserInfo => write!(f, "user-info"),
            WizardStep::Ingredients => write!(f, "ingredients"),
            WizardStep::Recipe => write!(f, "recipe"),
        }
    }
}

pub const GOALS: [&str; 3] = ["lose", "maintain", "gain"];
pub const ACTIVITY_LEVELS: [&str; 5] = ["sedentary", "light", "moderate", "active", "athlete"];
pub const SPICE_LEVELS: [&str; 3] = ["none", "medium", "hot"];
pub const APPLIANCES: [&str; 5] = ["stovetop", "oven", "microwave", "airfryer", "slowcooker"];

/// Options sent along with the pantry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealSettings {
    pub goal: String,
    pub activity: String,
    pub prefs: Preferences,
    pub spice: String,
    pub appliances: Vec<String>,
}

impl Default for MealSettings {
    fn default() -> Self {
        Self {
            goal: "maintain".to_string(),
            activity: "moderate".to_string(),
            prefs: Preferences::default(),
            spice: "medium".to_string(),
            appliances: vec!["stovetop".to_string()],
        }
    }
}

/// Linear `user-info -> ingredients -> recipe` form flow.
///
/// Moving to `recipe` takes two calls: [`MealWizard::submit_ingredients`]
/// produces the request and [`MealWizard::receive_meals`] accepts the reply.
#[derive(Debug, Clone, Default)]
pub struct MealWizard {
    step: WizardStep,
    user_info: UserInfo,
    ingredients: IngredientList,
    settings: MealSettings,
    meals: Vec<Meal>,
    pending: bool,
}

impl MealWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn settings(&self) -> &MealSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MealSettings {
        &mut self.settings
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn submit_user_info(&mut self, info: UserInfo) -> Result<(), WizardError> {
        self.expect_step(WizardStep::UserInfo, "submit user info")?;

        if info.height.trim().is_empty() {
            return Err(WizardError::MissingField("height"));
        }
        if info.weight.trim().is_empty() {
            return Err(WizardError::MissingField("weight"));
        }
        for (field, raw) in [("height", &info.height), ("weight", &info.weight)] {
            parse_measurement(field, raw)
                .map_err(|e| WizardError::InvalidMeasurement(e.to_string()))?;
        }

        self.user_info = info;
        self.step = WizardStep::Ingredients;
        Ok(())
    }

    /// Only allowed on the `ingredients` step. `Ok(false)` for blanks and duplicates.
    pub fn add_ingredient(&mut self, item: &str) -> Result<bool, WizardError> {
        self.expect_step(WizardStep::Ingredients, "add an ingredient")?;
        Ok(self.ingredients.add(item))
    }

    /// Only allowed on the `ingredients` step; out of range yields `Ok(None)`.
    pub fn remove_ingredient(&mut self, index: usize) -> Result<Option<String>, WizardError> {
        self.expect_step(WizardStep::Ingredients, "remove an ingredient")?;
        Ok(self.ingredients.remove(index))
    }

    /// Builds the generation request in canonical metric units.
    pub fn submit_ingredients(&mut self) -> Result<GenerateMealsInput, WizardError> {
        self.expect_step(WizardStep::Ingredients, "submit ingredients")?;

        if self.ingredients.is_empty() {
            return Err(WizardError::NoIngredients);
        }

        let metrics = self
            .user_info
            .body_metrics()
            .map_err(|e| WizardError::InvalidMeasurement(e.to_string()))?;

        self.pending = true;

        Ok(GenerateMealsInput {
            unit_system: UnitSystem::Metric,
            height: format!("{:.1}", metrics.height_cm),
            weight: format!("{:.1}", metrics.weight_kg),
            goal: self.settings.goal.clone(),
            activity: Some(self.settings.activity.clone()),
            pantry: self.ingredients.items().to_vec(),
            prefs: self.settings.prefs.clone(),
            spice: Some(self.settings.spice.clone()),
            appliances: self.settings.appliances.clone(),
        })
    }

    pub fn receive_meals(&mut self, meals: Vec<Meal>) -> Result<(), WizardError> {
        if self.step != WizardStep::Ingredients || !self.pending {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "show recipes",
            });
        }

        self.pending = false;
        self.meals = meals;
        self.step = WizardStep::Recipe;
        Ok(())
    }

    /// The request failed; stay on `ingredients` so it can be retried.
    pub fn request_failed(&mut self) {
        self.pending = false;
    }

    pub fn back(&mut self) {
        self.pending = false;
        match self.step {
            WizardStep::UserInfo => {}
            WizardStep::Ingredients => self.step = WizardStep::UserInfo,
            WizardStep::Recipe => {
                self.meals.clear();
                self.step = WizardStep::Ingredients;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.step,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric_info() -> UserInfo {
        UserInfo::new("172", UnitSystem::Metric, "68", UnitSystem::Metric)
    }

    fn wizard_at_ingredients() -> MealWizard {
        let mut wizard = MealWizard::new();
        wizard.submit_user_info(metric_info()).unwrap();
        wizard.add_ingredient("Rice").unwrap();
        wizard.add_ingredient("Eggs").unwrap();
        wizard
    }

    #[test]
    fn test_empty_height_does_not_advance() {
        let mut wizard = MealWizard::new();
        let err = wizard
            .submit_user_info(UserInfo::new("", UnitSystem::Metric, "68", UnitSystem::Metric))
            .unwrap_err();

        assert_eq!(err, WizardError::MissingField("height"));
        assert_eq!(wizard.step(), WizardStep::UserInfo);
    }

    #[test]
    fn test_empty_weight_does_not_advance() {
        let mut wizard = MealWizard::new();
        let err = wizard
            .submit_user_info(UserInfo::new("172", UnitSystem::Metric, " ", UnitSystem::Metric))
            .unwrap_err();

        assert_eq!(err, WizardError::MissingField("weight"));
        assert_eq!(wizard.step(), WizardStep::UserInfo);
    }

    #[test]
    fn test_non_numeric_height_does_not_advance() {
        let mut wizard = MealWizard::new();
        let result = wizard.submit_user_info(UserInfo::new(
            "tall",
            UnitSystem::Metric,
            "68",
            UnitSystem::Metric,
        ));

        assert!(matches!(result, Err(WizardError::InvalidMeasurement(_))));
        assert_eq!(wizard.step(), WizardStep::UserInfo);
    }

    #[test]
    fn test_full_forward_flow() {
        let mut wizard = wizard_at_ingredients();
        assert_eq!(wizard.step(), WizardStep::Ingredients);

        let input = wizard.submit_ingredients().unwrap();
        assert_eq!(input.pantry, vec!["Rice", "Eggs"]);
        assert_eq!(input.height, "172.0");
        assert_eq!(input.goal, "maintain");
        assert!(wizard.is_pending());
        assert_eq!(wizard.step(), WizardStep::Ingredients);

        wizard.receive_meals(Vec::new()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Recipe);
        assert!(!wizard.is_pending());
    }

    #[test]
    fn test_imperial_entries_are_submitted_in_metric() {
        let mut wizard = MealWizard::new();
        wizard
            .submit_user_info(UserInfo::new("70", UnitSystem::Imperial, "154", UnitSystem::Imperial))
            .unwrap();
        wizard.add_ingredient("Oats").unwrap();

        let input = wizard.submit_ingredients().unwrap();

        assert_eq!(input.unit_system, UnitSystem::Metric);
        assert_eq!(input.height, "177.8");
        assert_eq!(input.weight, "69.9");
    }

    #[test]
    fn test_empty_pantry_cannot_be_submitted() {
        let mut wizard = MealWizard::new();
        wizard.submit_user_info(metric_info()).unwrap();

        assert_eq!(wizard.submit_ingredients(), Err(WizardError::NoIngredients));
        assert!(!wizard.is_pending());
    }

    #[test]
    fn test_recipe_step_needs_a_submission() {
        let mut wizard = MealWizard::new();
        assert!(wizard.receive_meals(Vec::new()).is_err());
        assert_eq!(wizard.step(), WizardStep::UserInfo);

        let mut wizard = wizard_at_ingredients();
        assert!(wizard.receive_meals(Vec::new()).is_err());
        assert_eq!(wizard.step(), WizardStep::Ingredients);
    }

    #[test]
    fn test_submitting_out_of_order_is_rejected() {
        let mut wizard = MealWizard::new();
        assert!(matches!(
            wizard.submit_ingredients(),
            Err(WizardError::InvalidTransition { from: WizardStep::UserInfo, .. })
        ));
    }

    #[test]
    fn test_failed_request_allows_retry() {
        let mut wizard = wizard_at_ingredients();
        wizard.submit_ingredients().unwrap();
        wizard.request_failed();

        assert!(wizard.receive_meals(Vec::new()).is_err());
        assert!(wizard.submit_ingredients().is_ok());
    }

    #[test]
    fn test_back_keeps_collected_data() {
        let mut wizard = wizard_at_ingredients();
        wizard.submit_ingredients().unwrap();
        wizard.receive_meals(Vec::new()).unwrap();

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Ingredients);
        assert_eq!(wizard.ingredients().len(), 2);

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::UserInfo);
        assert_eq!(wizard.user_info(), &metric_info());

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::UserInfo);
    }

    #[test]
    fn test_pantry_is_locked_outside_ingredients_step() {
        let mut wizard = MealWizard::new();
        assert!(matches!(
            wizard.add_ingredient("Rice"),
            Err(WizardError::InvalidTransition { from: WizardStep::UserInfo, .. })
        ));

        let mut wizard = wizard_at_ingredients();
        assert_eq!(wizard.add_ingredient("Rice"), Ok(false));
        assert_eq!(wizard.remove_ingredient(5), Ok(None));
        wizard.submit_ingredients().unwrap();
        wizard.receive_meals(Vec::new()).unwrap();

        assert!(wizard.add_ingredient("Tofu").is_err());
        assert!(wizard.remove_ingredient(0).is_err());
        assert_eq!(wizard.ingredients().items(), ["Rice", "Eggs"]);
    }

    #[test]
    fn test_default_settings_are_listed_options() {
        let settings = MealSettings::default();

        assert!(GOALS.contains(&settings.goal.as_str()));
        assert!(ACTIVITY_LEVELS.contains(&settings.activity.as_str()));
        assert!(SPICE_LEVELS.contains(&settings.spice.as_str()));
        assert!(settings.appliances.iter().all(|a| APPLIANCES.contains(&a.as_str())));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wizard = wizard_at_ingredients();
        wizard.settings_mut().goal = "gain".to_string();
        wizard.submit_ingredients().unwrap();
        wizard.receive_meals(Vec::new()).unwrap();

        wizard.reset();

        assert_eq!(wizard.step(), WizardStep::UserInfo);
        assert!(wizard.ingredients().is_empty());
        assert_eq!(wizard.user_info(), &UserInfo::default());
        assert_eq!(wizard.settings(), &MealSettings::default());
        assert!(wizard.meals().is_empty());
    }
}
