//! Terminal front-end for the meal wizard.
//!
//! Walks through `user-info -> ingredients -> recipe` and asks a running
//! `mealprep-api` server for the meal plan.

use anyhow::Context;
use clap::Parser;
use mealprep_core::{
    domain::{
        meal_plan::Meal,
        units::{UnitSystem, join_feet_inches, split_feet_inches},
        wizard::{ACTIVITY_LEVELS, APPLIANCES, GOALS, MealWizard, SPICE_LEVELS, UserInfo, WizardStep},
    },
    infrastructure::recipes::HttpRecipesClient,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mealprep-wizard", version, about = "Plan spooky meals from the terminal")]
struct WizardArgs {
    /// Base URL of the recipes API.
    #[arg(long, env = "API_BASE", default_value = "http://localhost:8787")]
    api_base: String,

    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "warn")]
    log_filter: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Quit,
    Reset,
    Back,
    Height(String, Option<UnitSystem>),
    Weight(String, Option<UnitSystem>),
    HeightUnit(UnitSystem),
    WeightUnit(UnitSystem),
    Next,
    Add(String),
    Remove(usize),
    Suggest,
    Goal(String),
    Activity(String),
    Spice(String),
    Appliances(Vec<String>),
    Pref(String, bool),
    Generate,
}

fn length_unit(raw: &str) -> Option<UnitSystem> {
    match raw.to_ascii_lowercase().as_str() {
        "cm" | "metric" => Some(UnitSystem::Metric),
        "in" | "inch" | "inches" | "imperial" => Some(UnitSystem::Imperial),
        _ => None,
    }
}

fn mass_unit(raw: &str) -> Option<UnitSystem> {
    match raw.to_ascii_lowercase().as_str() {
        "kg" | "metric" => Some(UnitSystem::Metric),
        "lb" | "lbs" | "imperial" => Some(UnitSystem::Imperial),
        _ => None,
    }
}

/// Accepts `5'10` as feet and inches; anything else is passed through.
fn normalize_height(raw: &str) -> (String, Option<UnitSystem>) {
    if let Some((feet, inches)) = raw.split_once('\'')
        && let Ok(feet) = feet.trim().parse::<u32>()
    {
        let inches = inches.trim().trim_end_matches('"');
        let inches = if inches.is_empty() { Ok(0.0) } else { inches.parse::<f64>() };
        if let Ok(inches) = inches {
            return (
                format!("{}", join_feet_inches(feet, inches)),
                Some(UnitSystem::Imperial),
            );
        }
    }
    (raw.to_string(), None)
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "reset" => Command::Reset,
        "back" => Command::Back,
        "next" => Command::Next,
        "suggest" => Command::Suggest,
        "generate" | "go" => Command::Generate,
        "height" => {
            let (value, unit) = rest.split_once(' ').unwrap_or((rest, ""));
            let (value, feet_inches) = normalize_height(value);
            let unit = match unit.trim() {
                "" => feet_inches,
                raw => Some(length_unit(raw).ok_or(format!("unknown length unit: {raw}"))?),
            };
            Command::Height(value, unit)
        }
        "weight" => {
            let (value, unit) = rest.split_once(' ').unwrap_or((rest, ""));
            let unit = match unit.trim() {
                "" => None,
                raw => Some(mass_unit(raw).ok_or(format!("unknown mass unit: {raw}"))?),
            };
            Command::Weight(value.to_string(), unit)
        }
        "units" => {
            let (field, unit) = rest
                .split_once(' ')
                .ok_or("usage: units <height|weight> <unit>")?;
            match field {
                "height" => Command::HeightUnit(
                    length_unit(unit.trim()).ok_or(format!("unknown length unit: {unit}"))?,
                ),
                "weight" => Command::WeightUnit(
                    mass_unit(unit.trim()).ok_or(format!("unknown mass unit: {unit}"))?,
                ),
                other => return Err(format!("unknown field: {other}")),
            }
        }
        "add" if !rest.is_empty() => Command::Add(rest.to_string()),
        "remove" => {
            let index = rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or("usage: remove <number>")?;
            Command::Remove(index - 1)
        }
        "goal" if !rest.is_empty() => Command::Goal(rest.to_string()),
        "activity" if !rest.is_empty() => Command::Activity(rest.to_string()),
        "spice" if !rest.is_empty() => Command::Spice(rest.to_string()),
        "appliances" => Command::Appliances(
            rest.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        "pref" => {
            let (name, state) = rest.split_once(' ').ok_or("usage: pref <name> <on|off>")?;
            let on = match state.trim() {
                "on" | "yes" | "true" => true,
                "off" | "no" | "false" => false,
                other => return Err(format!("expected on or off, got {other}")),
            };
            Command::Pref(name.to_string(), on)
        }
        "" => return Err("type `help` for commands".to_string()),
        other => return Err(format!("unknown command: {other} (type `help`)")),
    };

    Ok(command)
}

struct Session {
    wizard: MealWizard,
    draft: UserInfo,
    client: HttpRecipesClient,
}

impl Session {
    fn new(client: HttpRecipesClient) -> Self {
        Self {
            wizard: MealWizard::new(),
            draft: UserInfo::default(),
            client,
        }
    }

    /// Returns `false` once the user asks to quit.
    async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Help => print_help(self.wizard.step()),
            Command::Reset => {
                self.wizard.reset();
                self.draft = UserInfo::default();
                println!("Starting over.");
            }
            Command::Back => {
                self.wizard.back();
                if self.wizard.step() == WizardStep::UserInfo {
                    self.draft = self.wizard.user_info().clone();
                }
            }
            Command::Height(value, unit) => {
                if let Some(unit) = unit {
                    self.draft.height_unit = unit;
                }
                self.draft.height = value;
            }
            Command::Weight(value, unit) => {
                if let Some(unit) = unit {
                    self.draft.weight_unit = unit;
                }
                self.draft.weight = value;
            }
            Command::HeightUnit(unit) => self.draft.set_height_unit(unit),
            Command::WeightUnit(unit) => self.draft.set_weight_unit(unit),
            Command::Next => match self.wizard.submit_user_info(self.draft.clone()) {
                Ok(()) => println!("Now add what is in your pantry."),
                Err(e) => println!("{e}"),
            },
            Command::Add(item) => match self.wizard.add_ingredient(&item) {
                Ok(true) => {}
                Ok(false) => println!("Already on the list."),
                Err(e) => println!("{e}"),
            },
            Command::Remove(index) => match self.wizard.remove_ingredient(index) {
                Ok(Some(_)) => {}
                Ok(None) => println!("No ingredient #{}", index + 1),
                Err(e) => println!("{e}"),
            },
            Command::Suggest => {
                println!("Suggestions: {}", self.wizard.ingredients().suggestions().join(", "));
            }
            Command::Goal(goal) => self.wizard.settings_mut().goal = pick(goal, &GOALS),
            Command::Activity(activity) => {
                self.wizard.settings_mut().activity = pick(activity, &ACTIVITY_LEVELS)
            }
            Command::Spice(spice) => self.wizard.settings_mut().spice = pick(spice, &SPICE_LEVELS),
            Command::Appliances(appliances) => {
                for appliance in appliances.iter().filter(|a| !APPLIANCES.contains(&a.as_str())) {
                    println!("note: {appliance} is not a listed appliance");
                }
                self.wizard.settings_mut().appliances = appliances;
            }
            Command::Pref(name, on) => {
                let prefs = &mut self.wizard.settings_mut().prefs;
                match name.as_str() {
                    "vegetarian" => prefs.vegetarian = on,
                    "vegan" => prefs.vegan = on,
                    "dairy-free" | "dairyFree" => prefs.dairy_free = on,
                    "gluten-free" | "glutenFree" => prefs.gluten_free = on,
                    other => println!("unknown preference: {other}"),
                }
            }
            Command::Generate => self.generate().await,
        }

        self.show();
        true
    }

    async fn generate(&mut self) {
        let input = match self.wizard.submit_ingredients() {
            Ok(input) => input,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        println!("Summoning recipes...");
        debug!(pantry = input.pantry.len(), "requesting meals");

        match self.client.generate(&input).await {
            Ok(result) => {
                if let Some(error) = &result.error {
                    warn!("degraded response: {}", error);
                    println!("The kitchen spirits misbehaved: {error}");
                }
                if let Err(e) = self.wizard.receive_meals(result.meals) {
                    println!("{e}");
                }
            }
            Err(e) => {
                self.wizard.request_failed();
                println!("{e}. Type `generate` to try again.");
            }
        }
    }

    fn show(&self) {
        match self.wizard.step() {
            WizardStep::UserInfo => {
                println!(
                    "[user-info] height: {} | weight: {}",
                    describe_height(&self.draft),
                    describe_entry(&self.draft.weight, self.draft.weight_unit.mass_unit()),
                );
            }
            WizardStep::Ingredients => {
                let info = self.wizard.user_info();
                if let Ok(metrics) = info.body_metrics() {
                    println!(
                        "[ingredients] {:.1} cm, {:.1} kg, BMI {:.1}",
                        metrics.height_cm,
                        metrics.weight_kg,
                        metrics.bmi()
                    );
                }
                for (i, item) in self.wizard.ingredients().items().iter().enumerate() {
                    println!("  {}. {}", i + 1, item);
                }
                let settings = self.wizard.settings();
                println!(
                    "  goal: {}, activity: {}, spice: {}, appliances: {}",
                    settings.goal,
                    settings.activity,
                    settings.spice,
                    settings.appliances.join(", ")
                );
            }
            WizardStep::Recipe => {
                if self.wizard.meals().is_empty() {
                    println!("[recipe] No meals this time. Type `back` to adjust and retry.");
                }
                for (i, meal) in self.wizard.meals().iter().enumerate() {
                    print_meal(i + 1, meal);
                }
            }
        }
    }
}

fn pick(value: String, known: &[&str]) -> String {
    if !known.contains(&value.as_str()) {
        println!("note: {value} is not one of {}", known.join(", "));
    }
    value
}

fn describe_entry(value: &str, unit: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        format!("{} {}", value.trim(), unit)
    }
}

fn describe_height(info: &UserInfo) -> String {
    match (info.height_unit, info.height.trim().parse::<f64>()) {
        (UnitSystem::Imperial, Ok(inches)) => {
            let (feet, inches) = split_feet_inches(inches);
            format!("{feet}'{inches:.0}\"")
        }
        _ => describe_entry(&info.height, info.height_unit.length_unit()),
    }
}

fn print_meal(number: usize, meal: &Meal) {
    println!(
        "\n{}. {} ({})\n   {} min, {} kcal, protein {}g, carbs {}g, fat {}g",
        number,
        meal.spooky_name,
        meal.title,
        meal.time_minutes,
        meal.calories,
        meal.macros.protein_g,
        meal.macros.carbs_g,
        meal.macros.fat_g
    );
    for ingredient in &meal.ingredients {
        println!("   - {} ({})", ingredient.name, ingredient.amount);
    }
    for (i, step) in meal.steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }
}

fn print_help(step: WizardStep) {
    match step {
        WizardStep::UserInfo => println!(
            "height <value> [cm|in]   height 5'10\n\
             weight <value> [kg|lb]\n\
             units <height|weight> <metric|imperial>\n\
             next"
        ),
        WizardStep::Ingredients => println!(
            "add <item>   remove <number>   suggest\n\
             goal <{}>   activity <{}>   spice <{}>\n\
             appliances <a, b, ...>   pref <vegetarian|vegan|dairy-free|gluten-free> <on|off>\n\
             generate   back",
            GOALS.join("|"),
            ACTIVITY_LEVELS.join("|"),
            SPICE_LEVELS.join("|")
        ),
        WizardStep::Recipe => println!("back   reset"),
    }
    println!("help   quit");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();
    let args = WizardArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::new(HttpRecipesClient::new(&args.api_base));
    println!("Spooky Meal Prep (server: {})", args.api_base);
    print_help(session.wizard.step());
    session.show();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let keep_going = match parse_command(&line) {
            Ok(command) => session.handle(command).await,
            Err(message) => {
                println!("{message}");
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurements_with_units() {
        assert_eq!(
            parse_command("height 180 cm"),
            Ok(Command::Height("180".to_string(), Some(UnitSystem::Metric)))
        );
        assert_eq!(
            parse_command("weight 150 lbs"),
            Ok(Command::Weight("150".to_string(), Some(UnitSystem::Imperial)))
        );
        assert_eq!(
            parse_command("weight 70"),
            Ok(Command::Weight("70".to_string(), None))
        );
        assert!(parse_command("height 180 furlongs").is_err());
    }

    #[test]
    fn test_parse_feet_and_inches() {
        assert_eq!(
            parse_command("height 5'10"),
            Ok(Command::Height("70".to_string(), Some(UnitSystem::Imperial)))
        );
        assert_eq!(
            parse_command("height 6'"),
            Ok(Command::Height("72".to_string(), Some(UnitSystem::Imperial)))
        );
    }

    #[test]
    fn test_parse_ingredient_commands() {
        assert_eq!(
            parse_command("add sweet potato"),
            Ok(Command::Add("sweet potato".to_string()))
        );
        assert_eq!(parse_command("remove 2"), Ok(Command::Remove(1)));
        assert!(parse_command("remove 0").is_err());
        assert!(parse_command("add").is_err());
        assert_eq!(
            parse_command("appliances oven, airfryer,"),
            Ok(Command::Appliances(vec![
                "oven".to_string(),
                "airfryer".to_string()
            ]))
        );
        assert_eq!(
            parse_command("pref vegan on"),
            Ok(Command::Pref("vegan".to_string(), true))
        );
    }

    #[test]
    fn test_parse_unit_switch() {
        assert_eq!(
            parse_command("units height imperial"),
            Ok(Command::HeightUnit(UnitSystem::Imperial))
        );
        assert_eq!(
            parse_command("units weight kg"),
            Ok(Command::WeightUnit(UnitSystem::Metric))
        );
        assert!(parse_command("units age years").is_err());
    }

    #[test]
    fn test_unknown_command_is_reported() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[tokio::test]
    async fn test_session_moves_to_ingredients_after_valid_info() {
        let mut session = Session::new(HttpRecipesClient::new("http://127.0.0.1:9"));

        session.handle(Command::Height("5'11".to_string(), None)).await;
        session.handle(Command::Next).await;
        assert_eq!(session.wizard.step(), WizardStep::UserInfo);

        session
            .handle(Command::Height("180".to_string(), Some(UnitSystem::Metric)))
            .await;
        session.handle(Command::Weight("75".to_string(), None)).await;
        session.handle(Command::Next).await;
        assert_eq!(session.wizard.step(), WizardStep::Ingredients);

        assert!(!session.handle(Command::Quit).await);
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_ingredients_step() {
        let mut session = Session::new(HttpRecipesClient::new("http://127.0.0.1:9"));
        session
            .handle(Command::Height("180".to_string(), None))
            .await;
        session.handle(Command::Weight("75".to_string(), None)).await;
        session.handle(Command::Next).await;
        session.handle(Command::Add("rice".to_string())).await;

        session.handle(Command::Generate).await;

        assert_eq!(session.wizard.step(), WizardStep::Ingredients);
        assert!(!session.wizard.is_pending());
    }
}
