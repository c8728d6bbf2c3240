use thiserror::Error;

use crate::domain::wizard::state::WizardStep;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidMeasurement(String),

    #[error("Add at least one ingredient")]
    NoIngredients,

    #[error("cannot {action} while on the {from} step")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },
}
