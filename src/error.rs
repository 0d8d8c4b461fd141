use crate::catalog::{AnimalId, FoodId};
use crate::engine::ClipRole;
use thiserror::Error;

/// Catalog problems found before a session may start. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("catalog has no animals")]
    NoAnimals,

    #[error("catalog needs at least 2 foods to build a choice set, found {found}")]
    TooFewFoods { found: usize },

    #[error("animal '{animal}' expects food '{food}' which is not in the food catalog")]
    UnknownCorrectFood { animal: AnimalId, food: FoodId },

    #[error("animal id '{0}' appears more than once")]
    DuplicateAnimal(AnimalId),

    #[error("food id '{0}' appears more than once")]
    DuplicateFood(FoodId),

    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A model could not be loaded by the presentation surface.
/// Recovered by skipping to the next animal.
#[derive(Debug, Error)]
#[error("failed to load model for '{animal}': {reason}")]
pub struct AssetLoadError {
    pub animal: AnimalId,
    pub reason: String,
}

/// The requested clip does not exist, either in the catalog or on the
/// loaded model. The step it belongs to completes instantly.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("animal '{animal}' has no {role:?} clip")]
pub struct MissingAnimationClip {
    pub animal: AnimalId,
    pub role: ClipRole,
}

/// The surface could not put the choice shelf on screen. The gate stays
/// closed, so the session cannot go on.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("choice slots could not be shown: {reason}")]
pub struct ChoicesNotShown {
    pub reason: String,
}

/// A request arrived while the sequencer was not in a phase that takes it.
/// Dropped without touching state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{request} ignored while {phase}")]
pub struct InputIgnored {
    pub request: &'static str,
    pub phase: &'static str,
}

impl InputIgnored {
    pub fn new(request: &'static str, phase: &'static str) -> Self {
        InputIgnored { request, phase }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Ignored(#[from] InputIgnored),

    #[error(transparent)]
    ChoicesNotShown(#[from] ChoicesNotShown),

    /// Every animal failed to load one after another.
    #[error("no animal could be loaded after {attempts} attempts")]
    NoPlayableAnimals { attempts: usize },
}
