use crate::engine::{ClipRole, Vec3};
use crate::error::{ConfigurationError, MissingAnimationClip};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AnimalId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FoodId(String);

impl AnimalId {
    pub fn new(id: impl Into<String>) -> Self {
        AnimalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FoodId {
    pub fn new(id: impl Into<String>) -> Self {
        FoodId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FoodId {
    fn from(id: &str) -> Self {
        FoodId::new(id)
    }
}

impl From<&str> for AnimalId {
    fn from(id: &str) -> Self {
        AnimalId::new(id)
    }
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// Concrete clip names for each `ClipRole`. A role left empty resolves to
/// `MissingAnimationClip`, which the sequencer treats as an instant step.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClipSet {
    pub idle: Option<String>,
    pub eat: Option<String>,
    pub happy: Option<String>,
    pub reject: Option<String>,
}

impl ClipSet {
    pub fn new(idle: &str, eat: &str, happy: &str, reject: &str) -> Self {
        ClipSet {
            idle: Some(idle.to_string()),
            eat: Some(eat.to_string()),
            happy: Some(happy.to_string()),
            reject: Some(reject.to_string()),
        }
    }

    pub fn get(&self, role: ClipRole) -> Option<&str> {
        match role {
            ClipRole::Idle => self.idle.as_deref(),
            ClipRole::Eat => self.eat.as_deref(),
            ClipRole::Happy => self.happy.as_deref(),
            ClipRole::Reject => self.reject.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub id: AnimalId,
    pub display_name: String,
    pub model: String,
    pub correct_food: FoodId,
    #[serde(default)]
    pub clips: ClipSet,
    /// Where the food ends up when eaten, relative to the animal root.
    #[serde(default)]
    pub eat_target_offset: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub rotation_y: f32,
}

impl AnimalRecord {
    pub fn clip(&self, role: ClipRole) -> Result<&str, MissingAnimationClip> {
        self.clips.get(role).ok_or_else(|| MissingAnimationClip {
            animal: self.id.clone(),
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub id: FoodId,
    pub display_name: String,
    pub model: String,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Fallback position when the slot layout has no slot for this choice.
    #[serde(default)]
    pub slot_hint: Vec3,
}

#[derive(Deserialize)]
struct RawCatalog {
    animals: Vec<AnimalRecord>,
    foods: Vec<FoodRecord>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = ConfigurationError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Catalog::new(raw.animals, raw.foods)
    }
}

/// Read-only animal and food tables for a session.
/// Only constructible through validation, so every `Catalog` in hand has
/// at least one animal, at least two foods, unique ids and no dangling
/// `correct_food`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    animals: Vec<AnimalRecord>,
    foods: Vec<FoodRecord>,
}

impl Catalog {
    pub fn new(
        animals: Vec<AnimalRecord>,
        foods: Vec<FoodRecord>,
    ) -> Result<Self, ConfigurationError> {
        if animals.is_empty() {
            return Err(ConfigurationError::NoAnimals);
        }
        if foods.len() < 2 {
            return Err(ConfigurationError::TooFewFoods { found: foods.len() });
        }

        let mut food_ids = HashSet::with_capacity(foods.len());
        for food in &foods {
            if !food_ids.insert(&food.id) {
                return Err(ConfigurationError::DuplicateFood(food.id.clone()));
            }
        }

        let mut animal_ids = HashSet::with_capacity(animals.len());
        for animal in &animals {
            if !animal_ids.insert(&animal.id) {
                return Err(ConfigurationError::DuplicateAnimal(animal.id.clone()));
            }
            if !food_ids.contains(&animal.correct_food) {
                return Err(ConfigurationError::UnknownCorrectFood {
                    animal: animal.id.clone(),
                    food: animal.correct_food.clone(),
                });
            }
        }

        Ok(Catalog { animals, foods })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The animals and foods of the stock game.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn list_animals(&self) -> &[AnimalRecord] {
        &self.animals
    }

    pub fn list_foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    /// The animal for a turn counter. The counter wraps, so any value is valid.
    pub fn animal(&self, index: usize) -> &AnimalRecord {
        &self.animals[index % self.animals.len()]
    }

    pub fn food(&self, id: &FoodId) -> Option<&FoodRecord> {
        self.foods.iter().find(|food| food.id == *id)
    }
}

fn builtin_animal(
    name: &str,
    food: &str,
    scale: f32,
    rotation_y: f32,
    eat_target_offset: Vec3,
) -> AnimalRecord {
    AnimalRecord {
        id: AnimalId::new(name.to_lowercase()),
        display_name: name.to_string(),
        model: format!("models/{}.glb", name.to_lowercase()),
        correct_food: FoodId::new(food.to_lowercase()),
        clips: ClipSet::new("idle", "Eating", "Gallop", "Death"),
        eat_target_offset,
        scale: Vec3::splat(scale),
        rotation_y,
    }
}

fn builtin_food(name: &str, scale: f32, slot_hint: Vec3) -> FoodRecord {
    FoodRecord {
        id: FoodId::new(name.to_lowercase()),
        display_name: name.to_string(),
        model: format!("models/{}.glb", name.to_lowercase()),
        scale: Vec3::splat(scale),
        slot_hint,
    }
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    animals: vec![
        builtin_animal("Monkey", "Banana", 1.0, 0.0, Vec3::new(0.0, 1.2, 0.5)),
        builtin_animal("Dog", "Bone", 1.0, std::f32::consts::PI, Vec3::new(0.0, 0.8, 0.6)),
        builtin_animal("Cat", "Milk", 1.0, 0.0, Vec3::new(0.0, 0.6, 0.4)),
        builtin_animal("Whale", "Fish", 2.0, 0.0, Vec3::new(0.0, 1.5, 1.0)),
        builtin_animal("Mouse", "Cheese", 0.5, 0.0, Vec3::new(0.0, 0.2, 0.2)),
    ],
    foods: vec![
        builtin_food("Banana", 0.5, Vec3::new(-2.0, 0.3, 2.0)),
        builtin_food("Milk", 0.5, Vec3::new(-1.0, 0.3, 2.0)),
        builtin_food("Fish", 0.5, Vec3::new(0.0, 0.3, 2.0)),
        builtin_food("Bone", 0.5, Vec3::new(1.0, 0.3, 2.0)),
        builtin_food("Cheese", 0.5, Vec3::new(2.0, 0.3, 2.0)),
        builtin_food("Pizza", 0.3, Vec3::new(-2.0, 0.3, 2.5)),
        builtin_food("Hay", 0.4, Vec3::new(-1.0, 0.3, 2.5)),
        builtin_food("Croissant", 0.3, Vec3::new(0.0, 0.3, 2.5)),
        builtin_food("Truck", 0.4, Vec3::new(1.0, 0.3, 2.5)),
        builtin_food("Flower", 0.3, Vec3::new(2.0, 0.3, 2.5)),
    ],
});
