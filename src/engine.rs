use crate::catalog::{AnimalRecord, FoodId};
use crate::error::{AssetLoadError, ChoicesNotShown, MissingAnimationClip};
// ELI5: web assembly is a single threaded environment, so the surface is
// never shared across threads and its futures don't need to be Send
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Vec3 { x: v, y: v, z: v }
    }
}

/// Logical animation roles. Each animal maps them to concrete clip names
/// when the catalog is built, see `ClipSet`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ClipRole {
    Idle,
    Eat,
    Happy,
    Reject,
}

/// One pickable food placed on the choice shelf.
/// `index` is the slot the food sits in, not its position in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceSlot {
    pub index: usize,
    pub food: FoodId,
    pub model: String,
    pub position: Vec3,
    pub scale: Vec3,
}

/// TABLE
/// ┌──────────────────────── Surface Contract ──────────────────────────────┐
/// │  Request                    │  Completes when                          │
/// ├─────────────────────────────┼──────────────────────────────────────────┤
/// │  load_and_show_animal       │  model is in the scene (or failed)       │
/// │  play_animal_clip (loop)    │  clip has started                        │
/// │  play_animal_clip (once)    │  clip has ended                          │
/// │  show_choice_slots          │  every slot is visible and pickable (or  │
/// │                             │  failed, which ends the session)         │
/// │  move_food_toward           │  food reached animal position + offset   │
/// │  everything else            │  immediately                             │
/// └─────────────────────────────┴──────────────────────────────────────────┘
///
/// The sequencer awaits every asynchronous request before it issues the
/// next one, so at most one request is in flight at a time.
#[async_trait(?Send)]
pub trait Surface {
    /// Dispose of the previous animal and bring `animal` into the scene.
    async fn load_and_show_animal(&mut self, animal: &AnimalRecord) -> Result<(), AssetLoadError>;

    /// Play `clip` on the current animal. A clip the model doesn't carry
    /// resolves to `MissingAnimationClip` right away.
    async fn play_animal_clip(
        &mut self,
        role: ClipRole,
        clip: &str,
        looping: bool,
    ) -> Result<(), MissingAnimationClip>;

    /// Show one pickable representation per slot. Slots may repeat a food
    /// when the catalog is too small to fill the shelf with distinct ones.
    /// On error nothing is pickable and the sequencer keeps input closed.
    async fn show_choice_slots(&mut self, slots: &[ChoiceSlot]) -> Result<(), ChoicesNotShown>;

    /// Hide every choice and make it unpickable.
    fn retract_all_choices(&mut self);

    /// Like `retract_all_choices` but leaves `keep` visible, unpickable.
    fn retract_choices_except(&mut self, keep: &FoodId);

    fn hide_food(&mut self, food: &FoodId);

    /// Animate `food` to the current animal's position plus `offset`.
    async fn move_food_toward(&mut self, food: &FoodId, offset: Vec3);

    fn show_advance_affordance(&mut self);

    fn hide_advance_affordance(&mut self);
}
