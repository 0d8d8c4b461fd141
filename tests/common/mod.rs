#![allow(dead_code)]

use async_trait::async_trait;
use feed_the_animal::{
    AnimalRecord, AssetLoadError, Catalog, ChoiceSlot, ChoicesNotShown, ClipRole, FoodId,
    MissingAnimationClip, SessionConfig, Surface, Vec3,
};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadAnimal(String),
    PlayClip { role: ClipRole, looping: bool },
    ShowChoices(Vec<String>),
    RetractAll,
    RetractExcept(String),
    HideFood(String),
    MoveFood(String, Vec3),
    ShowAdvance,
    HideAdvance,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Food moves parked by a holding surface, finished one at a time by `release`.
#[derive(Clone, Default)]
pub struct HeldMoves(Rc<RefCell<VecDeque<oneshot::Sender<()>>>>);

impl HeldMoves {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn release(&self) {
        let held = self.0.borrow_mut().pop_front().expect("no move is held");
        held.send(()).unwrap();
    }
}

/// In-memory surface: every request is recorded and completes immediately,
/// except food moves when built with `holding_moves`.
#[derive(Default)]
pub struct ScriptedSurface {
    pub calls: CallLog,
    failing_animals: HashSet<String>,
    missing_clips: HashSet<ClipRole>,
    choices_fail_from: Option<usize>,
    shown: usize,
    held_moves: Option<HeldMoves>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, animal: &str) -> Self {
        self.failing_animals.insert(animal.to_string());
        self
    }

    pub fn without_clip(mut self, role: ClipRole) -> Self {
        self.missing_clips.insert(role);
        self
    }

    /// The `nth` show of the choice shelf (counting from 1) and every later
    /// one fails.
    pub fn failing_choices_from(mut self, nth: usize) -> Self {
        self.choices_fail_from = Some(nth);
        self
    }

    pub fn holding_moves(mut self) -> (Self, HeldMoves) {
        let held = HeldMoves::default();
        self.held_moves = Some(held.clone());
        (self, held)
    }

    pub fn log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl Surface for ScriptedSurface {
    async fn load_and_show_animal(&mut self, animal: &AnimalRecord) -> Result<(), AssetLoadError> {
        self.record(Call::LoadAnimal(animal.id.to_string()));
        if self.failing_animals.contains(animal.id.as_str()) {
            return Err(AssetLoadError {
                animal: animal.id.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    async fn play_animal_clip(
        &mut self,
        role: ClipRole,
        _clip: &str,
        looping: bool,
    ) -> Result<(), MissingAnimationClip> {
        if self.missing_clips.contains(&role) {
            return Err(MissingAnimationClip {
                animal: "scripted".into(),
                role,
            });
        }
        self.record(Call::PlayClip { role, looping });
        Ok(())
    }

    async fn show_choice_slots(&mut self, slots: &[ChoiceSlot]) -> Result<(), ChoicesNotShown> {
        self.shown += 1;
        if self.choices_fail_from.is_some_and(|nth| self.shown >= nth) {
            return Err(ChoicesNotShown {
                reason: "scripted failure".to_string(),
            });
        }
        self.record(Call::ShowChoices(
            slots.iter().map(|slot| slot.food.to_string()).collect(),
        ));
        Ok(())
    }

    fn retract_all_choices(&mut self) {
        self.record(Call::RetractAll);
    }

    fn retract_choices_except(&mut self, keep: &FoodId) {
        self.record(Call::RetractExcept(keep.to_string()));
    }

    fn hide_food(&mut self, food: &FoodId) {
        self.record(Call::HideFood(food.to_string()));
    }

    async fn move_food_toward(&mut self, food: &FoodId, offset: Vec3) {
        self.record(Call::MoveFood(food.to_string(), offset));
        if let Some(held) = &self.held_moves {
            let (tx, rx) = oneshot::channel();
            held.0.borrow_mut().push_back(tx);
            let _ = rx.await;
        }
    }

    fn show_advance_affordance(&mut self) {
        self.record(Call::ShowAdvance);
    }

    fn hide_advance_affordance(&mut self) {
        self.record(Call::HideAdvance);
    }
}

pub fn count(log: &CallLog, wanted: impl Fn(&Call) -> bool) -> usize {
    log.borrow().iter().filter(|call| wanted(call)).count()
}

pub fn config() -> SessionConfig {
    SessionConfig::seeded(7)
}

fn animal_json(id: &str, food: &str) -> String {
    format!(
        r#"{{ "id": "{id}", "displayName": "{id}", "model": "models/{id}.glb", "correctFood": "{food}",
             "clips": {{ "idle": "idle", "eat": "Eating", "happy": "Gallop", "reject": "Death" }},
             "eatTargetOffset": {{ "x": 0.0, "y": 1.2, "z": 0.5 }} }}"#
    )
}

fn food_json(id: &str) -> String {
    format!(r#"{{ "id": "{id}", "displayName": "{id}", "model": "models/{id}.glb" }}"#)
}

pub fn catalog_json(animals: &[(&str, &str)], foods: &[&str]) -> String {
    let animals: Vec<String> = animals.iter().map(|(id, food)| animal_json(id, food)).collect();
    let foods: Vec<String> = foods.iter().map(|id| food_json(id)).collect();
    format!(
        r#"{{ "animals": [{}], "foods": [{}] }}"#,
        animals.join(","),
        foods.join(",")
    )
}

pub fn catalog(animals: &[(&str, &str)], foods: &[&str]) -> Catalog {
    Catalog::from_json(&catalog_json(animals, foods)).unwrap()
}

/// Monkey eats Banana, only Banana and Milk exist.
pub fn monkey_catalog() -> Catalog {
    catalog(&[("monkey", "banana")], &["banana", "milk"])
}

pub fn monkey_dog_catalog() -> Catalog {
    catalog(
        &[("monkey", "banana"), ("dog", "bone")],
        &["banana", "bone", "milk", "fish", "cheese"],
    )
}
