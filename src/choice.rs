use crate::catalog::{Catalog, FoodId};
use crate::engine::{ChoiceSlot, Vec3};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of foods offered per turn: the correct one plus four distractors.
pub const CHOICE_COUNT: usize = 5;

/// The foods offered for one turn, in display order.
///
/// Always holds the correct food exactly once. Distractors are distinct
/// unless the catalog has fewer than `CHOICE_COUNT - 1` of them, in which
/// case they repeat to fill the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    options: Vec<FoodId>,
}

impl ChoiceSet {
    /// Build a fresh set for `correct`. `correct` must be a food of
    /// `catalog`, which `Catalog` guarantees for every animal's food.
    pub fn build<R: Rng + ?Sized>(catalog: &Catalog, correct: &FoodId, rng: &mut R) -> Self {
        let mut pool: Vec<&FoodId> = catalog
            .list_foods()
            .iter()
            .map(|food| &food.id)
            .filter(|id| *id != correct)
            .collect();
        pool.shuffle(rng);
        pool.truncate(CHOICE_COUNT - 1);

        let mut options = Vec::with_capacity(CHOICE_COUNT);
        options.push(correct.clone());
        options.extend(pool.iter().map(|id| (*id).clone()));

        // degenerate catalogs: cycle the distractors we already have
        let mut repeats = pool.iter().cycle();
        while options.len() < CHOICE_COUNT {
            match repeats.next() {
                Some(id) => options.push((*id).clone()),
                None => break,
            }
        }

        options.shuffle(rng);
        ChoiceSet { options }
    }

    pub fn options(&self) -> &[FoodId] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, food: &FoodId) -> bool {
        self.options.contains(food)
    }

    pub fn count_of(&self, food: &FoodId) -> usize {
        self.options.iter().filter(|id| *id == food).count()
    }

    /// Place each option on the shelf. Choice `i` goes to `layout[i]`, or
    /// to the food's own slot hint when the layout is shorter.
    pub fn slots(&self, catalog: &Catalog, layout: &[Vec3]) -> Vec<ChoiceSlot> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let food = catalog.food(id)?;
                Some(ChoiceSlot {
                    index,
                    food: id.clone(),
                    model: food.model.clone(),
                    position: layout.get(index).copied().unwrap_or(food.slot_hint),
                    scale: food.scale,
                })
            })
            .collect()
    }
}
