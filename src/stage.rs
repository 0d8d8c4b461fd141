use crate::browser::completion;
use crate::catalog::{AnimalId, AnimalRecord, FoodId};
use crate::engine::{ChoiceSlot, ClipRole, Surface, Vec3};
use crate::error::{AssetLoadError, ChoicesNotShown, MissingAnimationClip};
use async_trait::async_trait;
use log::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Scene controller owned by the page. It wraps the 3D engine: loading,
    /// picking and clip playback all happen on the JS side.
    ///
    /// Every `done` argument is a one shot callback that must be invoked
    /// exactly once with a boolean, `true` meaning success.
    #[derive(Debug, Clone)]
    pub type Stage;

    #[wasm_bindgen(method, js_name = loadAnimal)]
    fn load_animal(this: &Stage, animal: JsValue, done: &JsValue);

    /// Returns `false`, without ever calling `done`, when the clip is absent.
    #[wasm_bindgen(method, js_name = playClip)]
    fn play_clip(this: &Stage, clip: &str, looping: bool, done: &JsValue) -> bool;

    #[wasm_bindgen(method, js_name = showChoices)]
    fn show_choices(this: &Stage, slots: JsValue, done: &JsValue);

    #[wasm_bindgen(method, js_name = retractChoices)]
    fn retract_choices(this: &Stage, keep: Option<String>);

    #[wasm_bindgen(method, js_name = hideFood)]
    fn hide_food(this: &Stage, food: &str);

    #[wasm_bindgen(method, js_name = moveFood)]
    fn move_food(this: &Stage, food: &str, offset: JsValue, done: &JsValue);

    #[wasm_bindgen(method, js_name = setAdvanceVisible)]
    fn set_advance_visible(this: &Stage, visible: bool);

    #[wasm_bindgen(method, js_name = reportError)]
    pub fn report_error(this: &Stage, message: &str);
}

/// `Surface` implemented on top of a JS `Stage`.
pub struct StageSurface {
    stage: Stage,
    animal: Option<AnimalId>,
}

impl StageSurface {
    pub fn new(stage: Stage) -> Self {
        StageSurface {
            stage,
            animal: None,
        }
    }

    fn missing(&self, role: ClipRole) -> MissingAnimationClip {
        MissingAnimationClip {
            animal: self
                .animal
                .clone()
                .unwrap_or_else(|| AnimalId::new("<none>")),
            role,
        }
    }
}

#[async_trait(?Send)]
impl Surface for StageSurface {
    async fn load_and_show_animal(&mut self, animal: &AnimalRecord) -> Result<(), AssetLoadError> {
        let load_error = |reason: String| AssetLoadError {
            animal: animal.id.clone(),
            reason,
        };
        let request =
            serde_wasm_bindgen::to_value(animal).map_err(|err| load_error(err.to_string()))?;

        let (done, finished) = completion();
        self.stage.load_animal(request, done.as_ref());
        done.forget();

        // a dropped sender (Canceled) counts as a failed load
        if finished.await.unwrap_or(false) {
            self.animal = Some(animal.id.clone());
            Ok(())
        } else {
            self.animal = None;
            Err(load_error(format!("stage could not load {}", animal.model)))
        }
    }

    async fn play_animal_clip(
        &mut self,
        role: ClipRole,
        clip: &str,
        looping: bool,
    ) -> Result<(), MissingAnimationClip> {
        let (done, finished) = completion();
        let found = self.stage.play_clip(clip, looping, done.as_ref());
        done.forget();

        if !found {
            return Err(self.missing(role));
        }
        if !looping {
            let _ = finished.await;
        }
        Ok(())
    }

    async fn show_choice_slots(&mut self, slots: &[ChoiceSlot]) -> Result<(), ChoicesNotShown> {
        let request = serde_wasm_bindgen::to_value(slots).map_err(|err| ChoicesNotShown {
            reason: err.to_string(),
        })?;
        let (done, finished) = completion();
        self.stage.show_choices(request, done.as_ref());
        done.forget();

        if finished.await.unwrap_or(false) {
            Ok(())
        } else {
            Err(ChoicesNotShown {
                reason: format!("stage could not show {} slots", slots.len()),
            })
        }
    }

    fn retract_all_choices(&mut self) {
        self.stage.retract_choices(None);
    }

    fn retract_choices_except(&mut self, keep: &FoodId) {
        self.stage.retract_choices(Some(keep.to_string()));
    }

    fn hide_food(&mut self, food: &FoodId) {
        self.stage.hide_food(food.as_str());
    }

    async fn move_food_toward(&mut self, food: &FoodId, offset: Vec3) {
        let offset = match serde_wasm_bindgen::to_value(&offset) {
            Ok(offset) => offset,
            Err(err) => {
                warn!("Skipping move of {} : {}", food, err);
                return;
            }
        };
        let (done, finished) = completion();
        self.stage.move_food(food.as_str(), offset, done.as_ref());
        done.forget();
        let _ = finished.await;
    }

    fn show_advance_affordance(&mut self) {
        self.stage.set_advance_visible(true);
    }

    fn hide_advance_affordance(&mut self) {
        self.stage.set_advance_visible(false);
    }
}
