use crate::catalog::{AnimalRecord, Catalog, FoodId};
use crate::choice::ChoiceSet;
use crate::config::SessionConfig;
use crate::engine::{ClipRole, Surface};
use crate::error::{InputIgnored, SessionError};
use crate::turn::{Event, TurnState, TurnStateMachine};
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;

/// Host events, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Select(FoodId),
    Advance,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// TABLE
/// ┌───────────────────── Turn Sequencer Overview ───────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐  Input   ┌─────────────┐ requests ┌─────────────┐    │
/// │    │    host     ├─────────►│  Sequencer  ├─────────►│   Surface   │    │
/// │    │ pick/click  │ channel  │  (game.rs)  │◄─────────┤  (engine)   │    │
/// │    └─────────────┘          └──────┬──────┘ awaited  └─────────────┘    │
/// │                                    │                                    │
/// │                              ┌─────┴──────┐                             │
/// │                              │ TurnState  │                             │
/// │                              │  Machine   │                             │
/// │                              └────────────┘                             │
/// │                                                                         │
/// ├──────────────────────── One Cycle ──────────────────────────────────────┤
/// │                                                                         │
/// │  1. present_animal   load model, loop idle clip                         │
/// │  2. offer_choices    build a ChoiceSet, show slots, open the gate       │
/// │  3. handle_selection close the gate, then                               │
/// │         ├─► correct   : move food → eat → happy → advance affordance    │
/// │         └─► incorrect : reject → back to 2 with a fresh shuffle         │
/// │  4. advance          next animal (wrapping), back to 1                  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
pub struct Sequencer<S: Surface> {
    // shared with the records borrowed across awaits, see `present_animal`
    catalog: Rc<Catalog>,
    config: SessionConfig,
    surface: S,
    rng: StdRng,
    state: TurnStateMachine,
    pending: Option<ChoiceSet>,
}

impl<S: Surface> Sequencer<S> {
    /// Start at the first animal and run until its choices are on offer.
    ///
    /// The catalog was validated when it was built, so this only fails when
    /// every animal fails to load or the surface cannot show the choices.
    pub async fn start_session(
        catalog: Catalog,
        surface: S,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            "Starting session with {} animals and {} foods",
            catalog.list_animals().len(),
            catalog.list_foods().len()
        );
        let mut sequencer = Sequencer {
            state: TurnStateMachine::new(catalog.list_animals().len()),
            catalog: Rc::new(catalog),
            config,
            surface,
            rng,
            pending: None,
        };
        sequencer.present_animal().await?;
        Ok(sequencer)
    }

    /// Parse and validate a JSON catalog, then start. A bad catalog is
    /// reported before the surface is touched.
    pub async fn start_from_json(
        json: &str,
        surface: S,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let catalog = Catalog::from_json(json)?;
        Self::start_session(catalog, surface, config).await
    }

    pub async fn present_animal(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, TurnStateMachine::Loading(_)) {
            return Err(InputIgnored::new("present animal", self.state.phase_name()).into());
        }

        let catalog = Rc::clone(&self.catalog);
        loop {
            self.surface.hide_advance_affordance();
            self.surface.retract_all_choices();
            self.pending = None;

            let animal = catalog.animal(self.state.animal_index());
            info!("Loading animal: {}", animal.display_name);

            match self.surface.load_and_show_animal(animal).await {
                Ok(()) => {
                    self.state = self.state.transition(Event::Loaded);
                    self.play_clip(animal, ClipRole::Idle, true).await;
                    self.offer_choices().await?;
                    return Ok(());
                }
                Err(err) => {
                    warn!("{err}. Skipping to the next animal");
                    self.state = self.state.transition(Event::LoadFailed);
                    let failed = self.state.context().failed_loads();
                    if failed >= catalog.list_animals().len() {
                        return Err(SessionError::NoPlayableAnimals { attempts: failed });
                    }
                }
            }
        }
    }

    /// Replace whatever is on the shelf with a freshly shuffled set for the
    /// current animal. The gate opens once every slot is shown, and stays
    /// closed if the surface could not show them.
    pub async fn offer_choices(&mut self) -> Result<ChoiceSet, SessionError> {
        if matches!(self.state, TurnStateMachine::Choosing(_)) {
            self.state = self.state.transition(Event::Reoffer);
        }
        if !matches!(self.state, TurnStateMachine::Offering(_)) {
            return Err(InputIgnored::new("offer choices", self.state.phase_name()).into());
        }

        self.surface.retract_all_choices();
        self.pending = None;

        let catalog = Rc::clone(&self.catalog);
        let animal = catalog.animal(self.state.animal_index());
        let choices = ChoiceSet::build(&catalog, &animal.correct_food, &mut self.rng);
        let slots = choices.slots(&catalog, &self.config.slots);
        debug!("Offering {:?} to {}", choices.options(), animal.display_name);

        if let Err(err) = self.surface.show_choice_slots(&slots).await {
            self.surface.retract_all_choices();
            return Err(err.into());
        }
        self.pending = Some(choices.clone());
        self.state = self.state.transition(Event::ChoicesShown);
        Ok(choices)
    }

    pub async fn handle_selection(&mut self, food: &FoodId) -> Result<Verdict, SessionError> {
        if !matches!(self.state, TurnStateMachine::Choosing(_)) {
            return Err(InputIgnored::new("selection", self.state.phase_name()).into());
        }
        let on_offer = self
            .pending
            .as_ref()
            .is_some_and(|choices| choices.contains(food));
        if !on_offer {
            return Err(
                InputIgnored::new("selection of a food not on offer", self.state.phase_name())
                    .into(),
            );
        }

        let catalog = Rc::clone(&self.catalog);
        let animal = catalog.animal(self.state.animal_index());
        let correct = animal.correct_food == *food;

        // close the gate before the first await
        self.state = self.state.transition(Event::Select { correct });
        self.pending = None;
        self.surface.retract_choices_except(food);

        if correct {
            info!("Correct! {} gets {}", animal.display_name, food);
            self.surface
                .move_food_toward(food, animal.eat_target_offset)
                .await;
            self.state = self.state.transition(Event::FoodArrived);

            self.play_clip(animal, ClipRole::Eat, false).await;
            self.surface.hide_food(food);
            self.state = self.state.transition(Event::ClipFinished);

            self.play_clip(animal, ClipRole::Happy, false).await;
            self.surface.show_advance_affordance();
            self.state = self.state.transition(Event::ClipFinished);
            Ok(Verdict::Correct)
        } else {
            info!(
                "Incorrect! {} doesn't want {} (attempt {})",
                animal.display_name,
                food,
                self.state.context().wrong_attempts()
            );
            self.surface.hide_food(food);
            self.play_clip(animal, ClipRole::Reject, false).await;
            self.state = self.state.transition(Event::ClipFinished);
            self.offer_choices().await?;
            Ok(Verdict::Incorrect)
        }
    }

    pub async fn advance(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, TurnStateMachine::AdvanceReady(_)) {
            return Err(InputIgnored::new("advance", self.state.phase_name()).into());
        }
        self.surface.hide_advance_affordance();
        self.state = self.state.transition(Event::Advance);
        self.present_animal().await
    }

    /// Feed host inputs to the sequencer until the sender side is dropped.
    ///
    /// Each input runs to completion before the next is read. Inputs that
    /// pile up meanwhile arrived while the gate was closed and are dropped.
    /// So are those already queued when this starts, which were sent while
    /// the session was still being set up.
    pub async fn run(&mut self, mut inputs: UnboundedReceiver<Input>) -> Result<(), SessionError> {
        Self::discard_stale(&mut inputs);
        while let Some(input) = inputs.next().await {
            let result = match input {
                Input::Select(food) => self.handle_selection(&food).await.map(|_| ()),
                Input::Advance => self.advance().await,
            };
            match result {
                Err(SessionError::Ignored(ignored)) => debug!("{ignored}"),
                other => other?,
            }
            Self::discard_stale(&mut inputs);
        }
        Ok(())
    }

    fn discard_stale(inputs: &mut UnboundedReceiver<Input>) {
        while let Ok(Some(input)) = inputs.try_next() {
            debug!("Dropping {input:?}, it arrived while busy");
        }
    }

    async fn play_clip(&mut self, animal: &AnimalRecord, role: ClipRole, looping: bool) {
        let played = match animal.clip(role) {
            Ok(clip) => self.surface.play_animal_clip(role, clip, looping).await,
            Err(missing) => Err(missing),
        };
        if let Err(missing) = played {
            debug!("{missing}, treating the step as done");
        }
    }

    pub fn turn_state(&self) -> TurnState {
        TurnState {
            current_animal_index: self.state.animal_index(),
            accepting_input: self.state.accepting_input(),
            pending_choice_set: self.pending.clone(),
        }
    }

    pub fn machine(&self) -> &TurnStateMachine {
        &self.state
    }

    pub fn current_animal(&self) -> &AnimalRecord {
        self.catalog.animal(self.state.animal_index())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
