use crate::choice::ChoiceSet;
use crate::turn::state::{Answered, Turn, TurnContext};
use crate::turn as phase;

/// ELI5:
/// ┌──────────────── Turn Transition Flow ──────────────────────────┐
/// │  From         →  Event                →  To                    │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Loading      →  Loaded               →  Offering              │
/// │  Loading      →  LoadFailed           →  Loading (next animal) │
/// │  Offering     →  ChoicesShown         →  Choosing              │
/// │  Choosing     →  Select(correct)      →  Feeding               │
/// │  Choosing     →  Select(incorrect)    →  Rejecting             │
/// │  Choosing     →  Reoffer              →  Offering              │
/// │  Feeding      →  FoodArrived          →  Eating                │
/// │  Eating       →  ClipFinished         →  Celebrating           │
/// │  Celebrating  →  ClipFinished         →  AdvanceReady          │
/// │  Rejecting    →  ClipFinished         →  Offering              │
/// │  AdvanceReady →  Advance              →  Loading (next animal) │
/// └────────────────────────────────────────────────────────────────┘
/// Any other pairing leaves the machine untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded,
    LoadFailed,
    ChoicesShown,
    Select { correct: bool },
    Reoffer,
    FoodArrived,
    ClipFinished,
    Advance,
}

#[derive(Debug, Copy, Clone)]
pub enum TurnStateMachine {
    Loading(Turn<phase::Loading>),
    Offering(Turn<phase::Offering>),
    Choosing(Turn<phase::Choosing>),
    Feeding(Turn<phase::Feeding>),
    Eating(Turn<phase::Eating>),
    Celebrating(Turn<phase::Celebrating>),
    Rejecting(Turn<phase::Rejecting>),
    AdvanceReady(Turn<phase::AdvanceReady>),
}

impl From<Turn<phase::Loading>> for TurnStateMachine {
    fn from(turn: Turn<phase::Loading>) -> Self {
        TurnStateMachine::Loading(turn)
    }
}

impl From<Turn<phase::Offering>> for TurnStateMachine {
    fn from(turn: Turn<phase::Offering>) -> Self {
        TurnStateMachine::Offering(turn)
    }
}

impl From<Turn<phase::Choosing>> for TurnStateMachine {
    fn from(turn: Turn<phase::Choosing>) -> Self {
        TurnStateMachine::Choosing(turn)
    }
}

impl From<Turn<phase::Feeding>> for TurnStateMachine {
    fn from(turn: Turn<phase::Feeding>) -> Self {
        TurnStateMachine::Feeding(turn)
    }
}

impl From<Turn<phase::Eating>> for TurnStateMachine {
    fn from(turn: Turn<phase::Eating>) -> Self {
        TurnStateMachine::Eating(turn)
    }
}

impl From<Turn<phase::Celebrating>> for TurnStateMachine {
    fn from(turn: Turn<phase::Celebrating>) -> Self {
        TurnStateMachine::Celebrating(turn)
    }
}

impl From<Turn<phase::Rejecting>> for TurnStateMachine {
    fn from(turn: Turn<phase::Rejecting>) -> Self {
        TurnStateMachine::Rejecting(turn)
    }
}

impl From<Turn<phase::AdvanceReady>> for TurnStateMachine {
    fn from(turn: Turn<phase::AdvanceReady>) -> Self {
        TurnStateMachine::AdvanceReady(turn)
    }
}

impl From<Answered> for TurnStateMachine {
    fn from(answered: Answered) -> Self {
        match answered {
            Answered::Correct(feeding) => feeding.into(),
            Answered::Incorrect(rejecting) => rejecting.into(),
        }
    }
}

impl TurnStateMachine {
    pub fn new(animal_count: usize) -> Self {
        Turn::<phase::Loading>::new(animal_count).into()
    }

    // consumes self so the previous phase can't be used after the move
    pub fn transition(self, event: Event) -> Self {
        use TurnStateMachine::*;
        match (self, event) {
            (Loading(turn), Event::Loaded) => turn.loaded().into(),
            (Loading(turn), Event::LoadFailed) => turn.load_failed().into(),
            (Offering(turn), Event::ChoicesShown) => turn.choices_shown().into(),
            (Choosing(turn), Event::Select { correct }) => turn.select(correct).into(),
            (Choosing(turn), Event::Reoffer) => turn.reoffer().into(),
            (Feeding(turn), Event::FoodArrived) => turn.arrived().into(),
            (Eating(turn), Event::ClipFinished) => turn.finished().into(),
            (Celebrating(turn), Event::ClipFinished) => turn.finished().into(),
            (Rejecting(turn), Event::ClipFinished) => turn.finished().into(),
            (AdvanceReady(turn), Event::Advance) => turn.advance().into(),
            _ => self,
        }
    }

    pub fn context(&self) -> &TurnContext {
        use TurnStateMachine::*;
        match self {
            Loading(turn) => turn.context(),
            Offering(turn) => turn.context(),
            Choosing(turn) => turn.context(),
            Feeding(turn) => turn.context(),
            Eating(turn) => turn.context(),
            Celebrating(turn) => turn.context(),
            Rejecting(turn) => turn.context(),
            AdvanceReady(turn) => turn.context(),
        }
    }

    pub fn phase_name(&self) -> &'static str {
        use TurnStateMachine::*;
        match self {
            Loading(turn) => turn.phase_name(),
            Offering(turn) => turn.phase_name(),
            Choosing(turn) => turn.phase_name(),
            Feeding(turn) => turn.phase_name(),
            Eating(turn) => turn.phase_name(),
            Celebrating(turn) => turn.phase_name(),
            Rejecting(turn) => turn.phase_name(),
            AdvanceReady(turn) => turn.phase_name(),
        }
    }

    /// The input gate. Closed during every load and every one-shot animation.
    pub fn accepting_input(&self) -> bool {
        use TurnStateMachine::*;
        match self {
            Loading(turn) => turn.accepts_input(),
            Offering(turn) => turn.accepts_input(),
            Choosing(turn) => turn.accepts_input(),
            Feeding(turn) => turn.accepts_input(),
            Eating(turn) => turn.accepts_input(),
            Celebrating(turn) => turn.accepts_input(),
            Rejecting(turn) => turn.accepts_input(),
            AdvanceReady(turn) => turn.accepts_input(),
        }
    }

    pub fn animal_index(&self) -> usize {
        self.context().animal_index()
    }
}

/// Snapshot of the session's turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub current_animal_index: usize,
    pub accepting_input: bool,
    pub pending_choice_set: Option<ChoiceSet>,
}
