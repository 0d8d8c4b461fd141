//! All code relating to individual phases lives here and keeps illegal
//! transitions unrepresentable: a `Turn<S>` can only become another phase
//! through the methods implemented for `S`.
//! - PUBLIC  : Turn and TurnContext
//! - PRIVATE : their fields, only readable through `context()`

use crate::turn::{
    AdvanceReady, Celebrating, Choosing, Eating, Feeding, Loading, Offering, Phase, Rejecting,
};

pub enum Answered {
    Correct(Turn<Feeding>),
    Incorrect(Turn<Rejecting>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Data carried across every phase of the session
pub struct TurnContext {
    animal_index: usize,
    animal_count: usize,
    wrong_attempts: u32,
    failed_loads: usize,
}

impl TurnContext {
    /// Position in the animal catalog, already wrapped.
    pub fn animal_index(&self) -> usize {
        self.animal_index
    }

    pub fn animal_count(&self) -> usize {
        self.animal_count
    }

    /// Wrong answers given for the current animal.
    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    /// Consecutive animals that failed to load.
    pub fn failed_loads(&self) -> usize {
        self.failed_loads
    }

    fn next_animal(mut self) -> Self {
        self.animal_index = (self.animal_index + 1) % self.animal_count;
        self.wrong_attempts = 0;
        self
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Turn<S> {
    context: TurnContext,
    // phantom marker, only differentiates phases at compile time
    _phase: S,
}

impl<S: Phase> Turn<S> {
    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    pub fn phase_name(&self) -> &'static str {
        S::NAME
    }

    pub fn accepts_input(&self) -> bool {
        S::ACCEPTS_INPUT
    }
}

impl Turn<Loading> {
    /// First turn of a session. `animal_count` of zero is clamped to one so
    /// the index arithmetic stays defined; `Catalog` never has zero animals.
    pub fn new(animal_count: usize) -> Self {
        Turn {
            context: TurnContext {
                animal_index: 0,
                animal_count: animal_count.max(1),
                wrong_attempts: 0,
                failed_loads: 0,
            },
            _phase: Loading,
        }
    }

    pub fn loaded(mut self) -> Turn<Offering> {
        self.context.failed_loads = 0;
        Turn {
            context: self.context,
            _phase: Offering,
        }
    }

    /// Skip the animal that failed to load, no player involvement.
    pub fn load_failed(mut self) -> Turn<Loading> {
        self.context.failed_loads += 1;
        Turn {
            context: self.context.next_animal(),
            _phase: Loading,
        }
    }
}

impl Turn<Offering> {
    pub fn choices_shown(self) -> Turn<Choosing> {
        Turn {
            context: self.context,
            _phase: Choosing,
        }
    }
}

impl Turn<Choosing> {
    pub fn select(mut self, correct: bool) -> Answered {
        if correct {
            Answered::Correct(Turn {
                context: self.context,
                _phase: Feeding,
            })
        } else {
            self.context.wrong_attempts += 1;
            Answered::Incorrect(Turn {
                context: self.context,
                _phase: Rejecting,
            })
        }
    }

    /// Replace the live choices with a fresh set for the same animal.
    pub fn reoffer(self) -> Turn<Offering> {
        Turn {
            context: self.context,
            _phase: Offering,
        }
    }
}

impl Turn<Feeding> {
    pub fn arrived(self) -> Turn<Eating> {
        Turn {
            context: self.context,
            _phase: Eating,
        }
    }
}

impl Turn<Eating> {
    pub fn finished(self) -> Turn<Celebrating> {
        Turn {
            context: self.context,
            _phase: Celebrating,
        }
    }
}

impl Turn<Celebrating> {
    pub fn finished(self) -> Turn<AdvanceReady> {
        Turn {
            context: self.context,
            _phase: AdvanceReady,
        }
    }
}

impl Turn<Rejecting> {
    pub fn finished(self) -> Turn<Offering> {
        Turn {
            context: self.context,
            _phase: Offering,
        }
    }
}

impl Turn<AdvanceReady> {
    pub fn advance(self) -> Turn<Loading> {
        Turn {
            context: self.context.next_animal(),
            _phase: Loading,
        }
    }
}
