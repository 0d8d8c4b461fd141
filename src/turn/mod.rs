// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                           turn/ layout                                   │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ mod.rs            │ Phase trait + one marker struct per phase            │
// │ state.rs          │ Turn<S>: typed transitions, shared TurnContext       │
// │ machine.rs        │ TurnStateMachine: runtime enum driven by Event       │
// └───────────────────┴──────────────────────────────────────────────────────┘
pub mod machine;
pub mod state;

pub use machine::{Event, TurnState, TurnStateMachine};

/// Compile time facts about a phase.
pub trait Phase {
    const NAME: &'static str;
    /// Whether a selection or advance request may be honoured in this phase.
    const ACCEPTS_INPUT: bool = false;
}

/// Animal model is being requested.
#[derive(Debug, Copy, Clone)]
pub struct Loading;

/// Choice slots requested, not yet all shown.
#[derive(Debug, Copy, Clone)]
pub struct Offering;

/// Choices are live and pickable.
#[derive(Debug, Copy, Clone)]
pub struct Choosing;

/// Correct food travelling to the animal.
#[derive(Debug, Copy, Clone)]
pub struct Feeding;

#[derive(Debug, Copy, Clone)]
pub struct Eating;

#[derive(Debug, Copy, Clone)]
pub struct Celebrating;

#[derive(Debug, Copy, Clone)]
pub struct Rejecting;

/// Waiting for the player to move on to the next animal.
#[derive(Debug, Copy, Clone)]
pub struct AdvanceReady;

impl Phase for Loading {
    const NAME: &'static str = "loading";
}

impl Phase for Offering {
    const NAME: &'static str = "offering";
}

impl Phase for Choosing {
    const NAME: &'static str = "choosing";
    const ACCEPTS_INPUT: bool = true;
}

impl Phase for Feeding {
    const NAME: &'static str = "feeding";
}

impl Phase for Eating {
    const NAME: &'static str = "eating";
}

impl Phase for Celebrating {
    const NAME: &'static str = "celebrating";
}

impl Phase for Rejecting {
    const NAME: &'static str = "rejecting";
}

impl Phase for AdvanceReady {
    const NAME: &'static str = "advance ready";
    const ACCEPTS_INPUT: bool = true;
}
