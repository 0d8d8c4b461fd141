// ==================== Imports ====================
use anyhow::{anyhow, Context, Result};
use futures::channel::mpsc::{self, UnboundedSender};
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

mod browser;
pub mod catalog;
pub mod choice;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod stage;
pub mod turn;

pub use catalog::{AnimalId, AnimalRecord, Catalog, ClipSet, FoodId, FoodRecord};
pub use choice::{ChoiceSet, CHOICE_COUNT};
pub use config::SessionConfig;
pub use engine::{ChoiceSlot, ClipRole, Surface, Vec3};
pub use error::{
    AssetLoadError, ChoicesNotShown, ConfigurationError, InputIgnored, MissingAnimationClip,
    SessionError,
};
pub use game::{Input, Sequencer, Verdict};
pub use stage::{Stage, StageSurface};
pub use turn::{TurnState, TurnStateMachine};

// ==================== Host Handle ====================
/// Returned to the page so pick and click handlers can reach the session.
#[wasm_bindgen]
pub struct GameHandle {
    inputs: UnboundedSender<Input>,
}

#[wasm_bindgen]
impl GameHandle {
    /// A food was picked in the scene.
    pub fn select(&self, food: String) {
        self.send(Input::Select(FoodId::new(food)));
    }

    /// The "next animal" control was clicked.
    pub fn advance(&self) {
        self.send(Input::Advance);
    }
}

impl GameHandle {
    fn send(&self, input: Input) {
        if let Err(err) = self.inputs.unbounded_send(input) {
            warn!("Session has ended, dropping {:?}", err.into_inner());
        }
    }
}

// ==================== Main Functions ====================
/// Main entry for the Webassembly module
/// - installs panic hook + console logger
/// - fetches the catalog (built-in one if there is none to fetch)
/// - spawns the session, which drives `stage` until the page goes away
#[wasm_bindgen(js_name = startGame)]
pub fn start_game(stage: Stage, config: JsValue) -> Result<GameHandle, JsValue> {
    init_logging();

    let config: SessionConfig = if config.is_undefined() || config.is_null() {
        SessionConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let (tx, rx) = mpsc::unbounded();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = play(stage.clone(), config, rx).await {
            error!("{:#}", err);
            stage.report_error(&format!("{:#}", err));
        }
    });

    Ok(GameHandle { inputs: tx })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        // a second start on the same page keeps the first logger
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

async fn play(stage: Stage, config: SessionConfig, inputs: mpsc::UnboundedReceiver<Input>) -> Result<()> {
    let catalog = load_catalog(&config.catalog_url).await?;
    let mut sequencer = Sequencer::start_session(catalog, StageSurface::new(stage), config)
        .await
        .context("Could not start the session")?;
    sequencer.run(inputs).await.context("Session stopped")?;
    info!("Session closed");
    Ok(())
}

/// A catalog that can't be fetched falls back to the built-in one; a
/// catalog that is fetched but invalid stops the game before it starts.
async fn load_catalog(url: &str) -> Result<Catalog> {
    match browser::fetch_json(url).await {
        Ok(value) => serde_wasm_bindgen::from_value::<Catalog>(value)
            .map_err(|err| anyhow!("Invalid catalog {} : {}", url, err)),
        Err(err) => {
            warn!("{:#}. Using the built-in catalog", err);
            Ok(Catalog::builtin().clone())
        }
    }
}
