use crate::engine::Vec3;
use serde::{Deserialize, Serialize};

/// Session settings supplied by the host at startup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Fixed seed for reproducible shuffles. `None` seeds from the platform.
    pub seed: Option<u64>,
    /// Choice shelf positions, index aligned with the offered choices.
    pub slots: Vec<Vec3>,
    pub catalog_url: String,
}

impl SessionConfig {
    pub const CATALOG_URL: &'static str = "catalog.json";

    pub fn seeded(seed: u64) -> Self {
        SessionConfig {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            seed: None,
            slots: vec![
                Vec3::new(-2.0, 0.3, 2.5),
                Vec3::new(-1.0, 0.3, 2.5),
                Vec3::new(0.0, 0.3, 2.5),
                Vec3::new(1.0, 0.3, 2.5),
                Vec3::new(2.0, 0.3, 2.5),
            ],
            catalog_url: Self::CATALOG_URL.to_string(),
        }
    }
}
