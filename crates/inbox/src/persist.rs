//! Persistence of accounts, settings and filter selections
//!
//! State lives in one JSON file under the shared config directory.
//! Notifications themselves are never persisted; every launch starts
//! from a fresh fetch round.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{Account, FilterSettings, Settings};

/// Name of the state file within the config directory
pub const STATE_FILE: &str = "state.json";

/// Everything that survives a restart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub accounts: Vec<Account>,
    pub settings: Settings,
    pub filters: FilterSettings,
}

/// Load persisted state, falling back to defaults when the file does
/// not exist yet
pub fn load_state() -> Result<PersistedState> {
    if !config::document_exists(STATE_FILE) {
        return Ok(PersistedState::default());
    }
    config::read_document(STATE_FILE)
}

/// Write the state file
pub fn save_state(state: &PersistedState) -> Result<()> {
    config::write_document(STATE_FILE, state)
}
