use shared::state::ContractState;
use storage::SnapshotSlot;
use tracing::{debug, info, warn};

use crate::error::LoadError;

pub const DEFAULT_SLOT_KEY: &str = "contract-platform-db";

/// Writes are refused until [`Persistence::load`] has finished, so an empty
/// state can never overwrite a snapshot that has not been read yet.
pub struct Persistence<S> {
    slot: S,
    key: String,
    loaded: bool,
}

impl<S: SnapshotSlot> Persistence<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            loaded: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// An empty or blank slot is seeded and written. A snapshot that cannot
    /// be read or used falls back to an empty state.
    pub async fn load<F>(&mut self, seed: F) -> ContractState
    where
        F: FnOnce() -> ContractState,
    {
        let stored = self
            .slot
            .read(&self.key)
            .await
            .map(|raw| raw.filter(|raw| !raw.trim().is_empty()));
        let state = match stored {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(state) => {
                    info!(
                        key = %self.key,
                        blueprints = state.blueprints.len(),
                        contracts = state.contracts.len(),
                        "loaded snapshot"
                    );
                    state
                }
                Err(err) => {
                    warn!(key = %self.key, error = %err, "discarding malformed snapshot");
                    ContractState::default()
                }
            },
            Ok(None) => {
                let seeded = seed();
                info!(
                    key = %self.key,
                    blueprints = seeded.blueprints.len(),
                    contracts = seeded.contracts.len(),
                    "no snapshot found, seeding"
                );
                self.loaded = true;
                self.save(&seeded).await;
                return seeded;
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read snapshot, starting empty");
                ContractState::default()
            }
        };
        self.loaded = true;
        state
    }

    pub async fn save(&self, state: &ContractState) -> bool {
        if !self.loaded {
            debug!(key = %self.key, "skipping save before initial load");
            return false;
        }
        let raw = match state.to_json() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to serialize snapshot");
                return false;
            }
        };
        match self.slot.write(&self.key, &raw).await {
            Ok(()) => {
                debug!(key = %self.key, bytes = raw.len(), "snapshot saved");
                true
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to save snapshot");
                false
            }
        }
    }
}

pub fn decode(raw: &str) -> Result<ContractState, LoadError> {
    let state = ContractState::from_json(raw)?;
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
#[path = "tests/persistence_tests.rs"]
mod tests;
