use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use shared::{
    domain::{Blueprint, BlueprintId, Contract, ContractDraft, ContractId, FormData},
    policy::ContractStatus,
    state::ContractState,
    views::{self, ContractFilter, ContractStats},
};
use storage::{SnapshotSlot, Storage};
use tracing::debug;

use crate::{
    config::{normalize_database_url, Settings},
    error::Rejection,
    fixtures,
    persistence::Persistence,
    reducer::{self, Command},
};

/// A rejected command leaves the snapshot allocation untouched, so
/// `Arc::ptr_eq` on two snapshots tells whether anything changed.
pub struct ContractStore<S> {
    state: Arc<ContractState>,
    persistence: Persistence<S>,
}

impl ContractStore<Storage> {
    pub async fn open(settings: &Settings) -> anyhow::Result<Self> {
        let database_url = normalize_database_url(&settings.database_url);
        let storage = Storage::new(&database_url)
            .await
            .with_context(|| format!("failed to open contract storage at '{database_url}'"))?;
        storage
            .health_check()
            .await
            .with_context(|| format!("contract storage at '{database_url}' is unusable"))?;
        Ok(Self::with_slot(storage, settings.slot_key.clone(), settings.seed_demo_data).await)
    }
}

impl<S: SnapshotSlot> ContractStore<S> {
    pub async fn with_slot(slot: S, slot_key: impl Into<String>, seed_demo_data: bool) -> Self {
        let mut persistence = Persistence::new(slot, slot_key);
        let loaded = persistence
            .load(|| {
                if seed_demo_data {
                    fixtures::demo_state(Utc::now())
                } else {
                    ContractState::default()
                }
            })
            .await;
        let state = reducer::reduce(
            &ContractState::default(),
            Command::LoadFromStorage(loaded),
            Utc::now(),
        );
        Self {
            state: Arc::new(state),
            persistence,
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Arc<ContractState>, Rejection> {
        let name = command.name();
        match reducer::apply(&self.state, command, Utc::now()) {
            Ok(next) => {
                debug!(command = name, "command applied");
                self.state = Arc::new(next);
                self.persistence.save(&self.state).await;
                Ok(Arc::clone(&self.state))
            }
            Err(rejection) => {
                reducer::log_rejection(name, &rejection);
                Err(rejection)
            }
        }
    }

    pub async fn add_blueprint(&mut self, blueprint: Blueprint) -> Result<(), Rejection> {
        self.dispatch(Command::AddBlueprint(blueprint)).await?;
        Ok(())
    }

    pub async fn create_contract(&mut self, draft: ContractDraft) -> Result<ContractId, Rejection> {
        let id = draft.id.clone();
        self.dispatch(Command::CreateContract(draft)).await?;
        Ok(id)
    }

    pub async fn update_form_data(
        &mut self,
        id: &ContractId,
        data: FormData,
    ) -> Result<(), Rejection> {
        self.dispatch(Command::UpdateFormData {
            id: id.clone(),
            data,
        })
        .await?;
        Ok(())
    }

    pub async fn update_status(
        &mut self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<(), Rejection> {
        self.dispatch(Command::update_status(id.clone(), status)).await?;
        Ok(())
    }

    pub async fn update_status_with_note(
        &mut self,
        id: &ContractId,
        status: ContractStatus,
        note: impl Into<String>,
    ) -> Result<(), Rejection> {
        self.dispatch(Command::UpdateStatus {
            id: id.clone(),
            status,
            note: Some(note.into()),
        })
        .await?;
        Ok(())
    }

    pub fn state(&self) -> &ContractState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<ContractState> {
        Arc::clone(&self.state)
    }

    pub fn blueprints(&self) -> &[Blueprint] {
        &self.state.blueprints
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.state.contracts
    }

    pub fn blueprint(&self, id: &BlueprintId) -> Option<&Blueprint> {
        self.state.blueprint(id)
    }

    pub fn contract(&self, id: &ContractId) -> Option<&Contract> {
        self.state.contract(id)
    }

    pub fn blueprint_for(&self, id: &ContractId) -> Option<&Blueprint> {
        self.contract(id)
            .and_then(|contract| self.blueprint(&contract.blueprint_id))
    }

    /// Status changes a user may request for this contract right now.
    pub fn available_actions(&self, id: &ContractId) -> &'static [ContractStatus] {
        self.contract(id)
            .map(|contract| contract.available_actions())
            .unwrap_or(&[])
    }

    pub fn filtered(&self, filter: ContractFilter) -> Vec<&Contract> {
        filter.apply(&self.state.contracts)
    }

    pub fn search_blueprints(&self, term: &str) -> Vec<&Blueprint> {
        views::search_blueprints(&self.state.blueprints, term)
    }

    pub fn stats(&self) -> ContractStats {
        ContractStats::collect(&self.state.contracts)
    }

    pub fn recent(&self) -> impl Iterator<Item = &Contract> {
        self.state.contracts.iter().rev()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
