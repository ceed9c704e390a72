use chrono::{DateTime, Utc};
use shared::{
    domain::{Blueprint, Contract, ContractDraft, ContractId, FormData, HistoryEvent},
    policy::ContractStatus,
    state::ContractState,
};
use tracing::{debug, warn};

use crate::error::Rejection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddBlueprint(Blueprint),
    CreateContract(ContractDraft),
    UpdateFormData {
        id: ContractId,
        data: FormData,
    },
    UpdateStatus {
        id: ContractId,
        status: ContractStatus,
        note: Option<String>,
    },
    LoadFromStorage(ContractState),
}

impl Command {
    pub fn update_status(id: ContractId, status: ContractStatus) -> Self {
        Command::UpdateStatus {
            id,
            status,
            note: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBlueprint(_) => "add_blueprint",
            Command::CreateContract(_) => "create_contract",
            Command::UpdateFormData { .. } => "update_form_data",
            Command::UpdateStatus { .. } => "update_status",
            Command::LoadFromStorage(_) => "load_from_storage",
        }
    }
}

pub fn apply(
    state: &ContractState,
    command: Command,
    now: DateTime<Utc>,
) -> Result<ContractState, Rejection> {
    match command {
        Command::AddBlueprint(blueprint) => add_blueprint(state, blueprint),
        Command::CreateContract(draft) => create_contract(state, draft, now),
        Command::UpdateFormData { id, data } => update_form_data(state, &id, data),
        Command::UpdateStatus { id, status, note } => update_status(state, &id, status, note, now),
        Command::LoadFromStorage(next) => Ok(next),
    }
}

/// Like [`apply`], but a rejected command yields an unchanged copy of the
/// state after logging the reason.
pub fn reduce(state: &ContractState, command: Command, now: DateTime<Utc>) -> ContractState {
    let name = command.name();
    match apply(state, command, now) {
        Ok(next) => next,
        Err(rejection) => {
            log_rejection(name, &rejection);
            state.clone()
        }
    }
}

pub(crate) fn log_rejection(command: &str, rejection: &Rejection) {
    match rejection {
        Rejection::InvalidTransition { id, from, to } => {
            warn!(command, contract_id = %id, %from, %to, "status change rejected");
        }
        Rejection::UnknownContract(_) | Rejection::NotEditable { .. } => {
            debug!(command, %rejection, "command ignored");
        }
        _ => warn!(command, %rejection, "command rejected"),
    }
}

fn add_blueprint(state: &ContractState, blueprint: Blueprint) -> Result<ContractState, Rejection> {
    if state.blueprint(&blueprint.id).is_some() {
        return Err(Rejection::DuplicateBlueprint(blueprint.id));
    }
    if !blueprint.has_contiguous_positions() {
        return Err(Rejection::NonContiguousPositions(blueprint.id));
    }

    let mut next = state.clone();
    next.blueprints.push(blueprint);
    Ok(next)
}

fn create_contract(
    state: &ContractState,
    draft: ContractDraft,
    now: DateTime<Utc>,
) -> Result<ContractState, Rejection> {
    let blueprint = state
        .blueprint(&draft.blueprint_id)
        .ok_or_else(|| Rejection::UnknownBlueprint(draft.blueprint_id.clone()))?;
    if state.contract(&draft.id).is_some() {
        return Err(Rejection::DuplicateContract(draft.id));
    }
    check_form_data(&draft.id, Some(blueprint), &draft.form_data)?;

    let name = if draft.name.trim().is_empty() {
        blueprint.name.clone()
    } else {
        draft.name
    };
    let contract = Contract {
        id: draft.id,
        blueprint_id: draft.blueprint_id,
        blueprint_name: blueprint.name.clone(),
        name,
        status: ContractStatus::Created,
        form_data: draft.form_data,
        history: vec![HistoryEvent::new(ContractStatus::Created, now)],
        created_at: now,
    };

    let mut next = state.clone();
    next.contracts.push(contract);
    Ok(next)
}

fn update_form_data(
    state: &ContractState,
    id: &ContractId,
    data: FormData,
) -> Result<ContractState, Rejection> {
    let index = contract_index(state, id)?;
    let contract = &state.contracts[index];
    if !contract.is_editable() {
        return Err(Rejection::NotEditable {
            id: id.clone(),
            status: contract.status,
        });
    }
    // A blueprint that has gone missing is tolerated; keys are then unchecked.
    check_form_data(id, state.blueprint(&contract.blueprint_id), &data)?;

    let mut next = state.clone();
    next.contracts[index].form_data.extend(data);
    Ok(next)
}

fn update_status(
    state: &ContractState,
    id: &ContractId,
    target: ContractStatus,
    note: Option<String>,
    now: DateTime<Utc>,
) -> Result<ContractState, Rejection> {
    let index = contract_index(state, id)?;
    let contract = &state.contracts[index];
    if !contract.status.can_transition_to(target) {
        return Err(Rejection::InvalidTransition {
            id: id.clone(),
            from: contract.status,
            to: target,
        });
    }

    // History must never go backwards, even if the wall clock does.
    let timestamp = contract
        .last_event()
        .map_or(now, |last| now.max(last.timestamp));

    let mut next = state.clone();
    let contract = &mut next.contracts[index];
    contract.status = target;
    contract.history.push(HistoryEvent {
        status: target,
        timestamp,
        note,
    });
    Ok(next)
}

fn contract_index(state: &ContractState, id: &ContractId) -> Result<usize, Rejection> {
    state
        .contracts
        .iter()
        .position(|contract| &contract.id == id)
        .ok_or_else(|| Rejection::UnknownContract(id.clone()))
}

fn check_form_data(
    id: &ContractId,
    blueprint: Option<&Blueprint>,
    data: &FormData,
) -> Result<(), Rejection> {
    let Some(blueprint) = blueprint else {
        return Ok(());
    };
    for (field_id, value) in data {
        let field = blueprint
            .field(field_id)
            .ok_or_else(|| Rejection::UnknownField {
                id: id.clone(),
                field: field_id.clone(),
            })?;
        if !field.kind.accepts(value) {
            return Err(Rejection::ValueMismatch {
                id: id.clone(),
                field: field_id.clone(),
                kind: field.kind,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
