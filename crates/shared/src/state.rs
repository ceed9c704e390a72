use std::collections::HashSet;

use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{Blueprint, BlueprintId, Contract, ContractId},
    error::SnapshotError,
    policy::ContractStatus,
};

/// Also the persisted snapshot format, `{ "blueprints": [...], "contracts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    #[serde(default)]
    pub blueprints: Vec<Blueprint>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl ContractState {
    pub fn new(blueprints: Vec<Blueprint>, contracts: Vec<Contract>) -> Self {
        Self {
            blueprints,
            contracts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty() && self.contracts.is_empty()
    }

    pub fn blueprint(&self, id: &BlueprintId) -> Option<&Blueprint> {
        self.blueprints.iter().find(|blueprint| &blueprint.id == id)
    }

    pub fn contract(&self, id: &ContractId) -> Option<&Contract> {
        self.contracts.iter().find(|contract| &contract.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Value>(raw)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde_json::Error::custom(format!(
                "expected a snapshot object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Checks the invariants a freshly loaded snapshot must hold. Dangling
    /// blueprint references are allowed.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut blueprint_ids = HashSet::new();
        for blueprint in &self.blueprints {
            if !blueprint_ids.insert(&blueprint.id) {
                return Err(SnapshotError::DuplicateBlueprint(blueprint.id.clone()));
            }
            if !blueprint.has_contiguous_positions() {
                return Err(SnapshotError::NonContiguousPositions(blueprint.id.clone()));
            }
        }

        let mut contract_ids = HashSet::new();
        for contract in &self.contracts {
            if !contract_ids.insert(&contract.id) {
                return Err(SnapshotError::DuplicateContract(contract.id.clone()));
            }
            validate_history(contract)?;
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate_history(contract: &Contract) -> Result<(), SnapshotError> {
    let (Some(first), Some(last)) = (contract.history.first(), contract.history.last()) else {
        return Err(SnapshotError::EmptyHistory(contract.id.clone()));
    };
    if first.status != ContractStatus::Created {
        return Err(SnapshotError::HistoryStart(contract.id.clone()));
    }
    if last.status != contract.status {
        return Err(SnapshotError::StatusMismatch {
            id: contract.id.clone(),
            status: contract.status,
            last: last.status,
        });
    }
    if contract
        .history
        .windows(2)
        .any(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(SnapshotError::HistoryOrder(contract.id.clone()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
