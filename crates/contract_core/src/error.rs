use shared::{
    domain::{BlueprintId, ContractId, FieldId, FieldKind},
    error::SnapshotError,
    policy::ContractStatus,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("blueprint {0} already exists")]
    DuplicateBlueprint(BlueprintId),
    #[error("blueprint {0} field positions are not 1..N")]
    NonContiguousPositions(BlueprintId),
    #[error("blueprint {0} not found")]
    UnknownBlueprint(BlueprintId),
    #[error("contract {0} already exists")]
    DuplicateContract(ContractId),
    #[error("contract {0} not found")]
    UnknownContract(ContractId),
    #[error("contract {id} is {status} and can no longer be edited")]
    NotEditable {
        id: ContractId,
        status: ContractStatus,
    },
    #[error("field {field} is not part of the blueprint for contract {id}")]
    UnknownField { id: ContractId, field: FieldId },
    #[error("value for {kind:?} field {field} on contract {id} has the wrong type")]
    ValueMismatch {
        id: ContractId,
        field: FieldId,
        kind: FieldKind,
    },
    #[error("contract {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ContractId,
        from: ContractStatus,
        to: ContractStatus,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot breaks a store invariant: {0}")]
    Invalid(#[from] SnapshotError),
}
