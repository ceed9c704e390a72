use thiserror::Error;

use crate::{
    domain::{BlueprintId, ContractId, FieldId},
    policy::ContractStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contract status: {0:?}")]
pub struct ParseStatusError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlueprintError {
    #[error("blueprint name must not be empty")]
    EmptyName,
    #[error("blueprint must have at least one field")]
    NoFields,
    #[error("field {0} is not part of this blueprint")]
    UnknownField(FieldId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("duplicate blueprint id {0}")]
    DuplicateBlueprint(BlueprintId),
    #[error("duplicate contract id {0}")]
    DuplicateContract(ContractId),
    #[error("blueprint {0} has non-contiguous field positions")]
    NonContiguousPositions(BlueprintId),
    #[error("contract {0} has an empty history")]
    EmptyHistory(ContractId),
    #[error("contract {id} is {status} but its last history entry is {last}")]
    StatusMismatch {
        id: ContractId,
        status: ContractStatus,
        last: ContractStatus,
    },
    #[error("contract {0} history does not start with Created")]
    HistoryStart(ContractId),
    #[error("contract {0} history timestamps go backwards")]
    HistoryOrder(ContractId),
}
