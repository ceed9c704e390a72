use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseStatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
    Revoked,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 6] = [
        ContractStatus::Created,
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
        ContractStatus::Revoked,
    ];

    pub fn allowed_transitions(self) -> &'static [ContractStatus] {
        use ContractStatus::*;
        match self {
            Created => &[Approved, Revoked],
            Approved => &[Sent, Revoked],
            Sent => &[Signed, Revoked],
            Signed => &[Locked],
            Locked => &[],
            Revoked => &[],
        }
    }

    pub fn can_transition_to(self, target: ContractStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Form data may only change before approval.
    pub fn is_editable(self) -> bool {
        self == ContractStatus::Created
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Created => "Created",
            ContractStatus::Approved => "Approved",
            ContractStatus::Sent => "Sent",
            ContractStatus::Signed => "Signed",
            ContractStatus::Locked => "Locked",
            ContractStatus::Revoked => "Revoked",
        }
    }
}

pub fn can_transition(current: ContractStatus, target: ContractStatus) -> bool {
    current.can_transition_to(target)
}

pub fn allowed_transitions(from: ContractStatus) -> &'static [ContractStatus] {
    from.allowed_transitions()
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ContractStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
