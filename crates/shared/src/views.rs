use serde::{Deserialize, Serialize};

use crate::{
    domain::{Blueprint, Contract},
    policy::ContractStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractFilter {
    #[default]
    All,
    Active,
    Signed,
    Locked,
    Revoked,
}

impl ContractFilter {
    pub fn matches(self, status: ContractStatus) -> bool {
        match self {
            ContractFilter::All => true,
            ContractFilter::Active => matches!(
                status,
                ContractStatus::Created | ContractStatus::Approved | ContractStatus::Sent
            ),
            ContractFilter::Signed => status == ContractStatus::Signed,
            ContractFilter::Locked => status == ContractStatus::Locked,
            ContractFilter::Revoked => status == ContractStatus::Revoked,
        }
    }

    pub fn apply<'a>(self, contracts: &'a [Contract]) -> Vec<&'a Contract> {
        contracts
            .iter()
            .filter(|contract| self.matches(contract.status))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractStats {
    pub total: usize,
    pub active: usize,
    pub signed: usize,
    pub locked: usize,
    pub revoked: usize,
}

impl ContractStats {
    pub fn collect(contracts: &[Contract]) -> Self {
        let count = |filter: ContractFilter| {
            contracts
                .iter()
                .filter(|contract| filter.matches(contract.status))
                .count()
        };
        Self {
            total: contracts.len(),
            active: count(ContractFilter::Active),
            signed: count(ContractFilter::Signed),
            locked: count(ContractFilter::Locked),
            revoked: count(ContractFilter::Revoked),
        }
    }
}

/// Blueprints whose name contains `term`, ignoring case. An empty term
/// matches everything.
pub fn search_blueprints<'a>(blueprints: &'a [Blueprint], term: &str) -> Vec<&'a Blueprint> {
    let needle = term.to_lowercase();
    blueprints
        .iter()
        .filter(|blueprint| blueprint.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
