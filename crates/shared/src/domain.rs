use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::ContractStatus;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(BlueprintId);
id_newtype!(ContractId);
id_newtype!(FieldId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Checkbox,
    Signature,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Text,
        FieldKind::Date,
        FieldKind::Checkbox,
        FieldKind::Signature,
    ];

    /// Checkbox fields hold a flag, every other kind holds a string.
    pub fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Checkbox, FieldValue::Flag(_))
                | (
                    FieldKind::Text | FieldKind::Date | FieldKind::Signature,
                    FieldValue::Text(_)
                )
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Field answers keyed by [`FieldDefinition::id`]. Absent keys are unset.
pub type FormData = BTreeMap<FieldId, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl FieldDefinition {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: BlueprintId,
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl Blueprint {
    pub fn field(&self, field_id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| &field.id == field_id)
    }

    /// True when field positions are exactly `1..=N` with no gaps or repeats.
    pub fn has_contiguous_positions(&self) -> bool {
        let mut positions: Vec<u32> = self.fields.iter().map(|f| f.position).collect();
        positions.sort_unstable();
        positions
            .iter()
            .zip(1u32..)
            .all(|(position, expected)| *position == expected)
    }

    pub fn ordered_fields(&self) -> Vec<&FieldDefinition> {
        let mut fields: Vec<&FieldDefinition> = self.fields.iter().collect();
        fields.sort_by_key(|field| field.position);
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub status: ContractStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEvent {
    pub fn new(status: ContractStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            timestamp,
            note: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub blueprint_id: BlueprintId,
    pub blueprint_name: String,
    pub name: String,
    pub status: ContractStatus,
    #[serde(default)]
    pub form_data: FormData,
    pub history: Vec<HistoryEvent>,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    pub fn last_event(&self) -> Option<&HistoryEvent> {
        self.history.last()
    }

    pub fn available_actions(&self) -> &'static [ContractStatus] {
        self.status.allowed_transitions()
    }

    pub fn value(&self, field_id: &FieldId) -> Option<&FieldValue> {
        self.form_data.get(field_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDraft {
    pub id: ContractId,
    pub blueprint_id: BlueprintId,
    pub name: String,
    pub form_data: FormData,
}

impl ContractDraft {
    pub fn new(blueprint_id: BlueprintId, name: impl Into<String>) -> Self {
        Self {
            id: ContractId::generate(),
            blueprint_id,
            name: name.into(),
            form_data: FormData::new(),
        }
    }

    pub fn with_id(mut self, id: ContractId) -> Self {
        self.id = id;
        self
    }

    pub fn with_value(mut self, field_id: FieldId, value: impl Into<FieldValue>) -> Self {
        self.form_data.insert(field_id, value.into());
        self
    }
}
