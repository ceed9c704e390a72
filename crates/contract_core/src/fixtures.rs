use chrono::{DateTime, Duration, Utc};
use shared::{
    domain::{
        Blueprint, BlueprintId, Contract, ContractId, FieldDefinition, FieldId, FieldKind,
        FieldValue, FormData, HistoryEvent,
    },
    policy::ContractStatus,
    state::ContractState,
};

pub const FREELANCE_BLUEPRINT_ID: &str = "bp-freelance-01";
pub const NDA_BLUEPRINT_ID: &str = "bp-nda-02";
pub const DRAFT_CONTRACT_ID: &str = "c-draft-01";
pub const SENT_CONTRACT_ID: &str = "c-sent-02";
pub const LOCKED_CONTRACT_ID: &str = "c-locked-03";

const FREELANCE_NAME: &str = "Freelance Service Agreement";
const NDA_NAME: &str = "Non-Disclosure Agreement (NDA)";

pub fn demo_state(now: DateTime<Utc>) -> ContractState {
    ContractState::new(demo_blueprints(), demo_contracts(now))
}

pub fn demo_blueprints() -> Vec<Blueprint> {
    vec![
        Blueprint {
            id: BlueprintId::from(FREELANCE_BLUEPRINT_ID),
            name: FREELANCE_NAME.into(),
            fields: fields(&[
                ("client_name", FieldKind::Text, "Client Name"),
                ("project_scope", FieldKind::Text, "Project Scope & Deliverables"),
                ("start_date", FieldKind::Date, "Start Date"),
                ("source_code", FieldKind::Checkbox, "Include Source Code Handover?"),
                ("client_sig", FieldKind::Signature, "Client Signature"),
            ]),
        },
        Blueprint {
            id: BlueprintId::from(NDA_BLUEPRINT_ID),
            name: NDA_NAME.into(),
            fields: fields(&[
                ("party_a", FieldKind::Text, "Disclosing Party"),
                ("party_b", FieldKind::Text, "Receiving Party"),
                ("effective_date", FieldKind::Date, "Effective Date"),
                ("sig_b", FieldKind::Signature, "Receiving Party Signature"),
            ]),
        },
    ]
}

pub fn demo_contracts(now: DateTime<Utc>) -> Vec<Contract> {
    let ago = |millis: i64| now - Duration::milliseconds(millis);

    vec![
        Contract {
            id: ContractId::from(DRAFT_CONTRACT_ID),
            blueprint_id: BlueprintId::from(FREELANCE_BLUEPRINT_ID),
            blueprint_name: FREELANCE_NAME.into(),
            name: "Website Redesign - Acme Corp".into(),
            status: ContractStatus::Created,
            form_data: form(&[
                ("client_name", FieldValue::from("Acme Corp")),
                (
                    "project_scope",
                    FieldValue::from("Full UI overhaul using Next.js and Tailwind CSS."),
                ),
            ]),
            history: history(&[(ContractStatus::Created, ago(100_000_000))]),
            created_at: ago(100_000_000),
        },
        Contract {
            id: ContractId::from(SENT_CONTRACT_ID),
            blueprint_id: BlueprintId::from(FREELANCE_BLUEPRINT_ID),
            blueprint_name: FREELANCE_NAME.into(),
            name: "Mobile App - Beta LLC".into(),
            status: ContractStatus::Sent,
            form_data: form(&[
                ("client_name", FieldValue::from("Beta LLC")),
                ("project_scope", FieldValue::from("React Native MVP Development")),
                ("start_date", FieldValue::from("2025-11-01")),
                ("source_code", FieldValue::from(true)),
            ]),
            history: history(&[
                (ContractStatus::Created, ago(500_000_000)),
                (ContractStatus::Approved, ago(400_000_000)),
                (ContractStatus::Sent, ago(200_000)),
            ]),
            created_at: ago(500_000_000),
        },
        Contract {
            id: ContractId::from(LOCKED_CONTRACT_ID),
            blueprint_id: BlueprintId::from(NDA_BLUEPRINT_ID),
            blueprint_name: NDA_NAME.into(),
            name: "Confidentiality - Gamma Inc".into(),
            status: ContractStatus::Locked,
            form_data: form(&[
                ("party_a", FieldValue::from("My Agency Ltd")),
                ("party_b", FieldValue::from("Gamma Inc")),
                ("effective_date", FieldValue::from("2025-10-15")),
                ("sig_b", FieldValue::from("Signed by CEO, Gamma Inc")),
            ]),
            history: history(&[
                (ContractStatus::Created, ago(900_000_000)),
                (ContractStatus::Approved, ago(800_000_000)),
                (ContractStatus::Sent, ago(700_000_000)),
                (ContractStatus::Signed, ago(600_000_000)),
                (ContractStatus::Locked, ago(500_000_000)),
            ]),
            created_at: ago(900_000_000),
        },
    ]
}

fn fields(defs: &[(&str, FieldKind, &str)]) -> Vec<FieldDefinition> {
    defs
        .iter()
        .zip(1u32..)
        .map(|((id, kind, label), position)| FieldDefinition {
            id: FieldId::from(*id),
            kind: *kind,
            label: (*label).to_string(),
            position,
            required: None,
        })
        .collect()
}

fn form(values: &[(&str, FieldValue)]) -> FormData {
    values
        .iter()
        .map(|(id, value)| (FieldId::from(*id), value.clone()))
        .collect()
}

fn history(events: &[(ContractStatus, DateTime<Utc>)]) -> Vec<HistoryEvent> {
    events
        .iter()
        .map(|(status, timestamp)| HistoryEvent::new(*status, *timestamp))
        .collect()
}
