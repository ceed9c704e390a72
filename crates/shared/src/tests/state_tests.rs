use chrono::{Duration, TimeZone, Utc};

use super::*;
use crate::domain::{FieldDefinition, FieldKind, FieldValue, FormData, HistoryEvent};

fn nda() -> Blueprint {
    Blueprint {
        id: BlueprintId::from("bp-nda"),
        name: "NDA".into(),
        fields: vec![
            FieldDefinition {
                id: "party_a".into(),
                kind: FieldKind::Text,
                label: "Party A".into(),
                position: 1,
                required: Some(true),
            },
            FieldDefinition {
                id: "agree".into(),
                kind: FieldKind::Checkbox,
                label: "Agree".into(),
                position: 2,
                required: None,
            },
        ],
    }
}

fn contract(status: ContractStatus, history: Vec<HistoryEvent>) -> Contract {
    let mut form_data = FormData::new();
    form_data.insert("party_a".into(), FieldValue::from("Acme"));
    form_data.insert("agree".into(), FieldValue::from(true));
    Contract {
        id: ContractId::from("c-1"),
        blueprint_id: BlueprintId::from("bp-nda"),
        blueprint_name: "NDA".into(),
        name: "Acme NDA".into(),
        status,
        form_data,
        created_at: history[0].timestamp,
        history,
    }
}

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 9, 30, 0).single().expect("timestamp")
}

#[test]
fn snapshot_uses_original_wire_names() {
    let state = ContractState::new(
        vec![nda()],
        vec![contract(
            ContractStatus::Created,
            vec![HistoryEvent::new(ContractStatus::Created, t0())],
        )],
    );
    let value: serde_json::Value = serde_json::to_value(&state).expect("json");

    let field = &value["blueprints"][0]["fields"][0];
    assert_eq!(field["type"], "text");
    assert_eq!(field["position"], 1);
    assert!(value["blueprints"][0]["fields"][1].get("required").is_none());

    let contract = &value["contracts"][0];
    assert_eq!(contract["blueprintId"], "bp-nda");
    assert_eq!(contract["blueprintName"], "NDA");
    assert_eq!(contract["status"], "Created");
    assert_eq!(contract["formData"]["agree"], true);
    assert_eq!(contract["formData"]["party_a"], "Acme");
    assert_eq!(contract["createdAt"], "2025-10-15T09:30:00Z");
    assert_eq!(contract["history"][0]["timestamp"], "2025-10-15T09:30:00Z");
}

#[test]
fn json_round_trip_is_lossless() {
    let mut approved = HistoryEvent::new(
        ContractStatus::Approved,
        t0() + Duration::milliseconds(1_234),
    );
    approved.note = Some("looks good".into());
    let state = ContractState::new(
        vec![nda()],
        vec![contract(
            ContractStatus::Approved,
            vec![HistoryEvent::new(ContractStatus::Created, t0()), approved],
        )],
    );

    let raw = state.to_json().expect("serialize");
    let restored = ContractState::from_json(&raw).expect("deserialize");
    assert_eq!(restored, state);
}

#[test]
fn missing_collections_default_to_empty() {
    let state = ContractState::from_json("{}").expect("empty object");
    assert!(state.is_empty());
}

#[test]
fn non_object_snapshots_are_rejected() {
    let blueprints = serde_json::to_string(&vec![nda()]).expect("json");
    let shapes = [
        "[]".to_string(),
        format!("[{blueprints}, []]"),
        "null".to_string(),
        "\"db\"".to_string(),
        "42".to_string(),
    ];
    for raw in &shapes {
        let err = ContractState::from_json(raw).expect_err(raw);
        assert!(err.to_string().contains("expected a snapshot object"), "{err}");
    }
}

#[test]
fn validate_accepts_consistent_state() {
    let state = ContractState::new(
        vec![nda()],
        vec![contract(
            ContractStatus::Approved,
            vec![
                HistoryEvent::new(ContractStatus::Created, t0()),
                HistoryEvent::new(ContractStatus::Approved, t0()),
            ],
        )],
    );
    state.validate().expect("valid");
}

#[test]
fn validate_rejects_empty_history() {
    let mut broken = contract(
        ContractStatus::Created,
        vec![HistoryEvent::new(ContractStatus::Created, t0())],
    );
    broken.history.clear();
    let state = ContractState::new(vec![nda()], vec![broken]);
    assert_eq!(
        state.validate(),
        Err(SnapshotError::EmptyHistory(ContractId::from("c-1")))
    );
}

#[test]
fn validate_rejects_status_history_mismatch() {
    let state = ContractState::new(
        vec![],
        vec![contract(
            ContractStatus::Sent,
            vec![HistoryEvent::new(ContractStatus::Created, t0())],
        )],
    );
    assert!(matches!(
        state.validate(),
        Err(SnapshotError::StatusMismatch {
            status: ContractStatus::Sent,
            last: ContractStatus::Created,
            ..
        })
    ));
}

#[test]
fn validate_rejects_backwards_history() {
    let state = ContractState::new(
        vec![],
        vec![contract(
            ContractStatus::Approved,
            vec![
                HistoryEvent::new(ContractStatus::Created, t0()),
                HistoryEvent::new(ContractStatus::Approved, t0() - Duration::seconds(1)),
            ],
        )],
    );
    assert_eq!(
        state.validate(),
        Err(SnapshotError::HistoryOrder(ContractId::from("c-1")))
    );
}

#[test]
fn validate_rejects_gapped_positions_and_duplicates() {
    let mut gapped = nda();
    gapped.fields[1].position = 3;
    let state = ContractState::new(vec![gapped], vec![]);
    assert_eq!(
        state.validate(),
        Err(SnapshotError::NonContiguousPositions(BlueprintId::from("bp-nda")))
    );

    let state = ContractState::new(vec![nda(), nda()], vec![]);
    assert_eq!(
        state.validate(),
        Err(SnapshotError::DuplicateBlueprint(BlueprintId::from("bp-nda")))
    );
}

#[test]
fn lookups_by_id() {
    let state = ContractState::new(
        vec![nda()],
        vec![contract(
            ContractStatus::Created,
            vec![HistoryEvent::new(ContractStatus::Created, t0())],
        )],
    );
    assert!(state.blueprint(&BlueprintId::from("bp-nda")).is_some());
    assert!(state.contract(&ContractId::from("c-1")).is_some());
    assert!(state.contract(&ContractId::from("missing")).is_none());
}
