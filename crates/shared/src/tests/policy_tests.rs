use super::*;

fn expected_edges(from: ContractStatus) -> Vec<ContractStatus> {
    use ContractStatus::*;
    match from {
        Created => vec![Approved, Revoked],
        Approved => vec![Sent, Revoked],
        Sent => vec![Signed, Revoked],
        Signed => vec![Locked],
        Locked | Revoked => vec![],
    }
}

#[test]
fn every_pair_matches_lifecycle_table() {
    for from in ContractStatus::ALL {
        let expected = expected_edges(from);
        for to in ContractStatus::ALL {
            assert_eq!(
                can_transition(from, to),
                expected.contains(&to),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn terminal_statuses_have_no_outgoing_edges() {
    for status in [ContractStatus::Locked, ContractStatus::Revoked] {
        assert!(status.is_terminal());
        assert!(allowed_transitions(status).is_empty());
        assert!(ContractStatus::ALL
            .into_iter()
            .all(|target| !status.can_transition_to(target)));
    }
    assert!(!ContractStatus::Signed.is_terminal());
}

#[test]
fn signed_cannot_be_revoked() {
    assert!(!can_transition(ContractStatus::Signed, ContractStatus::Revoked));
}

#[test]
fn no_status_transitions_to_itself() {
    for status in ContractStatus::ALL {
        assert!(!can_transition(status, status));
    }
}

#[test]
fn only_created_is_editable() {
    let editable: Vec<_> = ContractStatus::ALL
        .into_iter()
        .filter(|s| s.is_editable())
        .collect();
    assert_eq!(editable, vec![ContractStatus::Created]);
}

#[test]
fn parses_status_names_case_insensitively() {
    assert_eq!("approved".parse::<ContractStatus>(), Ok(ContractStatus::Approved));
    assert_eq!(" Locked ".parse::<ContractStatus>(), Ok(ContractStatus::Locked));
    let err = "archived".parse::<ContractStatus>().expect_err("unknown status");
    assert_eq!(err, ParseStatusError("archived".into()));
}

#[test]
fn serializes_as_variant_name() {
    let json = serde_json::to_string(&ContractStatus::Signed).expect("json");
    assert_eq!(json, "\"Signed\"");
    for status in ContractStatus::ALL {
        assert_eq!(status.to_string(), status.as_str());
    }
}
