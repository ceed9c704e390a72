use super::*;

#[test]
fn build_assigns_positions_from_current_order() {
    let mut builder = BlueprintBuilder::new("NDA");
    let party = builder.add_field(FieldKind::Text);
    let sig = builder.add_field(FieldKind::Signature);
    let date = builder.add_field(FieldKind::Date);
    builder.set_label(&party, "Party A").expect("label");
    builder.set_label(&sig, "Sig").expect("label");
    builder.set_label(&date, "Effective").expect("label");

    builder.move_field(2, MoveDirection::Up);

    let blueprint = builder.build().expect("blueprint");
    let ids: Vec<_> = blueprint.fields.iter().map(|f| f.id.clone()).collect();
    assert_eq!(ids, vec![party, date, sig]);
    let positions: Vec<_> = blueprint.fields.iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert!(blueprint.has_contiguous_positions());
}

#[test]
fn moving_past_either_end_is_ignored() {
    let mut builder = BlueprintBuilder::new("Edges")
        .with_field(FieldKind::Text, "first")
        .with_field(FieldKind::Checkbox, "second");
    let before = builder.fields().to_vec();

    builder.move_field(0, MoveDirection::Up);
    builder.move_field(1, MoveDirection::Down);
    builder.move_field(7, MoveDirection::Up);

    assert_eq!(builder.fields(), before.as_slice());

    builder.move_field(0, MoveDirection::Down);
    assert_eq!(builder.fields()[0].label, "second");
}

#[test]
fn rejects_blank_name() {
    let builder = BlueprintBuilder::new("   ").with_field(FieldKind::Text, "x");
    assert_eq!(builder.build(), Err(BlueprintError::EmptyName));
}

#[test]
fn keeps_name_as_typed() {
    let blueprint = BlueprintBuilder::new(" Lease v2 ")
        .with_field(FieldKind::Text, "Tenant")
        .build()
        .expect("blueprint");
    assert_eq!(blueprint.name, " Lease v2 ");
}

#[test]
fn rejects_blueprint_without_fields() {
    let builder = BlueprintBuilder::new("Empty");
    assert_eq!(builder.build(), Err(BlueprintError::NoFields));
}

#[test]
fn remove_and_required_flags() {
    let mut builder = BlueprintBuilder::new("Service");
    let keep = builder.add_field(FieldKind::Text);
    let drop = builder.add_field(FieldKind::Date);
    builder.set_required(&keep, true).expect("required");
    builder.remove_field(&drop).expect("remove");

    let err = builder.remove_field(&drop).expect_err("already removed");
    assert_eq!(err, BlueprintError::UnknownField(drop));

    let blueprint = builder.build().expect("blueprint");
    assert_eq!(blueprint.fields.len(), 1);
    assert!(blueprint.fields[0].is_required());
    assert_eq!(blueprint.fields[0].position, 1);
}

#[test]
fn built_blueprints_get_distinct_ids() {
    let builder = BlueprintBuilder::new("Twice").with_field(FieldKind::Text, "a");
    let first = builder.build().expect("first");
    let second = builder.build().expect("second");
    assert_ne!(first.id, second.id);
}
