use jagged_table::prelude::*;

fn jagged() -> Table {
    Table::new([values![1, 2, 3], values![4], values![5, 6]]).unwrap()
}

#[test]
fn jagged_rect_read_pads_with_absent() -> Result<(), Box<dyn std::error::Error>> {
    let t = jagged();
    let RectSelection::Table(block) = t.rect(.., 0..2)? else {
        panic!("expected a table");
    };
    assert_eq!(block.to_vec(), vec![values![1, 2], values![4, ()], values![5, 6]]);
    assert!(!block.is_jagged());
    // the source is untouched
    assert_eq!(t.row_lengths(), &[3, 1, 2]);
    Ok(())
}

#[test]
fn row_lengths_recompute_after_delete() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = jagged();
    assert_eq!(t.max_row_length(), Some(3));
    t.delete(0)?;
    assert!(t.row_lengths_stale());
    assert_eq!(t.max_row_length(), Some(2));
    assert_eq!(t.min_row_length(), Some(1));
    Ok(())
}

#[test]
fn labels_stay_unique() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = jagged();
    t.set_label(0, "first")?;
    assert_eq!(
        t.set_label(2, "first").unwrap_err(),
        TableError::DuplicateLabel { label: "first".into(), index: 0 }
    );
    assert_eq!(t.set_label(1, "").unwrap_err(), TableError::EmptyLabelRejected);

    t.remove_label("first")?;
    t.set_label(2, "first")?;
    assert_eq!(t.row_by_label("first")?, &values![5, 6]);
    assert!(matches!(t.row_by_label("missing"), Err(TableError::LabelNotFound(_))));
    Ok(())
}

#[test]
fn rect_write_then_read_back() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = jagged();
    t.set_rect(1..3, 1..2, [values!["x"], values!["y"]])?;
    assert_eq!(t.row_lengths(), &[3, 2, 2]);
    assert_eq!(t.cell(1, 1)?, &Value::from("x"));
    assert_eq!(t.find_cell(&Value::from("y"))?, (2, 1));
    Ok(())
}

#[test]
fn settings_restrict_table_kinds() -> Result<(), Box<dyn std::error::Error>> {
    let settings = KindSettings::restricted(1, [ValueKind::Int, ValueKind::Str]);
    let narrow = TypeConstraint::settings_default(&settings);
    assert!(!narrow.contains(ValueKind::Complex));

    let mut t = Table::with_constraint([[1, 2]], narrow)?;
    assert!(matches!(
        t.append(values![1.5]),
        Err(TableError::TypeMismatch { .. })
    ));
    assert_eq!(t.len(), 1);
    Ok(())
}
