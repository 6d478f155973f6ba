use super::jagged;
use crate::slicer::SliceRange;
use crate::table::{RectSelection, Table};
use crate::table_error::TableError;
use crate::value::{TypeConstraint, Value, ValueKind};
use crate::values;

fn rect_table(t: &Table, rows: impl Into<crate::slicer::Key>, cols: impl Into<crate::slicer::Key>) -> Table {
    match t.rect(rows, cols).unwrap() {
        RectSelection::Table(block) => block,
        RectSelection::Row(row) => panic!("expected a table, got {row}"),
    }
}

#[test]
fn jagged_read_fills_gaps_with_absent() {
    let t = jagged();
    let block = rect_table(&t, 0..3, 0..3);
    assert_eq!(block.row_lengths(), &[3, 3, 3]);
    assert_eq!(block.cell(1, 2).unwrap(), &Value::Absent);
    assert_eq!(block.row(2).unwrap(), &values![5, 6, ()]);
    assert_eq!(
        t.cell(1, 2).unwrap_err(),
        TableError::CellOutOfRange { row: 1, col: 2 }
    );
}

#[test]
fn single_row_rect_is_a_sequence() {
    let t = jagged();
    match t.rect(0, SliceRange::new(Some(2), None, Some(-1))).unwrap() {
        RectSelection::Row(row) => assert_eq!(row, values![3, 2, 1]),
        RectSelection::Table(_) => panic!("expected a row"),
    }
}

#[test]
fn jagged_column_keys_must_be_explicit() {
    let t = jagged();
    assert!(matches!(t.cell(0, -1), Err(TableError::AmbiguousBoundInJaggedTable(_))));
    assert!(matches!(t.rect(.., ..), Err(TableError::AmbiguousBoundInJaggedTable(_))));

    let square = Table::new([[1, 2], [3, 4]]).unwrap();
    assert_eq!(square.cell(-1, -1).unwrap(), &Value::Int(4));
    assert_eq!(rect_table(&square, .., ..), square);
}

#[test]
fn set_cell_checks_bounds_and_kind() {
    let tc = TypeConstraint::new([ValueKind::Int]).unwrap();
    let mut t = Table::with_constraint([vec![1, 2, 3], vec![4]], tc).unwrap();
    t.set_cell(0, 2, 30).unwrap();
    assert_eq!(t.cell(0, 2).unwrap(), &Value::Int(30));
    assert!(matches!(t.set_cell(1, 1, 5), Err(TableError::CellOutOfRange { row: 1, col: 1 })));
    assert!(matches!(t.set_cell(0, 0, "x"), Err(TableError::TypeMismatch { .. })));
    assert_eq!(t.cell(0, 0).unwrap(), &Value::Int(1));
}

#[test]
fn rect_write_pads_short_rows() {
    let mut t = jagged();
    t.set_rect(0..3, 1..3, [values![20, 30], values![70, 80], values![60, 90]])
        .unwrap();
    assert_eq!(t.row(0).unwrap(), &values![1, 20, 30]);
    assert_eq!(t.row(1).unwrap(), &values![4, 70, 80]);
    assert_eq!(t.row(2).unwrap(), &values![5, 60, 90]);
    assert!(!t.is_jagged());
}

#[test]
fn rect_write_row_count_must_match() {
    let mut t = jagged();
    assert_eq!(
        t.set_rect(0..2, 0..1, [values![0]]).unwrap_err(),
        TableError::CannotResizeViaDoubleIndex { expected: 2, found: 1 }
    );
}

#[test]
fn single_column_write_takes_one_value_per_row() {
    let mut t = jagged();
    assert_eq!(
        t.set_rect(0..2, 0, [values![1, 2], values![3]]).unwrap_err(),
        TableError::JaggedAssignmentMismatch { expected: 1, found: 2 }
    );
    t.set_rect(0..2, 0, [values![10], values![40]]).unwrap();
    assert_eq!(t.flatten(), values![10, 2, 3, 40, 5, 6]);
}

#[test]
fn extended_column_write_needs_exact_rows() {
    let mut t = Table::new([[0, 1, 2, 3], [4, 5, 6, 7]]).unwrap();
    let evens = SliceRange::from(0..4).with_step(2);
    assert_eq!(
        t.set_rect(.., evens, [values![9], values![9, 9]]).unwrap_err(),
        TableError::JaggedAssignmentMismatch { expected: 2, found: 1 }
    );
    t.set_rect(.., evens, [values![9, 9], values![8, 8]]).unwrap();
    assert_eq!(t.row(1).unwrap(), &values![8, 5, 8, 7]);
}

#[test]
fn disjoint_write_is_rejected_without_changes() {
    let mut t = Table::new([vec![1, 2, 3, 4], vec![5]]).unwrap();
    let before = t.clone();
    assert_eq!(
        t.set_rect(0..2, 2..4, [values![0, 0], values![0, 0]]).unwrap_err(),
        TableError::DisjointSliceWrite { row: 1 }
    );
    assert_eq!(t, before);

    // starting exactly at the row end extends it
    t.set_rect(1, 1..3, [values![6, 7]]).unwrap();
    assert_eq!(t.row(1).unwrap(), &values![5, 6, 7]);
}

#[test]
fn unit_step_write_splices() {
    let mut t = Table::new([[1, 2, 3]]).unwrap();
    t.set_rect(0, 1..2, [values![7, 8, 9]]).unwrap();
    assert_eq!(t.row(0).unwrap(), &values![1, 7, 8, 9, 3]);
    assert_eq!(t.row_lengths(), &[5]);
}

#[test]
fn rect_delete_skips_missing_cells() {
    let mut t = jagged();
    t.delete_rect(0..3, 1..3).unwrap();
    assert_eq!(t.row_lengths(), &[1, 1, 1]);
    assert_eq!(t.flatten(), values![1, 4, 5]);
}

#[test]
fn rect_delete_of_missing_cell_fails() {
    let mut t = jagged();
    assert_eq!(
        t.delete_rect(1, 2).unwrap_err(),
        TableError::CellOutOfRange { row: 1, col: 2 }
    );
    t.delete_rect(0, 0).unwrap();
    assert_eq!(t.row(0).unwrap(), &values![2, 3]);
}

#[test]
fn concrete_cell_keys_must_name_an_existing_cell() {
    let mut t = jagged();
    assert_eq!(
        t.rect(1, 2).unwrap_err(),
        TableError::CellOutOfRange { row: 1, col: 2 }
    );
    assert_eq!(
        t.set_rect(1, 1, [values![9]]).unwrap_err(),
        TableError::CellOutOfRange { row: 1, col: 1 }
    );
    assert_eq!(t.row_lengths(), &[3, 1, 2]);

    // existing cells behave like cell and set_cell
    match t.rect(2, 1).unwrap() {
        RectSelection::Row(row) => assert_eq!(row, values![6]),
        RectSelection::Table(_) => panic!("expected a row"),
    }
    t.set_rect(1, 0, [values![40]]).unwrap();
    assert_eq!(t.cell(1, 0).unwrap(), &Value::Int(40));

    // a column range may still reach past a short row
    t.set_rect(1, 1..2, [values![41]]).unwrap();
    assert_eq!(t.row(1).unwrap(), &values![40, 41]);
}
