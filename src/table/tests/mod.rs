mod cells_tests;

use super::Table;
use crate::values;

/// Rows of lengths 3, 1 and 2.
fn jagged() -> Table {
    Table::new([values![1, 2, 3], values![4], values![5, 6]]).unwrap()
}
