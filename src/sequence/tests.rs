use super::*;
use crate::value::ValueKind;
use crate::values;

fn int_str() -> TypeConstraint {
    TypeConstraint::new([ValueKind::Int, ValueKind::Str]).unwrap()
}

#[test]
fn end_to_end_append_and_slice() {
    let mut seq = Sequence::with_constraint(values![1, "a", ()], int_str()).unwrap();
    seq.append(2).unwrap();
    assert_eq!(seq.len(), 4);

    let err = seq.append(3.5).unwrap_err();
    assert!(matches!(
        err,
        TableError::TypeMismatch {
            kind: ValueKind::Float,
            ..
        }
    ));
    assert_eq!(seq.len(), 4);

    let sub = seq.slice(1..3).unwrap();
    assert_eq!(sub, values!["a", ()]);
    assert_eq!(sub.constraint(), int_str());
}

#[test]
fn negative_index_matches_last() {
    let seq = Sequence::new(values![10, 20, 30]).unwrap();
    assert_eq!(seq.get(-1).unwrap(), seq.get(2).unwrap());
    assert_eq!(seq.get(-3).unwrap(), &Value::Int(10));
    assert!(matches!(
        seq.get(3),
        Err(TableError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn select_dispatches_on_key_shape() {
    let seq = Sequence::new(values![1, 2, 3]).unwrap();
    assert_eq!(seq.select(0).unwrap(), Selection::Element(Value::Int(1)));
    match seq.select(SliceRange::stepped(-1)).unwrap() {
        Selection::Sequence(rev) => assert_eq!(rev, values![3, 2, 1]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn extended_slice_size_law() {
    let mut seq = Sequence::new(values![0, 1, 2, 3, 4]).unwrap();
    let evens = SliceRange::from(0..5).with_step(2);

    let err = seq.set_slice(evens, values![7, 7]).unwrap_err();
    assert_eq!(err, TableError::SizeMismatch { expected: 3, found: 2 });
    assert_eq!(seq, values![0, 1, 2, 3, 4]);

    seq.set_slice(evens, values![9, 8, 7]).unwrap();
    assert_eq!(seq.len(), 5);
    assert_eq!(seq, values![9, 1, 8, 3, 7]);
}

#[test]
fn empty_extended_range_rejected() {
    let seq = Sequence::new(values![0, 1, 2, 3]).unwrap();
    assert!(matches!(
        seq.slice(SliceRange::from(3..1).with_step(2)),
        Err(TableError::EmptyExtendedRange { .. })
    ));
    // step 1 collapses instead
    assert!(seq.slice(3..1).unwrap().is_empty());
}

#[test]
fn unit_slice_assignment_resizes() {
    let mut seq = Sequence::new(values![0, 1, 2, 3]).unwrap();
    seq.set_slice(1..3, values!["x"]).unwrap();
    assert_eq!(seq, values![0, "x", 3]);
    seq.set_slice(1..1, values![5, 6]).unwrap();
    assert_eq!(seq, values![0, 5, 6, "x", 3]);
}

#[test]
fn failed_assignment_is_atomic() {
    let tc = TypeConstraint::new([ValueKind::Int]).unwrap();
    let mut seq = Sequence::with_constraint(values![1, 2, 3], tc).unwrap();
    let err = seq.set_slice(0..2, values![5, "no"]).unwrap_err();
    assert!(matches!(err, TableError::TypeMismatch { .. }));
    assert_eq!(seq, values![1, 2, 3]);
}

#[test]
fn insert_and_delete() {
    let mut seq = Sequence::new(values![1, 3]).unwrap();
    seq.insert(1, 2).unwrap();
    seq.insert(3, 4).unwrap();
    seq.insert(-4, 0).unwrap();
    assert_eq!(seq, values![0, 1, 2, 3, 4]);

    seq.delete(SliceRange::stepped(2)).unwrap();
    assert_eq!(seq, values![1, 3]);
    seq.delete(-1).unwrap();
    assert_eq!(seq, values![1]);
    assert!(seq.delete(4).is_err());
}

#[test]
fn pop_and_reverse() {
    let mut seq = Sequence::new(values![1, 2, 3]).unwrap();
    assert_eq!(seq.pop().unwrap(), Value::Int(3));
    seq.reverse();
    assert_eq!(seq, values![2, 1]);
    let mut empty = Sequence::empty(TypeConstraint::standard());
    assert!(empty.pop().is_err());
}

#[test]
fn concatenation_type_gate() {
    let a = Sequence::with_constraint(values![1], int_str()).unwrap();
    let b = Sequence::new(values![2]).unwrap();
    assert!(matches!(a.concat(&b), Err(TableError::IncompatibleTypes(_))));

    let joined = a.concat_values(values![2, "b"]).unwrap();
    assert_eq!(joined, values![1, 2, "b"]);
    assert_eq!(joined.constraint(), int_str());

    let front = a.prepend_values(values![0]).unwrap();
    assert_eq!(front, values![0, 1]);

    assert!(a.concat_values(values![false]).is_err());
}

#[test]
fn extend_from_in_place() {
    let mut a = Sequence::new(values![1]).unwrap();
    let b = Sequence::new(values![2, 3]).unwrap();
    a.extend_from(&b).unwrap();
    assert_eq!(a, values![1, 2, 3]);
}

#[test]
fn equality_requires_equal_constraints() {
    let a = Sequence::with_constraint(values![1], int_str()).unwrap();
    let b = Sequence::new(values![1]).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, Sequence::with_constraint(values![1], int_str()).unwrap());
}

#[test]
fn search_operations() {
    let seq = Sequence::new(values![1, 2, 1, 3, 1]).unwrap();
    let one = Value::Int(1);
    assert_eq!(seq.find(&one).unwrap(), 0);
    assert_eq!(seq.find_in(&one, 1..).unwrap(), 2);
    assert_eq!(seq.rfind(&one).unwrap(), 4);
    assert_eq!(seq.rfind_in(&one, ..4).unwrap(), 2);
    assert_eq!(seq.count(&one).unwrap(), 3);
    assert_eq!(seq.count_in(&one, 1..4).unwrap(), 1);
    assert_eq!(seq.find_all(&one).unwrap(), vec![0, 2, 4]);
    assert_eq!(seq.find(&Value::Int(9)).unwrap_err(), TableError::ValueNotFound);
    assert_eq!(
        seq.find_in(&one, 3..3).unwrap_err(),
        TableError::RangeIsEmpty
    );
}

#[test]
fn iteration_is_restartable_both_ways() {
    let seq = Sequence::new(values![1, 2, 3]).unwrap();
    let fwd: Vec<_> = seq.iter().cloned().collect();
    let again: Vec<_> = seq.iter().cloned().collect();
    assert_eq!(fwd, again);
    let back: Vec<_> = seq.iter_rev().cloned().collect();
    assert_eq!(back, values![3, 2, 1]);
}

#[test]
fn display_lists_elements() {
    let seq = Sequence::new(values![1, "a", ()]).unwrap();
    assert_eq!(seq.to_string(), r#"Sequence(1, "a", absent)"#);
}

#[test]
fn round_trip_through_plain_list() {
    let seq = Sequence::with_constraint(values![1, "a", ()], int_str()).unwrap();
    let rebuilt = Sequence::with_constraint(seq.to_vec(), seq.constraint()).unwrap();
    assert_eq!(rebuilt, seq);
}
