use polyseq::{seq, Element, Sequence, TypeDesc};

fn ints(seq: &Sequence) -> Vec<i64> {
    seq.to_vec::<i64>().expect("integer sequence")
}

#[test]
fn single_element_inclusive_range_removal() {
    let mut numbers = seq![1_i64, 2, 3, 4];
    numbers.drop_range(1, 1);
    assert_eq!(ints(&numbers), [1, 3, 4]);
}

#[test]
fn shift_on_empty_does_not_underflow() {
    let mut empty = Sequence::from_vec(Vec::<i64>::new());
    let fetched = empty.shift();
    assert!(fetched.is_empty());
    assert_eq!(empty.len(), 0);
}

#[test]
fn union_deduplicates_without_touching_the_source() {
    let numbers = seq![1_i64, 2, 2, 3, 3];
    let union = numbers.union(&seq![1_i64, 2, 3]).unwrap();
    assert_eq!(ints(&union), [1, 2, 3]);
    assert_eq!(ints(&numbers), [1, 2, 2, 3, 3]);
}

#[test]
fn clones_are_independent() {
    let numbers = seq![1_i64, 2, 3];
    let mut copy = numbers.clone();
    copy.push(4).unwrap();
    copy.set(0, 9_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3]);
    assert_eq!(ints(&copy), [9, 2, 3, 4]);
}

#[test]
fn full_range_copy_equals_the_source_but_does_not_alias_it() {
    let numbers = seq![1_i64, 2, 3];
    let mut copy = numbers.copy_range(0, numbers.len() as i64 - 1);
    assert_eq!(copy, numbers);
    copy.set(1, 9_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3]);
}

#[test]
fn first_n_is_a_window_into_the_source() {
    let mut numbers = seq![1_i64, 2, 3, 4];
    let mut head = numbers.first_n(2);
    assert_eq!(head.len(), 2);
    head.set(0, 10_i64).unwrap();
    assert_eq!(ints(&numbers), [10, 2, 3, 4]);
}

#[test]
fn last_n_is_a_window_into_the_source() {
    let mut numbers = seq![1_i64, 2, 3, 4];
    let mut tail = numbers.last_n(2);
    assert_eq!(tail.at(0).value::<i64>(), Some(&3));
    tail.set(-1, 9_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3, 9]);
}

#[test]
fn windows_clamp_to_the_available_elements() {
    let mut numbers = seq![1_i64, 2];
    assert_eq!(numbers.first_n(10).len(), 2);
    assert_eq!(numbers.last_n(-10).len(), 2);
    assert_eq!(numbers.first_n(0).len(), 0);

    let mut window = numbers.first_n(1);
    assert!(window.set(1, 9_i64).is_err());
    assert_eq!(ints(&numbers), [1, 2]);
}

#[test]
fn insert_before_for_positive_after_for_negative() {
    let mut numbers = seq![1_i64, 3];
    numbers.insert(1, 2_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3]);

    numbers.insert(-3, 0_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 0, 2, 3]);
}

#[test]
fn insert_at_minus_one_appends() {
    let mut numbers = seq![1_i64, 2];
    numbers.insert(-1, 3_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3]);
}

#[test]
fn insert_through_an_unresolvable_index_is_a_quiet_no_op() {
    let mut numbers = seq![1_i64, 2];
    numbers.insert(9, 3_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 2]);
}

#[test]
fn insert_into_an_absent_sequence_appends() {
    let mut fresh = Sequence::new();
    fresh.insert(5, 1_i64).unwrap();
    assert_eq!(ints(&fresh), [1]);
}

#[test]
fn set_rejects_an_unresolvable_index_and_changes_nothing() {
    let mut numbers = seq![1_i64, 2];
    let err = numbers.set(5, 9_i64).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(ints(&numbers), [1, 2]);

    numbers.set(-1, 9_i64).unwrap();
    assert_eq!(ints(&numbers), [1, 9]);
}

#[test]
fn element_types_never_mix() {
    let mut numbers = seq![1_i64];
    let err = numbers.push("two".to_string()).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(numbers.len(), 1);

    let err = numbers.push_all(vec!["a".to_string()]).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(numbers.len(), 1);
}

#[test]
fn clear_keeps_the_element_type() {
    let mut numbers = seq![1_i64, 2];
    numbers.clear();
    assert_eq!(numbers.len(), 0);
    assert!(!numbers.is_absent());
    assert!(numbers.push("text".to_string()).unwrap_err().is_type_mismatch());
}

#[test]
fn an_absent_sequence_reads_like_an_empty_one() {
    let fresh = Sequence::new();
    assert!(fresh.is_absent());
    assert_eq!(fresh.len(), 0);
    assert!(fresh.at(0).is_empty());
    assert!(fresh.first().is_empty());
    assert!(fresh.element_type().is_none());
    assert_eq!(fresh.copy_range(0, 3).len(), 0);
}

#[test]
fn the_first_mutation_repairs_an_absent_sequence() {
    let mut fresh = Sequence::new();
    fresh.push(7_i64).unwrap();
    assert!(!fresh.is_absent());
    assert!(!fresh.is_dynamic());
    assert_eq!(fresh.element_type(), Some(TypeDesc::of::<i64>()));
}

#[test]
fn an_absent_sequence_equals_an_allocated_empty_one() {
    let mut emptied = seq![1_i64];
    emptied.clear();
    assert_eq!(Sequence::new(), emptied);
    assert_eq!(seq![], Sequence::new());
    assert_ne!(Sequence::new(), seq![1_i64]);
}

#[test]
fn pop_and_shift_return_the_removed_elements() {
    let mut numbers = seq![1_i64, 2, 3];
    assert_eq!(numbers.pop().value::<i64>(), Some(&3));
    assert_eq!(numbers.shift().value::<i64>(), Some(&1));
    assert_eq!(ints(&numbers), [2]);
}

#[test]
fn bulk_removal_preserves_relative_order() {
    let mut numbers = seq![1_i64, 2, 3, 4, 5];
    let tail = numbers.pop_n(2);
    assert_eq!(ints(&tail), [4, 5]);
    let head = numbers.shift_n(2);
    assert_eq!(ints(&head), [1, 2]);
    assert_eq!(ints(&numbers), [3]);
}

#[test]
fn take_range_physically_removes_the_selection() {
    let mut numbers = seq![1_i64, 2, 3, 4];
    let middle = numbers.take_range(1, 2);
    assert_eq!(ints(&middle), [2, 3]);
    assert_eq!(ints(&numbers), [1, 4]);

    let nothing = numbers.take_range(1, 0);
    assert_eq!(nothing.len(), 0);
    assert_eq!(ints(&numbers), [1, 4]);
}

#[test]
fn take_at_tolerates_an_unresolvable_index() {
    let mut numbers = seq![1_i64, 2];
    assert_eq!(numbers.take_at(-1).value::<i64>(), Some(&2));
    assert!(numbers.take_at(9).is_empty());
    assert_eq!(ints(&numbers), [1]);
}

#[test]
fn take_matching_splits_by_predicate() {
    let mut numbers = seq![1_i64, 2, 3, 4];
    let even = numbers.take_matching(|element| {
        element
            .as_any()
            .downcast_ref::<i64>()
            .map_or(false, |n| n % 2 == 0)
    });
    assert_eq!(ints(&even), [2, 4]);
    assert_eq!(ints(&numbers), [1, 3]);
}

#[test]
fn drop_family() {
    let mut numbers = seq![1_i64, 2, 3, 4, 5, 6];
    numbers.drop_first(2);
    assert_eq!(ints(&numbers), [3, 4, 5, 6]);
    numbers.drop_last(-1);
    assert_eq!(ints(&numbers), [3, 4, 5]);
    numbers.drop_at(-2);
    assert_eq!(ints(&numbers), [3, 5]);
    numbers.drop_matching(|element| {
        element
            .as_any()
            .downcast_ref::<i64>()
            .map_or(false, |n| *n > 4)
    });
    assert_eq!(ints(&numbers), [3]);
}

#[test]
fn dropping_more_than_available_empties_the_sequence() {
    let mut numbers = seq![1_i64, 2];
    numbers.drop_first(10);
    assert_eq!(numbers.len(), 0);
}

#[test]
fn sort_both_directions() {
    let mut numbers = seq![3_i64, 1, 2];
    numbers.sort().unwrap();
    assert_eq!(ints(&numbers), [1, 2, 3]);
    numbers.sort_desc().unwrap();
    assert_eq!(ints(&numbers), [3, 2, 1]);
}

#[test]
fn dedup_keeps_first_occurrences_in_order() {
    let mut numbers = seq![3_i64, 1, 3, 2, 1];
    numbers.dedup();
    assert_eq!(ints(&numbers), [3, 1, 2]);
}

#[test]
fn dedup_is_idempotent() {
    let mut once = seq![1_i64, 2, 2, 3];
    once.dedup();
    let twice = once.deduped();
    assert_eq!(once, twice);
}

#[test]
fn reverse_and_reversed() {
    let mut numbers = seq![1_i64, 2, 3];
    let derived = numbers.reversed();
    assert_eq!(ints(&derived), [3, 2, 1]);
    assert_eq!(ints(&numbers), [1, 2, 3]);
    numbers.reverse();
    assert_eq!(ints(&numbers), [3, 2, 1]);
}

#[test]
fn swap_and_less() {
    let mut numbers = seq![1_i64, 2, 3];
    numbers.swap(0, -1);
    assert_eq!(ints(&numbers), [3, 2, 1]);
    numbers.swap(0, 9);
    assert_eq!(ints(&numbers), [3, 2, 1]);

    assert!(numbers.less(-1, 0).unwrap());
    assert!(!numbers.less(0, 1).unwrap());
    assert!(numbers.less(0, 9).unwrap_err().is_out_of_bounds());
}

#[test]
fn membership() {
    let numbers = seq![1_i64, 2, 3];
    assert!(numbers.contains(&2_i64));
    assert!(!numbers.contains(&9_i64));
    assert!(!numbers.contains(&"2".to_string()));

    let two = 2_i64;
    let nine = 9_i64;
    assert!(numbers.contains_any(&[&nine as &dyn Element, &two]));
    assert!(!numbers.contains_any(&[&nine as &dyn Element]));

    assert!(numbers.any_matches(|element| {
        element
            .as_any()
            .downcast_ref::<i64>()
            .map_or(false, |n| *n > 2)
    }));
}

#[test]
fn concat_expands_the_other_sequence() {
    let numbers = seq![1_i64, 2];
    let joined = numbers.concat(&seq![3_i64, 4]).unwrap();
    assert_eq!(ints(&joined), [1, 2, 3, 4]);
    assert_eq!(ints(&numbers), [1, 2]);
}

#[test]
fn concat_onto_an_absent_sequence_adopts_the_other_type() {
    let joined = Sequence::new().concat(&seq![1_i64, 2]).unwrap();
    assert_eq!(ints(&joined), [1, 2]);
    assert!(!joined.is_dynamic());
}

#[test]
fn concat_rejects_a_differently_typed_sequence() {
    let numbers = seq![1_i64];
    let err = numbers.concat(&seq!["a".to_string()]).unwrap_err();
    assert!(err.is_type_mismatch());
    let err = numbers.union(&seq![1.5_f64]).unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn sorted_leaves_the_source_alone() {
    let numbers = seq![2_i64, 1];
    let sorted = numbers.sorted().unwrap();
    assert_eq!(ints(&sorted), [1, 2]);
    assert_eq!(ints(&numbers), [2, 1]);
    let sorted = numbers.sorted_desc().unwrap();
    assert_eq!(ints(&sorted), [2, 1]);
}

#[test]
fn rendering() {
    assert_eq!(format!("{}", seq![1_i64, 2, 3]), "[1, 2, 3]");
    assert_eq!(format!("{}", Sequence::new()), "[]");
    assert_eq!(format!("{:?}", seq![1_i64]), "[1]");
}

#[test]
fn raw_storage_access() {
    let numbers = seq![1_i64, 2];
    assert_eq!(numbers.as_slice_of::<i64>(), Some(&[1_i64, 2][..]));
    assert_eq!(numbers.as_slice_of::<f64>(), None);
    assert_eq!(numbers.snapshot().len(), 2);
}

#[test]
fn collecting_from_an_iterator_dispatches_like_from_vec() {
    let numbers: Sequence = (1..=3_i64).collect();
    assert!(!numbers.is_dynamic());
    assert_eq!(ints(&numbers), [1, 2, 3]);
}

#[test]
fn extending_appends_in_order() {
    let mut numbers = seq![1_i64];
    numbers.extend(vec![2_i64, 3]);
    assert_eq!(ints(&numbers), [1, 2, 3]);
}

#[test]
#[should_panic = "expected element of type"]
fn extending_with_a_mismatched_type_panics() {
    let mut numbers = seq![1_i64];
    numbers.extend(vec!["a".to_string()]);
}
