use polyseq::index::{magnitude, negated, resolve_index, resolve_range};
use polyseq::ErrorCode;

#[test]
fn positive_and_negative_indices_agree() {
    for len in 1..6_usize {
        for i in 0..len as i64 {
            let positive = resolve_index(len, i);
            let negative = resolve_index(len, i - len as i64);
            assert_eq!(positive, Some(i as usize));
            assert_eq!(positive, negative);
        }
    }
}

#[test]
fn zero_length_never_resolves() {
    for i in -3..=3 {
        assert_eq!(resolve_index(0, i), None);
    }
}

#[test]
fn out_of_range_indices_do_not_resolve() {
    assert_eq!(resolve_index(4, 4), None);
    assert_eq!(resolve_index(4, -5), None);
    assert_eq!(resolve_index(4, 3), Some(3));
    assert_eq!(resolve_index(4, -4), Some(0));
}

#[test]
fn no_bounds_selects_everything() {
    assert_eq!(resolve_range(4, &[]).unwrap(), Some((0, 3)));
    assert_eq!(resolve_range(1, &[]).unwrap(), Some((0, 0)));
}

#[test]
fn no_bounds_over_nothing_is_empty_not_underflow() {
    assert_eq!(resolve_range(0, &[]).unwrap(), None);
}

#[test]
fn a_single_bound_is_rejected() {
    let err = resolve_range(4, &[2]).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::SingleBound);
}

#[test]
fn crossed_bounds_select_nothing() {
    // 2 and -3 resolve to positions 2 and 1.
    assert_eq!(resolve_range(4, &[2, -3]).unwrap(), None);
    assert_eq!(resolve_range(4, &[3, 0]).unwrap(), None);
}

#[test]
fn overflowing_bounds_clamp_to_the_valid_range() {
    assert_eq!(resolve_range(4, &[-6, 6]).unwrap(), Some((0, 3)));
    assert_eq!(resolve_range(4, &[-6, 2]).unwrap(), Some((0, 2)));
    assert_eq!(resolve_range(4, &[1, 9]).unwrap(), Some((1, 3)));
}

#[test]
fn end_bound_is_inclusive() {
    assert_eq!(resolve_range(4, &[1, 2]).unwrap(), Some((1, 2)));
    assert_eq!(resolve_range(4, &[1, 1]).unwrap(), Some((1, 1)));
}

#[test]
fn fully_out_of_range_on_one_side_is_empty() {
    assert_eq!(resolve_range(4, &[4, 9]).unwrap(), None);
    assert_eq!(resolve_range(4, &[-9, -5]).unwrap(), None);
}

#[test]
fn count_normalizers() {
    assert_eq!(magnitude(3), 3);
    assert_eq!(magnitude(-3), 3);
    assert_eq!(magnitude(0), 0);
    assert_eq!(negated(3), -3);
    assert_eq!(negated(-3), -3);
    assert_eq!(negated(0), 0);
}
