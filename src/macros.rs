/// Construct a [`Sequence`] from a list of elements.
///
/// The elements must share one type; the sequence dispatches on it exactly
/// as [`Sequence::from_vec`] does. With no elements the result is the
/// absent sequence, which fixes its element type on first mutation.
///
/// ```
/// use polyseq::seq;
///
/// let numbers = seq![1_i64, 2, 3];
/// assert_eq!(numbers.len(), 3);
/// assert!(!numbers.is_dynamic());
///
/// let nothing = seq![];
/// assert!(nothing.is_absent());
/// ```
///
/// [`Sequence`]: crate::Sequence
/// [`Sequence::from_vec`]: crate::Sequence::from_vec
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Sequence::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Sequence::from_vec(vec![$($value),+])
    };
}
