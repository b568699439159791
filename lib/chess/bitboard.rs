use crate::chess::Square;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Constructor, Not};
use std::fmt::{self, Write};

/// A set of squares on the board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for sq in Square::iter() {
            f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
            f.write_char(if sq.col() < Square::SIDE - 1 { ' ' } else { '\n' })?;
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty board.
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A full board.
    pub const fn full() -> Self {
        Bitboard(u64::MAX)
    }

    /// The number of [`Square`]s in the set.
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    pub const fn contains(&self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    /// Adds a [`Square`] to this set.
    pub const fn with(&self, sq: Square) -> Self {
        Bitboard(self.0 | 1 << sq.index())
    }

    /// Removes a [`Square`] from this set.
    pub const fn without(&self, sq: Square) -> Self {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    /// An iterator over the [`Square`]s in this set, row by row.
    pub const fn iter(&self) -> Squares {
        Squares(*self)
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Self {
        Bitboard::empty().with(sq)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let sq = Square::from_index(self.0 .0.trailing_zeros() as usize);
            self.0 = self.0.without(sq);
            Some(sq)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Squares {
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[test]
    fn empty_constructs_board_with_no_squares() {
        assert_eq!(Bitboard::empty().iter().count(), 0);
    }

    #[test]
    fn full_constructs_board_with_all_squares() {
        assert_eq!(Bitboard::full().iter().count(), 64);
    }

    #[proptest]
    fn len_returns_number_of_squares_in_the_set(bb: Bitboard) {
        assert_eq!(bb.len(), bb.iter().count());
    }

    #[proptest]
    fn is_empty_returns_whether_there_are_squares_in_the_set(bb: Bitboard) {
        assert_eq!(bb.is_empty(), bb.iter().count() == 0);
    }

    #[proptest]
    fn contains_checks_whether_square_is_in_the_set(bb: Bitboard, sq: Square) {
        assert_eq!(bb.contains(sq), bb.iter().any(|s| s == sq));
    }

    #[proptest]
    fn with_adds_square_to_set(bb: Bitboard, sq: Square) {
        assert!(bb.with(sq).contains(sq));
        assert_eq!(bb.with(sq).without(sq), bb.without(sq));
    }

    #[proptest]
    fn without_removes_square_from_set(bb: Bitboard, sq: Square) {
        assert!(!bb.without(sq).contains(sq));
    }

    #[proptest]
    fn bitboard_can_be_collected_from_squares(sqs: HashSet<Square>) {
        let bb: Bitboard = sqs.iter().copied().collect();
        assert_eq!(bb.iter().collect::<HashSet<_>>(), sqs);
    }

    #[proptest]
    fn iter_returns_squares_in_ascending_order(bb: Bitboard) {
        let v: Vec<_> = bb.iter().collect();
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[proptest]
    fn iter_returns_iterator_of_exact_size(bb: Bitboard) {
        assert_eq!(bb.iter().len(), bb.len());
    }

    #[proptest]
    fn union_contains_squares_of_both_sets(a: Bitboard, b: Bitboard, sq: Square) {
        assert_eq!((a | b).contains(sq), a.contains(sq) || b.contains(sq));
        assert_eq!((a & b).contains(sq), a.contains(sq) && b.contains(sq));
        assert_eq!((!a).contains(sq), !a.contains(sq));
    }
}
