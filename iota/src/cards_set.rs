use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::{ConcreteCard, ALL_CONCRETE_CARDS};

/// A compact set of [`ConcreteCard`]s.
///
/// There are exactly 64 concrete cards, so every card gets one bit.
/// Allows intersection/union/xor with other such sets via bitwise ops.
/// Also implements [`IntoIterator`], so it can be converted into e.g.
/// a vector with `Vec::from_iter(cards_set)`.
///
/// This is also the type of a candidate domain: the universe of cards
/// that [candidate computation](crate::MatchType::candidates_for_next_card)
/// picks from.
///
/// ```
/// use iota::{card, CardsSet};
/// let mut set = CardsSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CardsSet`.
/// set = set.insert(card!("GC2").as_concrete().unwrap());
/// set = set.insert(card!("GC2").as_concrete().unwrap()); // Inserting a second time has no effect
/// set = set.insert(card!("RS4").as_concrete().unwrap());
/// assert_eq!(set.len(), 2);
/// ```
///
/// # Note on immutability
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place (except for `std::ops::BitXxxAssign` trait methods).
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardsSet {
    bits: u64,
}

/// Equal to `CardsSet::from_iter(ALL_CONCRETE_CARDS)`.
pub const ALL_CARDS_SET: CardsSet = CardsSet { bits: u64::MAX };

impl CardsSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn contains(self, card: ConcreteCard) -> bool {
        (self.bits & (1u64 << card.to_index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, card: ConcreteCard) -> Self {
        Self {
            bits: self.bits | (1u64 << card.to_index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, card: ConcreteCard) -> Self {
        Self {
            bits: self.bits & !(1u64 << card.to_index()),
        }
    }

    /// Keeps only the cards for which `predicate` holds.
    #[must_use]
    pub fn filter(self, mut predicate: impl FnMut(ConcreteCard) -> bool) -> Self {
        self.into_iter().filter(|&card| predicate(card)).collect()
    }
}

bitset_traits!(CardsSet, u64::MAX);

impl FromIterator<ConcreteCard> for CardsSet {
    fn from_iter<T: IntoIterator<Item = ConcreteCard>>(iter: T) -> Self {
        let mut bits = 0;
        for card in iter {
            bits |= 1u64 << card.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for CardsSet {
    type Item = ConcreteCard;

    type IntoIter = CardsSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardsSetIter { bits: self.bits }
    }
}

/// Iterator for a [`CardsSet`] that returns cards in [index](ConcreteCard::to_index) order.
#[derive(Clone, Copy, Debug)]
pub struct CardsSetIter {
    bits: u64,
}

impl Iterator for CardsSetIter {
    type Item = ConcreteCard;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the card index
            let card_idx = self.bits.trailing_zeros() as u8;
            self.bits ^= 1u64 << card_idx;
            Some(ALL_CONCRETE_CARDS[card_idx as usize])
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CardsSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CardsSetIter {}
