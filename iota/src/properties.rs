use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::{Color, FaceValue, Shape};

/// One classifiable attribute value of a card.
///
/// Colors, shapes and face values are distinct variants, so two cards can
/// only share a property if they agree within the same category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Color(Color),
    Shape(Shape),
    FaceValue(FaceValue),
}

impl Property {
    fn to_index(self) -> u8 {
        match self {
            Property::Color(color) => color as u8,
            Property::Shape(shape) => 4 + shape as u8,
            Property::FaceValue(value) => 8 + value as u8,
        }
    }

    fn from_index(idx: u8) -> Self {
        match idx {
            0..=3 => Property::Color(Color::ALL[idx as usize]),
            4..=7 => Property::Shape(Shape::ALL[idx as usize - 4]),
            8..=11 => Property::FaceValue(FaceValue::ALL[idx as usize - 8]),
            _ => panic!("Property::from_index called with {}", idx),
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::Color(color) => write!(f, "{:?}", color),
            Property::Shape(shape) => write!(f, "{:?}", shape),
            Property::FaceValue(value) => write!(f, "{}", value.points()),
        }
    }
}

/// A compact set of [`Property`] values.
///
/// Like [`CardsSet`](crate::CardsSet), this is an immutable [`Copy`] type whose
/// "mutating" methods return a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertySet {
    // Only the low 12 bits are used: colors, then shapes, then face values.
    bits: u16,
}

const VALID_BITS: u16 = 0x0fff;

impl PropertySet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, property: Property) -> bool {
        (self.bits & (1u16 << property.to_index())) != 0
    }

    /// Whether the two sets have no property in common.
    pub fn is_disjoint(self, other: Self) -> bool {
        (self.bits & other.bits) == 0
    }
}

bitset_traits!(PropertySet, VALID_BITS);

impl FromIterator<Property> for PropertySet {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        let mut bits = 0;
        for property in iter {
            bits |= 1u16 << property.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for PropertySet {
    type Item = Property;

    type IntoIter = PropertySetIter;

    fn into_iter(self) -> Self::IntoIter {
        PropertySetIter { bits: self.bits }
    }
}

/// Iterator for a [`PropertySet`]: colors first, then shapes, then face values.
#[derive(Clone, Copy, Debug)]
pub struct PropertySetIter {
    bits: u16,
}

impl Iterator for PropertySetIter {
    type Item = Property;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as u8;
            self.bits ^= 1u16 << idx;
            Some(Property::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PropertySetIter {}

impl FusedIterator for PropertySetIter {}
