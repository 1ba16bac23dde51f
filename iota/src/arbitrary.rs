use quickcheck::{Arbitrary, Gen};

use crate::{Card, Color, ConcreteCard, FaceValue, Position, Shape};

/// The cards of a line, possibly too long to be valid.
#[derive(Clone, Debug)]
pub struct CardRun(pub Vec<Card>);

impl Arbitrary for CardRun {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 7;
        CardRun((0..len).map(|_| Card::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(CardRun))
    }
}

/// A first card, followed by attempts to place cards close to the origin.
///
/// Most attempts are illegal, but enough of them succeed to grow small grids.
#[derive(Clone, Debug)]
pub struct PlacementAttempts {
    pub first_card: Card,
    pub attempts: Vec<(Card, Position)>,
}

impl Arbitrary for PlacementAttempts {
    fn arbitrary(g: &mut Gen) -> Self {
        let first_card = Card::arbitrary(g);
        let num_attempts = usize::arbitrary(g) % 200;
        let attempts = (0..num_attempts)
            .map(|_| {
                let row = (u8::arbitrary(g) % 7) as i32 - 3;
                let col = (u8::arbitrary(g) % 7) as i32 - 3;
                (Card::arbitrary(g), Position::new(row, col))
            })
            .collect();
        PlacementAttempts {
            first_card,
            attempts,
        }
    }

    // Only truncates, since dropping an attempt from the middle changes
    // which later attempts are legal
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let first_card = self.first_card;
        let attempts = self.attempts.clone();
        let len = attempts.len();
        let mut lens = vec![0, len / 2, len.saturating_sub(1)];
        lens.dedup();
        lens.retain(|&shorter| shorter < len);
        Box::new(lens.into_iter().map(move |shorter| PlacementAttempts {
            first_card,
            attempts: attempts[..shorter].to_vec(),
        }))
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Color::ALL).unwrap()
    }
}

impl Arbitrary for Shape {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Shape::ALL).unwrap()
    }
}

impl Arbitrary for FaceValue {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&FaceValue::ALL).unwrap()
    }
}

impl Arbitrary for ConcreteCard {
    fn arbitrary(g: &mut Gen) -> Self {
        ConcreteCard::new(
            Color::arbitrary(g),
            Shape::arbitrary(g),
            FaceValue::arbitrary(g),
        )
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        // About as rare as in a full set of cards
        if u8::arbitrary(g) % 16 == 0 {
            Card::Wildcard
        } else {
            Card::Concrete(ConcreteCard::arbitrary(g))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_attempts_shrink_to_prefixes() {
        let attempts = PlacementAttempts {
            first_card: Card::Wildcard,
            attempts: (0..9).map(|col| (Card::Wildcard, Position::new(0, col))).collect(),
        };
        let shrunk: Vec<PlacementAttempts> = attempts.shrink().collect();
        assert_eq!(
            shrunk.iter().map(|s| s.attempts.len()).collect::<Vec<_>>(),
            vec![0, 4, 8]
        );
        assert!(shrunk
            .iter()
            .all(|s| attempts.attempts.starts_with(&s.attempts)));
        let empty = PlacementAttempts {
            first_card: Card::Wildcard,
            attempts: Vec::new(),
        };
        assert_eq!(empty.shrink().count(), 0);
    }
}
