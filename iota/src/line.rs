use crate::{Axis, Card, CardsSet, IllegalPlacement, MatchType, Position};

/// No line may have more cards than this.
pub const MAX_LINE_LENGTH: usize = 4;

/// A card in a line, together with where it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub card: Card,
    pub position: Position,
}

/// A contiguous run of cards along one axis, including a card that is about
/// to be placed.
///
/// A line is only ever constructed with a valid [`MatchType`], and is never
/// stored: it is rebuilt from the grid for every placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    axis: Axis,
    items: Vec<LineItem>,
    match_type: MatchType,
}

impl Line {
    /// A line with only the given card in it.
    pub fn single_card(axis: Axis, card: Card, position: Position) -> Self {
        Self {
            axis,
            items: vec![LineItem { card, position }],
            match_type: MatchType::Undetermined,
        }
    }

    /// Creates a line from consecutive items along `axis`.
    ///
    /// Fails if there are too many items, or if their cards match neither
    /// way.
    pub fn new(axis: Axis, items: Vec<LineItem>) -> Result<Self, IllegalPlacement> {
        debug_assert!(items
            .windows(2)
            .all(|pair| axis.next(pair[0].position) == pair[1].position));
        if items.len() > MAX_LINE_LENGTH {
            return Err(IllegalPlacement::LineTooLong { axis });
        }
        let cards: Vec<Card> = items.iter().map(|item| item.card).collect();
        let match_type =
            MatchType::deduce(&cards).ok_or(IllegalPlacement::ConflictingLine { axis })?;
        Ok(Self {
            axis,
            items,
            match_type,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn cards(&self) -> Vec<Card> {
        self.items.iter().map(|item| item.card).collect()
    }

    pub fn wildcard_items(&self) -> impl Iterator<Item = LineItem> + '_ {
        self.items
            .iter()
            .copied()
            .filter(|item| item.card.is_wildcard())
    }

    /// The cards from `domain` that could legally take an open slot in this line.
    pub fn candidates_for_next_card(&self, domain: CardsSet) -> CardsSet {
        self.match_type
            .candidates_for_next_card(&self.cards(), domain)
    }
}
