mod bbox;

use std::collections::{BTreeSet, HashMap};

pub use bbox::*;
use tracing::{debug, trace};

use crate::{
    Axis, Card, CardsSet, GridAlreadyStarted, IllegalPlacement, IllegalTurn, Line, LineItem,
    Placement, Position, ALL_CARDS_SET, MAX_LINE_LENGTH,
};

/// The cards placed so far, keyed by position.
///
/// Cards are only ever added, through [`Self::start()`], [`Self::place()`] or
/// [`Self::place_sequence()`], and only after the placement has been fully
/// validated. A rejected placement leaves the grid untouched.
///
/// The grid does no synchronization of its own; mutation requires `&mut`.
#[derive(Clone, Debug)]
pub struct Grid {
    cards: HashMap<Position, Card>,
    /// The smallest area that contains all cards. `None` iff there are no cards.
    bbox: Option<BoundingBox>,
    /// The cards a wildcard may stand in for.
    domain: CardsSet,
}

/// The outcome of a validated placement, before it is committed.
#[derive(Clone, Debug)]
pub struct PlacementCalculation {
    pub card: Card,
    pub position: Position,
    /// The row through the new card.
    pub horizontal_line: Line,
    /// The column through the new card.
    pub vertical_line: Line,
}

impl PlacementCalculation {
    /// The cards of every line with more than one card, horizontal line first.
    ///
    /// Lines of a single card don't score, because that card is already
    /// counted in the other line. A card that is part of two scoring lines
    /// appears twice.
    pub fn scoring_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(2 * MAX_LINE_LENGTH);
        for line in [&self.horizontal_line, &self.vertical_line] {
            if line.len() > 1 {
                cards.extend(line.items().iter().map(|item| item.card));
            }
        }
        cards
    }

    pub fn points(&self) -> u32 {
        self.scoring_cards().iter().map(Card::face_value).sum()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid where wildcards may stand in for any concrete card.
    pub fn new() -> Self {
        Self::with_domain(ALL_CARDS_SET)
    }

    /// Creates an empty grid where wildcards may only stand in for cards from `domain`.
    pub fn with_domain(domain: CardsSet) -> Self {
        Self {
            cards: HashMap::new(),
            bbox: None,
            domain,
        }
    }

    /// Places the first card at [`Position::ORIGIN`].
    pub fn start(&mut self, card: Card) -> Result<(), GridAlreadyStarted> {
        if !self.is_empty() {
            return Err(GridAlreadyStarted);
        }
        self.commit(card, Position::ORIGIN);
        debug!(card = %card, "Started grid");
        Ok(())
    }

    /// Checks whether `card` may be placed at `position`, without placing it.
    pub fn is_placement_allowed(&self, card: Card, position: Position) -> bool {
        self.calculate(card, position).is_ok()
    }

    /// Places a card and returns the cards that score points because of it.
    ///
    /// See [`PlacementCalculation::scoring_cards()`].
    pub fn place(&mut self, card: Card, position: Position) -> Result<Vec<Card>, IllegalPlacement> {
        let calculation = self.calculate(card, position).map_err(|err| {
            trace!(card = %card, position = %position, reason = %err, "Rejected placement");
            err
        })?;
        self.commit(card, position);
        let scoring_cards = calculation.scoring_cards();
        debug!(card = %card, position = %position, points = calculation.points(), "Placed card");
        Ok(scoring_cards)
    }

    /// Places several cards in order, as in one turn, and returns the points scored.
    ///
    /// Either all cards are placed, or none are.
    pub fn place_sequence(&mut self, placements: &[Placement]) -> Result<u32, IllegalTurn> {
        if placements.is_empty() {
            return Err(IllegalTurn::NoPlacements);
        }
        let mut staged = self.clone();
        let mut points = 0;
        for (placement_idx, &Placement { card, position }) in placements.iter().enumerate() {
            let scoring_cards = staged.place(card, position).map_err(|err| {
                IllegalTurn::IllegalPlacement {
                    placement_idx,
                    card,
                    err,
                }
            })?;
            points += scoring_cards.iter().map(Card::face_value).sum::<u32>();
        }
        *self = staged;
        debug!(placements = placements.len(), points, "Placed sequence");
        Ok(points)
    }

    /// Validates placing a card and works out the lines it would be part of.
    ///
    /// This is the core function of this type. Both lines through `position`
    /// must be at most [`MAX_LINE_LENGTH`] long and have a valid
    /// [`MatchType`](crate::MatchType). At least one of them must contain another card,
    /// unless this is the first card. Finally, every wildcard in either line must be
    /// able to stand in for some card that also fits the other line through it.
    pub fn calculate(
        &self,
        card: Card,
        position: Position,
    ) -> Result<PlacementCalculation, IllegalPlacement> {
        if self.is_empty() {
            if position != Position::ORIGIN {
                return Err(IllegalPlacement::FirstCardNotAtOrigin { position });
            }
        } else if !position.has_all_neighbors() {
            return Err(IllegalPlacement::OutOfBounds { position });
        } else if self.contains(position) {
            return Err(IllegalPlacement::PositionOccupied { position });
        }

        let horizontal_line = self.create_line(card, position, Axis::Horizontal)?;
        let vertical_line = self.create_line(card, position, Axis::Vertical)?;

        if !self.is_empty() {
            // This keeps all cards connected
            if horizontal_line.len() == 1 && vertical_line.len() == 1 {
                return Err(IllegalPlacement::Disconnected { position });
            }
            self.validate_wildcards(&horizontal_line)?;
            self.validate_wildcards(&vertical_line)?;
        }

        Ok(PlacementCalculation {
            card,
            position,
            horizontal_line,
            vertical_line,
        })
    }

    /// Returns the card at the given position, if any.
    pub fn get(&self, position: Position) -> Option<Card> {
        self.cards.get(&position).copied()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cards.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The occupied cells, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Card)> + '_ {
        self.cards.iter().map(|(&position, &card)| (position, card))
    }

    /// The smallest area enclosing the cards currently on the grid.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.bbox
    }

    pub fn domain(&self) -> CardsSet {
        self.domain
    }

    /// The occupied cells in row-major order.
    pub fn to_placements(&self) -> Vec<Placement> {
        let mut placements: Vec<Placement> = self
            .iter()
            .map(|(position, card)| Placement { card, position })
            .collect();
        placements.sort_by_key(|placement| placement.position);
        placements
    }

    /// The empty positions next to at least one card, in row-major order.
    ///
    /// Every legal placement is in this set. On an empty grid, it is just the origin.
    pub fn frontier(&self) -> BTreeSet<Position> {
        if self.is_empty() {
            return BTreeSet::from([Position::ORIGIN]);
        }
        self.cards
            .keys()
            .flat_map(|position| position.neighbors())
            .filter(|position| !self.contains(*position))
            .collect()
    }

    fn commit(&mut self, card: Card, position: Position) {
        debug_assert!(!self.contains(position));
        self.cards.insert(position, card);
        match &mut self.bbox {
            Some(bbox) => bbox.update(position),
            None => self.bbox = Some(BoundingBox::singleton(position)),
        }
    }

    // Builds the line through `position` along `axis`, as if `card` was at `position`.
    //
    // The scan is bounded: once more than MAX_LINE_LENGTH cards are found, the
    // line is rejected without looking further.
    fn create_line(&self, card: Card, position: Position, axis: Axis) -> Result<Line, IllegalPlacement> {
        let mut start = position;
        for _ in 0..MAX_LINE_LENGTH {
            let previous = axis.previous(start);
            if !self.contains(previous) {
                break;
            }
            start = previous;
        }
        if start == position && !self.contains(axis.next(position)) {
            return Ok(Line::single_card(axis, card, position));
        }

        let mut items = Vec::with_capacity(MAX_LINE_LENGTH);
        let mut current = start;
        loop {
            let current_card = if current == position {
                card
            } else {
                match self.get(current) {
                    Some(c) => c,
                    None => break,
                }
            };
            if items.len() == MAX_LINE_LENGTH {
                return Err(IllegalPlacement::LineTooLong { axis });
            }
            items.push(LineItem {
                card: current_card,
                position: current,
            });
            current = axis.next(current);
        }
        Line::new(axis, items)
    }

    // Every wildcard in `line` must be able to stand in for a card that also
    // fits the crossing line through it. For the new card, the crossing line
    // is the other line of this placement; for wildcards already on the grid,
    // it is whatever line crosses theirs.
    fn validate_wildcards(&self, line: &Line) -> Result<(), IllegalPlacement> {
        let crossing_axis = line.axis().crossing();
        for item in line.wildcard_items() {
            let crossing_line = self.create_line(item.card, item.position, crossing_axis)?;
            if crossing_line.len() == 1 {
                continue;
            }
            let candidates = line.candidates_for_next_card(self.domain)
                & crossing_line.candidates_for_next_card(self.domain);
            if candidates.is_empty() {
                return Err(IllegalPlacement::WildcardConflict {
                    position: item.position,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PlacementAttempts;
    use crate::{card, Color, MatchType, Shape};

    fn grid_with(first_card: Card, placements: &[(Card, i32, i32)]) -> Grid {
        let mut grid = Grid::new();
        grid.start(first_card).unwrap();
        for &(card, row, col) in placements {
            grid.place(card, Position::new(row, col)).unwrap();
        }
        grid
    }

    fn points(cards: &[Card]) -> u32 {
        cards.iter().map(Card::face_value).sum()
    }

    // Every maximal run of cards on the grid, in both directions, is a valid line.
    fn all_lines_valid(grid: &Grid) -> bool {
        for (position, _) in grid.iter() {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                if grid.contains(axis.previous(position)) {
                    continue; // Not the start of a run
                }
                let mut cards = Vec::new();
                let mut current = position;
                while let Some(card) = grid.get(current) {
                    cards.push(card);
                    current = axis.next(current);
                }
                if MatchType::deduce(&cards).is_none() {
                    return false;
                }
            }
        }
        true
    }

    quickcheck! {
        fn rejected_placements_change_nothing(attempts: PlacementAttempts) -> bool {
            let mut grid = Grid::new();
            grid.start(attempts.first_card).unwrap();
            for &(card, position) in &attempts.attempts {
                let allowed = grid.is_placement_allowed(card, position);
                let before = grid.to_placements();
                match grid.place(card, position) {
                    Ok(_) => {
                        if !allowed || grid.len() != before.len() + 1 || grid.get(position) != Some(card) {
                            return false;
                        }
                        let mut expected = before;
                        expected.push(Placement { card, position });
                        expected.sort_by_key(|placement| placement.position);
                        if grid.to_placements() != expected {
                            return false;
                        }
                    }
                    Err(_) => {
                        if allowed || grid.to_placements() != before {
                            return false;
                        }
                    }
                }
            }
            all_lines_valid(&grid)
        }

        fn legal_placements_are_on_the_frontier(attempts: PlacementAttempts) -> bool {
            let mut grid = Grid::new();
            grid.start(attempts.first_card).unwrap();
            for &(card, position) in &attempts.attempts {
                let frontier = grid.frontier();
                if grid.place(card, position).is_ok() && !frontier.contains(&position) {
                    return false;
                }
            }
            true
        }
    }

    #[test]
    fn first_card_must_be_at_origin() {
        let mut grid = Grid::new();
        assert_eq!(
            grid.place(card!("RC1"), Position::new(0, 1)),
            Err(IllegalPlacement::FirstCardNotAtOrigin {
                position: Position::new(0, 1)
            })
        );
        assert!(grid.is_empty());
        assert!(grid.is_placement_allowed(card!("RC1"), Position::ORIGIN));
        assert_eq!(grid.place(card!("RC1"), Position::ORIGIN), Ok(vec![]));
        assert_eq!(grid.get(Position::ORIGIN), Some(card!("RC1")));
    }

    #[test]
    fn start_only_once() {
        let mut grid = Grid::new();
        assert_eq!(grid.start(card!("**")), Ok(()));
        assert_eq!(grid.start(card!("RC1")), Err(GridAlreadyStarted));
        assert_eq!(grid.get(Position::ORIGIN), Some(Card::Wildcard));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn extend_and_reject_row() {
        let mut grid = grid_with(card!("RC1"), &[]);
        let scoring_cards = grid.place(card!("RS2"), Position::new(0, 1)).unwrap();
        assert_eq!(scoring_cards, vec![card!("RC1"), card!("RS2")]);
        assert_eq!(points(&scoring_cards), 3);

        // Blue breaks the red row, and the square repeats
        assert_eq!(
            grid.place(card!("BS3"), Position::new(0, 2)),
            Err(IllegalPlacement::ConflictingLine {
                axis: Axis::Horizontal
            })
        );
        assert!(!grid.contains(Position::new(0, 2)));
    }

    #[test]
    fn occupied_and_disconnected() {
        let grid = grid_with(card!("RC1"), &[(card!("RS2"), 0, 1)]);
        let calc = |card, row, col| grid.calculate(card, Position::new(row, col)).map(|c| c.points());
        assert_eq!(
            calc(card!("RT3"), 0, 1),
            Err(IllegalPlacement::PositionOccupied {
                position: Position::new(0, 1)
            })
        );
        assert_eq!(
            calc(card!("RT3"), 0, 3),
            Err(IllegalPlacement::Disconnected {
                position: Position::new(0, 3)
            })
        );
        assert_eq!(
            calc(card!("RT3"), 1, 2),
            Err(IllegalPlacement::Disconnected {
                position: Position::new(1, 2)
            })
        );
        assert_eq!(calc(card!("RT3"), 0, -1), Ok(1 + 2 + 3));
    }

    #[test]
    fn line_too_long() {
        let grid = grid_with(
            card!("RC1"),
            &[
                (card!("RC2"), 0, 1),
                (card!("RC3"), 0, 2),
                (card!("RC4"), 0, 3),
            ],
        );
        for col in [-1, 4] {
            assert_eq!(
                grid.calculate(card!("RS1"), Position::new(0, col)).map(|_| ()),
                Err(IllegalPlacement::LineTooLong {
                    axis: Axis::Horizontal
                })
            );
        }
        assert!(grid.is_placement_allowed(card!("RS1"), Position::new(1, 0)));
    }

    #[test]
    fn joining_two_runs_is_too_long() {
        let grid = grid_with(
            card!("RC1"),
            &[
                (card!("RC2"), 0, 1),
                (card!("RS2"), 1, 1),
                (card!("RS3"), 1, 2),
                (card!("RS4"), 1, 3),
                (card!("RC3"), 0, 3),
                (card!("RC4"), 0, 4),
            ],
        );
        // Filling the gap at (0, 2) would make a row of five
        assert_eq!(
            grid.calculate(card!("RT1"), Position::new(0, 2)).map(|_| ()),
            Err(IllegalPlacement::LineTooLong {
                axis: Axis::Horizontal
            })
        );
    }

    #[test]
    fn card_in_two_lines_scores_twice() {
        let mut grid = grid_with(
            card!("RC1"),
            &[
                (card!("RS2"), 0, 1),
                (card!("RT3"), 0, 2),
                (card!("GT3"), 1, 2),
                (card!("GX4"), 1, 3),
            ],
        );
        let scoring_cards = grid.place(card!("RX4"), Position::new(0, 3)).unwrap();
        assert_eq!(
            scoring_cards,
            vec![
                card!("RC1"),
                card!("RS2"),
                card!("RT3"),
                card!("RX4"),
                card!("RX4"),
                card!("GX4")
            ]
        );
        assert_eq!(points(&scoring_cards), 1 + 2 + 3 + 4 + 4 + 4);
    }

    // A red row (0, 0)..(0, 1) and a column of all-different cards below (0, 2).
    fn red_row_and_different_column(bottom: Card) -> Grid {
        grid_with(
            card!("RC1"),
            &[
                (card!("RS2"), 0, 1),
                (card!("GS3"), 1, 1),
                (card!("YT4"), 1, 2),
                (bottom, 2, 2),
            ],
        )
    }

    #[test]
    fn wildcard_without_interpretation() {
        // The column already uses red, so no red card fits both lines
        let mut grid = red_row_and_different_column(card!("RX1"));
        assert_eq!(
            grid.place(Card::Wildcard, Position::new(0, 2)),
            Err(IllegalPlacement::WildcardConflict {
                position: Position::new(0, 2)
            })
        );
        assert!(!grid.contains(Position::new(0, 2)));
    }

    #[test]
    fn wildcard_with_interpretation() {
        // E.g. a red square three fits both lines
        let mut grid = red_row_and_different_column(card!("BX1"));
        let scoring_cards = grid.place(Card::Wildcard, Position::new(0, 2)).unwrap();
        assert_eq!(
            scoring_cards,
            vec![
                card!("RC1"),
                card!("RS2"),
                Card::Wildcard,
                Card::Wildcard,
                card!("YT4"),
                card!("BX1")
            ]
        );
        assert_eq!(points(&scoring_cards), 3 + 5);
    }

    #[test]
    fn placed_wildcard_constrains_later_cards() {
        // The wildcard at (0, 1) is green because of its column
        let grid = grid_with(
            card!("RC1"),
            &[
                (Card::Wildcard, 0, 1),
                (card!("GS2"), 1, 1),
                (card!("GT3"), 2, 1),
            ],
        );
        // Red circle row: a green circle can be the wildcard
        assert!(grid.is_placement_allowed(card!("RC3"), Position::new(0, 2)));
        // Red row: the wildcard would have to be red and green
        assert_eq!(
            grid.calculate(card!("RS4"), Position::new(0, 2)).map(|_| ()),
            Err(IllegalPlacement::WildcardConflict {
                position: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn wildcard_domain_is_respected() {
        let no_red_circles =
            ALL_CARDS_SET.filter(|card| card.color != Color::Red || card.shape != Shape::Circle);
        for (domain, allowed) in [(ALL_CARDS_SET, true), (no_red_circles, false)] {
            let mut grid = Grid::with_domain(domain);
            grid.start(card!("RC1")).unwrap();
            for (card, row, col) in [
                (card!("RC3"), 0, 1),
                (card!("RS2"), 1, 1),
                (card!("GS2"), 1, 2),
                (card!("BT3"), 2, 2),
                (card!("YX4"), 3, 2),
            ] {
                grid.place(card, Position::new(row, col)).unwrap();
            }
            // The row wants red or circle, the column below rules out everything but RC1
            assert_eq!(
                grid.is_placement_allowed(Card::Wildcard, Position::new(0, 2)),
                allowed
            );
        }
    }

    #[test]
    fn extending_the_column_of_a_wildcard() {
        // The wildcard stands in for a red card in its row
        let grid = grid_with(
            card!("RC1"),
            &[
                (Card::Wildcard, 0, 1),
                (card!("RS2"), 0, 2),
                (card!("GT3"), 1, 1),
            ],
        );
        // The column becomes all-different and already uses red
        assert_eq!(
            grid.calculate(card!("RX4"), Position::new(2, 1)).map(|_| ()),
            Err(IllegalPlacement::WildcardConflict {
                position: Position::new(0, 1)
            })
        );
        // E.g. a red circle one still fits both lines of the wildcard
        assert!(grid.is_placement_allowed(card!("YS4"), Position::new(2, 1)));
        assert!(grid.is_placement_allowed(card!("BX4"), Position::new(2, 1)));
    }

    #[test]
    fn edges_of_the_coordinate_range_are_rejected() {
        let mut grid = grid_with(card!("RC1"), &[]);
        for position in [
            Position::new(i32::MAX, 0),
            Position::new(i32::MIN, 0),
            Position::new(0, i32::MAX),
            Position::new(0, i32::MIN),
        ] {
            assert!(!grid.is_placement_allowed(card!("RS2"), position));
            assert_eq!(
                grid.place(card!("RS2"), position),
                Err(IllegalPlacement::OutOfBounds { position })
            );
        }
        assert_eq!(grid.len(), 1);
        assert!(grid.is_placement_allowed(card!("RS2"), Position::new(0, 1)));
    }

    #[test]
    fn sequence_scores_every_placement() {
        let mut grid = grid_with(card!("RC1"), &[]);
        let turn = [
            Placement {
                card: card!("RS2"),
                position: Position::new(0, 1),
            },
            Placement {
                card: card!("RT3"),
                position: Position::new(0, 2),
            },
        ];
        assert_eq!(grid.place_sequence(&turn), Ok(3 + 6));
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn sequence_is_atomic() {
        let mut grid = grid_with(card!("RC1"), &[]);
        let turn = [
            Placement {
                card: card!("RS2"),
                position: Position::new(0, 1),
            },
            Placement {
                card: card!("BS3"),
                position: Position::new(0, 2),
            },
        ];
        assert_eq!(
            grid.place_sequence(&turn),
            Err(IllegalTurn::IllegalPlacement {
                placement_idx: 1,
                card: card!("BS3"),
                err: IllegalPlacement::ConflictingLine {
                    axis: Axis::Horizontal
                }
            })
        );
        assert_eq!(grid.len(), 1);
        assert!(!grid.contains(Position::new(0, 1)));
        assert_eq!(grid.place_sequence(&[]), Err(IllegalTurn::NoPlacements));
    }

    #[test]
    fn frontier_and_bbox() {
        let mut grid = Grid::new();
        assert_eq!(grid.frontier(), BTreeSet::from([Position::ORIGIN]));
        assert_eq!(grid.bbox(), None);
        grid.start(card!("RC1")).unwrap();
        grid.place(card!("RS2"), Position::new(0, 1)).unwrap();
        assert_eq!(grid.frontier().len(), 6);
        assert_eq!(
            grid.bbox(),
            Some(BoundingBox {
                row_min: 0,
                col_min: 0,
                row_max: 0,
                col_max: 1
            })
        );
    }
}
