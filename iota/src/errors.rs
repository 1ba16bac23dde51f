use crate::{Axis, Card, Position};

/// The error type for [`Grid::calculate()`](crate::Grid::calculate), i.e. for placing a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    FirstCardNotAtOrigin { position: Position },
    OutOfBounds { position: Position },
    PositionOccupied { position: Position },
    LineTooLong { axis: Axis },
    ConflictingLine { axis: Axis },
    Disconnected { position: Position },
    WildcardConflict { position: Position },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::FirstCardNotAtOrigin { position } =>
                write!(f, "The first card must be placed at (0, 0), not at {}", position),
            IllegalPlacement::OutOfBounds { position } =>
                write!(f, "A card at {} would have no room for neighbors", position),
            IllegalPlacement::PositionOccupied { position } =>
                write!(f, "There is already a card at {}", position),
            IllegalPlacement::LineTooLong { axis } =>
                write!(f, "The {} line would be longer than four cards", axis),
            IllegalPlacement::ConflictingLine { axis } =>
                write!(f, "The cards of the {} line would neither all share a property nor all be different", axis),
            IllegalPlacement::Disconnected { position } =>
                write!(f, "A card at {} would not be next to any other card", position),
            IllegalPlacement::WildcardConflict { position } =>
                write!(f, "No card could stand in for the wildcard at {} in both of its lines", position),
        }
    }
}

/// The error type for [`Grid::start()`](crate::Grid::start).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridAlreadyStarted;

impl std::error::Error for GridAlreadyStarted {}

impl std::fmt::Display for GridAlreadyStarted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot start a grid that already has cards on it")
    }
}

/// The error type for [`Grid::place_sequence()`](crate::Grid::place_sequence), i.e. for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalTurn {
    NoPlacements,
    IllegalPlacement {
        placement_idx: usize,
        card: Card,
        err: IllegalPlacement,
    },
}

impl std::error::Error for IllegalTurn {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalTurn::IllegalPlacement { err, .. } => Some(err),
            IllegalTurn::NoPlacements => None,
        }
    }
}

fn ordinal_number(num: usize) -> String {
    match num {
        0 => String::from("first"),
        1 => String::from("second"),
        2 => String::from("third"),
        3 => String::from("fourth"),
        _ => format!("{}th", num + 1),
    }
}

impl std::fmt::Display for IllegalTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalTurn::NoPlacements => write!(f, "Tried to play a turn without placing any card"),
            IllegalTurn::IllegalPlacement {
                placement_idx,
                card,
                err: _,
            } => write!(
                f,
                "Error placing the {} card, which was {}",
                ordinal_number(*placement_idx),
                card
            ),
        }
    }
}
