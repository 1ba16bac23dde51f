use serde::{Deserialize, Serialize};

use crate::{Card, Position};

/// Specifies which card to place, and where.
///
/// In JSON, the position is flattened: `{"card": "RS2", "row": 0, "col": 1}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub card: Card,
    #[serde(flatten)]
    pub position: Position,
}

/// The cards placed in one turn, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn(pub Vec<Placement>);

/// Everything needed to rebuild a grid: the first card, which is always
/// at the origin, followed by the turns in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub first_card: Card,
    pub turns: Vec<Turn>,
}
