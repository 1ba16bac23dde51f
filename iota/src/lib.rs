pub use cards::*;
pub use cards_set::*;
pub use errors::*;
pub use grid::*;
pub use line::*;
pub use match_type::*;
pub use position::*;
pub use properties::*;
pub use record::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod cards;
mod cards_set;
mod errors;
mod grid;
mod line;
mod match_type;
mod position;
mod properties;
mod record;
mod visualization;
