use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PropertySet;

/// How many wildcards exist in a full set of cards.
pub const NUMBER_OF_WILDCARDS: usize = 2;

/// The points a wildcard is worth when it is part of a scoring line.
pub const WILDCARD_FACE_VALUE: u32 = 0;

/// A card on the grid: either a [concrete card](ConcreteCard) or a wildcard.
///
/// Wildcards have no properties of their own. They compare equal to each
/// other, since nothing about a placement depends on which wildcard it is.
///
/// Serialized as its text code, see the [`FromStr`] instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Card {
    Concrete(ConcreteCard),
    Wildcard,
}

/// A card with a fixed color, shape and face value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConcreteCard {
    pub color: Color,
    pub shape: Shape,
    pub value: FaceValue,
}

/// The color of a [concrete card](ConcreteCard).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

/// The shape of a [concrete card](ConcreteCard).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// The face value of a [concrete card](ConcreteCard), from one to four.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FaceValue {
    One,
    Two,
    Three,
    Four,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    pub fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Cross];

    pub fn code(self) -> char {
        match self {
            Shape::Circle => 'C',
            Shape::Square => 'S',
            Shape::Triangle => 'T',
            Shape::Cross => 'X',
        }
    }
}

impl FaceValue {
    pub const ALL: [FaceValue; 4] = [
        FaceValue::One,
        FaceValue::Two,
        FaceValue::Three,
        FaceValue::Four,
    ];

    /// The number printed on the card.
    pub fn points(self) -> u32 {
        self as u32 + 1
    }
}

impl ConcreteCard {
    pub fn new(color: Color, shape: Shape, value: FaceValue) -> Self {
        Self {
            color,
            shape,
            value,
        }
    }

    /// The three properties of this card.
    pub fn properties(self) -> PropertySet {
        PropertySet::from_iter([
            crate::Property::Color(self.color),
            crate::Property::Shape(self.shape),
            crate::Property::FaceValue(self.value),
        ])
    }

    /// A unique index in `0..64`, ordered by color, then shape, then value.
    pub fn to_index(self) -> u8 {
        ((self.color as u8) << 4) | ((self.shape as u8) << 2) | self.value as u8
    }

    /// Inverse of [`Self::to_index()`].
    pub const fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 64);
        Self {
            color: Color::ALL[(idx >> 4) as usize & 3],
            shape: Shape::ALL[(idx >> 2) as usize & 3],
            value: FaceValue::ALL[idx as usize & 3],
        }
    }
}

// !!!!!! NOTE: Keep the text codes in sync with the FromStr instance !!!!!!
impl Card {
    pub fn new(color: Color, shape: Shape, value: FaceValue) -> Self {
        Card::Concrete(ConcreteCard::new(color, shape, value))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Card::Wildcard)
    }

    pub fn as_concrete(&self) -> Option<ConcreteCard> {
        match *self {
            Card::Concrete(card) => Some(card),
            Card::Wildcard => None,
        }
    }

    /// The properties this card contributes to a line. Empty for a wildcard.
    pub fn match_properties(&self) -> PropertySet {
        match self {
            Card::Concrete(card) => card.properties(),
            Card::Wildcard => PropertySet::new(),
        }
    }

    /// Narrows down the properties shared by a line so far.
    ///
    /// A wildcard can stand in for any card, so it leaves `common` as is.
    pub fn match_against(&self, common: PropertySet) -> PropertySet {
        match self {
            Card::Concrete(card) => common & card.properties(),
            Card::Wildcard => common,
        }
    }

    /// The points this card is worth in a scoring line.
    pub fn face_value(&self) -> u32 {
        match self {
            Card::Concrete(card) => card.value.points(),
            Card::Wildcard => WILDCARD_FACE_VALUE,
        }
    }
}

impl From<ConcreteCard> for Card {
    fn from(card: ConcreteCard) -> Self {
        Card::Concrete(card)
    }
}

impl std::fmt::Display for ConcreteCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code: String = [self.color.code(), self.shape.code(), value_code(self.value)]
            .into_iter()
            .collect();
        f.pad(&code)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Concrete(card) => card.fmt(f),
            Card::Wildcard => f.pad("**"),
        }
    }
}

fn value_code(value: FaceValue) -> char {
    match value {
        FaceValue::One => '1',
        FaceValue::Two => '2',
        FaceValue::Three => '3',
        FaceValue::Four => '4',
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanThreeChars,
    MoreThanThreeChars,
    InvalidColor,
    InvalidShape,
    InvalidFaceValue,
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::LessThanThreeChars => write!(f, "Card code has less than three characters"),
            CardFromStrErr::MoreThanThreeChars => write!(f, "Card code has more than three characters"),
            CardFromStrErr::InvalidColor => write!(f, "Card code has an invalid color, expected one of R, G, B, Y"),
            CardFromStrErr::InvalidShape => write!(f, "Card code has an invalid shape, expected one of C, S, T, X"),
            CardFromStrErr::InvalidFaceValue => write!(f, "Card code has an invalid face value, expected 1 to 4"),
        }
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "**" {
            return Ok(Card::Wildcard);
        }
        let mut chars = s.chars();
        let color_char = chars.next().ok_or(CardFromStrErr::LessThanThreeChars)?;
        let shape_char = chars.next().ok_or(CardFromStrErr::LessThanThreeChars)?;
        let value_char = chars.next().ok_or(CardFromStrErr::LessThanThreeChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanThreeChars);
        }
        let color = match color_char {
            'R' => Color::Red,
            'G' => Color::Green,
            'B' => Color::Blue,
            'Y' => Color::Yellow,
            _ => return Err(CardFromStrErr::InvalidColor),
        };
        let shape = match shape_char {
            'C' => Shape::Circle,
            'S' => Shape::Square,
            'T' => Shape::Triangle,
            'X' => Shape::Cross,
            _ => return Err(CardFromStrErr::InvalidShape),
        };
        let value = match value_char {
            '1' => FaceValue::One,
            '2' => FaceValue::Two,
            '3' => FaceValue::Three,
            '4' => FaceValue::Four,
            _ => return Err(CardFromStrErr::InvalidFaceValue),
        };
        Ok(Card::new(color, shape, value))
    }
}

impl TryFrom<String> for Card {
    type Error = CardFromStrErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

/// Shorthand for creating cards from their text code.
///
/// The code is the color (`R`, `G`, `B`, `Y`), the shape (`C`ircle,
/// `S`quare, `T`riangle, `X` for cross) and the face value, or `**` for
/// a wildcard.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use iota::{card, Card, Color, FaceValue, Shape};
/// assert_eq!(
///     card!("GT3"),
///     Card::new(Color::Green, Shape::Triangle, FaceValue::Three)
/// );
/// assert_eq!(card!("**"), Card::Wildcard);
/// ```
#[macro_export]
macro_rules! card {
    ($code:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($code)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

/// Every concrete card, in index order.
pub static ALL_CONCRETE_CARDS: [ConcreteCard; 64] = all_concrete_cards();

const fn all_concrete_cards() -> [ConcreteCard; 64] {
    let mut cards = [ConcreteCard::from_index(0); 64];
    let mut idx = 0;
    while idx < 64 {
        cards[idx] = ConcreteCard::from_index(idx as u8);
        idx += 1;
    }
    cards
}
