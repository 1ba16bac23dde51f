use crate::{Card, CardsSet, PropertySet, MAX_LINE_LENGTH};

/// The discipline that the cards of a line obey.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// All concrete cards share at least one property.
    Same,
    /// No two concrete cards share any property.
    Different,
    /// At most one concrete card, so every extension is still possible.
    Undetermined,
}

impl MatchType {
    /// Deduces the match type of the cards of a line, in order.
    ///
    /// Returns `None` if the line is invalid, i.e. it is longer than
    /// [`MAX_LINE_LENGTH`] or its concrete cards are neither all matching
    /// nor all different.
    pub fn deduce(cards: &[Card]) -> Option<MatchType> {
        if cards.len() > MAX_LINE_LENGTH {
            return None;
        }
        let num_concrete_cards = cards.iter().filter(|card| !card.is_wildcard()).count();
        if num_concrete_cards <= 1 {
            return Some(MatchType::Undetermined);
        }

        // Seeded by the first concrete card; wildcards before it are skipped.
        let mut common: Option<PropertySet> = None;
        let mut all = PropertySet::new();
        let mut all_unique = true;
        for card in cards {
            match common {
                None => {
                    if !card.is_wildcard() {
                        common = Some(card.match_properties());
                        all = card.match_properties();
                    }
                }
                Some(prior) => {
                    common = Some(card.match_against(prior));
                    // A repeated property makes the union smaller than the sum of sizes
                    let properties = card.match_properties();
                    let expected_len = all.len() + properties.len();
                    all |= properties;
                    if all.len() < expected_len {
                        all_unique = false;
                    }
                }
            }
        }

        match common {
            None => Some(MatchType::Undetermined),
            Some(common) if !common.is_empty() => Some(MatchType::Same),
            Some(_) if all_unique => Some(MatchType::Different),
            Some(_) => None,
        }
    }

    /// The concrete cards from `domain` that could fill an open slot of a line
    /// with this match type and the given cards.
    ///
    /// Duplicates of cards already in the line are not excluded.
    pub fn candidates_for_next_card(self, cards: &[Card], domain: CardsSet) -> CardsSet {
        match self {
            MatchType::Undetermined => domain,
            MatchType::Same => {
                let common = common_properties(cards);
                domain.filter(|candidate| !candidate.properties().is_disjoint(common))
            }
            MatchType::Different => {
                let used = cards
                    .iter()
                    .fold(PropertySet::new(), |used, card| used | card.match_properties());
                domain.filter(|candidate| candidate.properties().is_disjoint(used))
            }
        }
    }
}

/// The properties shared by all concrete cards. Empty if there are none.
fn common_properties(cards: &[Card]) -> PropertySet {
    let mut concrete_cards = cards.iter().filter(|card| !card.is_wildcard());
    match concrete_cards.next() {
        Some(first) => concrete_cards.fold(first.match_properties(), |common, card| {
            card.match_against(common)
        }),
        None => PropertySet::new(),
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Same => write!(f, "same"),
            MatchType::Different => write!(f, "different"),
            MatchType::Undetermined => write!(f, "undetermined"),
        }
    }
}
