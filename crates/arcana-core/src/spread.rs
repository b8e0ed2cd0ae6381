use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of supported spread layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadKind {
    /// One card for a daily insight.
    Single,
    /// Past, present, future.
    #[default]
    ThreeCard,
    /// Five cards laid out as a cross.
    FiveCardCross,
}

impl SpreadKind {
    /// Parse a spread kind from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "single" | "one" | "one card" | "daily" | "1" => Some(Self::Single),
            "three card" | "three" | "past present future" | "3" => Some(Self::ThreeCard),
            "five card cross" | "five" | "cross" | "celtic cross" | "5" => {
                Some(Self::FiveCardCross)
            }
            _ => None,
        }
    }

    /// All spread kinds in display order.
    pub fn all() -> &'static [Self] {
        &[Self::Single, Self::ThreeCard, Self::FiveCardCross]
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Single => "Single Card",
            Self::ThreeCard => "Past, Present, Future",
            Self::FiveCardCross => "Five-Card Cross",
        }
    }

    /// Stable identifier accepted by [`SpreadKind::parse`].
    pub fn slug(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::ThreeCard => "three-card",
            Self::FiveCardCross => "five-card-cross",
        }
    }

    /// The built-in definition for this kind.
    pub fn definition(self) -> SpreadDefinition {
        let positions: &[&str] = match self {
            Self::Single => &["Daily Insight"],
            Self::ThreeCard => &["Past", "Present", "Future"],
            Self::FiveCardCross => &[
                "Core",
                "Challenge",
                "Subconscious",
                "Past",
                "Potential Outcome",
            ],
        };
        SpreadDefinition {
            kind: self,
            slots: positions.len(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl fmt::Display for SpreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A spread layout: how many cards are drawn and what each position means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadDefinition {
    /// Which spread this is.
    pub kind: SpreadKind,
    /// Number of cards to draw.
    pub slots: usize,
    /// Position labels, one per slot, in draw order.
    pub positions: Vec<String>,
}

impl SpreadDefinition {
    /// The label for the position at `index`, if within the spread.
    pub fn position(&self, index: usize) -> Option<&str> {
        self.positions.get(index).map(String::as_str)
    }
}

impl Default for SpreadDefinition {
    fn default() -> Self {
        SpreadKind::default().definition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_definitions_are_valid() {
        for kind in SpreadKind::all() {
            let def = kind.definition();
            assert_eq!(def.kind, *kind);
            assert_eq!(def.positions.len(), def.slots);
        }
    }

    #[test]
    fn slot_counts() {
        assert_eq!(SpreadKind::Single.definition().slots, 1);
        assert_eq!(SpreadKind::ThreeCard.definition().slots, 3);
        assert_eq!(SpreadKind::FiveCardCross.definition().slots, 5);
    }

    #[test]
    fn three_card_positions() {
        let def = SpreadKind::ThreeCard.definition();
        assert_eq!(def.positions, vec!["Past", "Present", "Future"]);
        assert_eq!(def.position(1), Some("Present"));
        assert_eq!(def.position(3), None);
    }

    #[test]
    fn default_is_three_card() {
        assert_eq!(SpreadKind::default(), SpreadKind::ThreeCard);
        assert_eq!(SpreadDefinition::default().slots, 3);
    }

    #[test]
    fn parse_variants() {
        assert_eq!(SpreadKind::parse("single"), Some(SpreadKind::Single));
        assert_eq!(SpreadKind::parse("three-card"), Some(SpreadKind::ThreeCard));
        assert_eq!(SpreadKind::parse("THREE_CARD"), Some(SpreadKind::ThreeCard));
        assert_eq!(SpreadKind::parse("cross"), Some(SpreadKind::FiveCardCross));
        assert_eq!(
            SpreadKind::parse("five-card-cross"),
            Some(SpreadKind::FiveCardCross)
        );
        assert_eq!(SpreadKind::parse("horseshoe"), None);
    }

    #[test]
    fn slug_parses_back() {
        for kind in SpreadKind::all() {
            assert_eq!(SpreadKind::parse(kind.slug()), Some(*kind));
        }
    }

    proptest! {
        #[test]
        fn parse_accepts_any_case_and_separator(
            kind in prop_oneof![
                Just(SpreadKind::Single),
                Just(SpreadKind::ThreeCard),
                Just(SpreadKind::FiveCardCross),
            ],
            upper in proptest::collection::vec(any::<bool>(), 16),
            sep in prop_oneof![Just('-'), Just('_'), Just(' ')],
        ) {
            let spelled: String = kind
                .slug()
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| match c {
                    '-' => sep,
                    c if up => c.to_ascii_uppercase(),
                    c => c,
                })
                .collect();
            prop_assert_eq!(SpreadKind::parse(&spelled), Some(kind));

            let def = kind.definition();
            prop_assert_eq!(def.positions.len(), def.slots);
            prop_assert!(def.slots > 0);
        }
    }
}
