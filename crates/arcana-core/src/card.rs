use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for every card in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two fixed card categories of a tarot deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    /// The 22 trump cards, The Fool through The World.
    Major,
    /// The suited pip and court cards.
    Minor,
}

impl Arcana {
    /// Parse an arcana from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "trump" | "trumps" => Some(Self::Major),
            "minor" => Some(Self::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for Arcana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "Major"),
            Self::Minor => write!(f, "Minor"),
        }
    }
}

/// The four suits of the minor arcana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    /// Emotion, relationships, intuition.
    Cups,
    /// Material matters, work, wealth.
    Pentacles,
    /// Intellect, conflict, truth.
    Swords,
    /// Will, energy, ambition.
    Wands,
}

impl Suit {
    /// Single-letter code used in image file names (`c01.jpg`, ...).
    pub fn code(self) -> char {
        match self {
            Self::Cups => 'c',
            Self::Pentacles => 'p',
            Self::Swords => 's',
            Self::Wands => 'w',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cups => write!(f, "Cups"),
            Self::Pentacles => write!(f, "Pentacles"),
            Self::Swords => write!(f, "Swords"),
            Self::Wands => write!(f, "Wands"),
        }
    }
}

/// A single tarot card. Immutable once loaded into a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity within the catalog.
    pub id: CardId,
    /// Display name, e.g. "The Fool".
    pub name: String,
    /// Major or minor arcana.
    pub arcana: Arcana,
    /// Suit, present only for minor-arcana cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    /// Upright meaning text.
    pub meaning: String,
    /// Image reference (URL or path).
    pub image: String,
}

impl Card {
    /// Create a major-arcana card.
    pub fn major(
        id: u8,
        name: impl Into<String>,
        meaning: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId(id),
            name: name.into(),
            arcana: Arcana::Major,
            suit: None,
            meaning: meaning.into(),
            image: image.into(),
        }
    }

    /// Create a minor-arcana card of the given suit.
    pub fn minor(
        id: u8,
        suit: Suit,
        name: impl Into<String>,
        meaning: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId(id),
            name: name.into(),
            arcana: Arcana::Minor,
            suit: Some(suit),
            meaning: meaning.into(),
            image: image.into(),
        }
    }

    /// Whether this card belongs to the major arcana.
    pub fn is_major(&self) -> bool {
        self.arcana == Arcana::Major
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
