use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::{Arcana, Card, CardId, Suit};
use crate::error::{CatalogError, CatalogResult};

/// Base URL of the Rider–Waite–Smith card scans used as image references.
pub const RWS_IMAGE_BASE: &str =
    "https://raw.githubusercontent.com/BrunnerLivio/Tarot-API/master/static/cards/";

const MAJOR_ARCANA: [(&str, &str); 22] = [
    ("The Fool", "The start of an adventure, innocence, potential and spontaneity."),
    ("The Magician", "Willpower, creativity, manifestation and communication."),
    ("The High Priestess", "Intuition, mystery, the subconscious and inner knowledge."),
    ("The Empress", "Abundance, femininity, the union of beauty and nature."),
    ("The Emperor", "Authority, structure, solid foundations and the father figure."),
    ("The Hierophant", "Tradition, spiritual guidance, institutions and belonging."),
    ("The Lovers", "Love, harmony, relationships, shared values and choices."),
    ("The Chariot", "Control, will, victory, determination and self-discipline."),
    ("Strength", "Courage, patience, gentle strength and inner control."),
    ("The Hermit", "Reflection, introspection, solitude and the search for truth."),
    ("Wheel of Fortune", "Turning points, fate, opportunity, cycles and decisive moments."),
    ("Justice", "Fairness, cause and effect, honesty and legal responsibility."),
    ("The Hanged Man", "Sacrifice, a change of perspective, release, limits and new views."),
    ("Death", "Endings, profound transformation, letting go of the past and rebirth."),
    ("Temperance", "Balance, moderation, integration and patient guidance."),
    ("The Devil", "Bondage, indulgence, materialism, the shadow self and fear."),
    ("The Tower", "Sudden upheaval, collapse, revelation and shattered pride."),
    ("The Star", "Hope, inspiration, healing, serenity and spiritual guidance."),
    ("The Moon", "Illusion, anxiety, unease, the subconscious and dreams."),
    ("The Sun", "Success, joy, vitality, clarity and accomplishment."),
    ("Judgement", "Awakening, rebirth, evaluation and final decisions."),
    ("The World", "Completion, integration, fulfilment, travel and the end of a chapter."),
];

const ACES: [(Suit, &str, &str); 4] = [
    (
        Suit::Cups,
        "Ace of Cups",
        "The flow of emotion, love, new friendships and creativity.",
    ),
    (
        Suit::Swords,
        "Ace of Swords",
        "Clear thinking, breakthroughs, truth and the victory of reason.",
    ),
    (
        Suit::Pentacles,
        "Ace of Pentacles",
        "Material opportunity, prosperity, practical plans and building wealth.",
    ),
    (
        Suit::Wands,
        "Ace of Wands",
        "The spark of action, passion, courage and pioneering projects.",
    ),
];

/// The static, read-only set of cards available to a reading.
///
/// Cards keep their insertion order; lookups by id and by name are indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct CardCatalog {
    cards: Vec<Card>,

    // Indexes
    by_id: HashMap<CardId, usize>,
    by_name_lower: HashMap<String, usize>,
}

impl CardCatalog {
    /// Build a catalog from a list of cards, rejecting duplicates and
    /// cards whose suit disagrees with their arcana.
    pub fn new(cards: Vec<Card>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(cards.len());
        let mut by_name_lower = HashMap::with_capacity(cards.len());

        for (idx, card) in cards.iter().enumerate() {
            validate_card(card)?;
            if by_id.insert(card.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(card.id));
            }
            if by_name_lower.insert(card.name.to_lowercase(), idx).is_some() {
                return Err(CatalogError::DuplicateName(card.name.clone()));
            }
        }

        Ok(Self {
            cards,
            by_id,
            by_name_lower,
        })
    }

    /// The built-in deck: the 22 major arcana followed by the four aces.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(MAJOR_ARCANA.len() + ACES.len());

        for (i, (name, meaning)) in MAJOR_ARCANA.iter().enumerate() {
            let id = i as u8;
            cards.push(Card::major(
                id,
                *name,
                *meaning,
                format!("{RWS_IMAGE_BASE}m{id:02}.jpg"),
            ));
        }

        for (i, (suit, name, meaning)) in ACES.iter().enumerate() {
            let id = (MAJOR_ARCANA.len() + i) as u8;
            cards.push(Card::minor(
                id,
                *suit,
                *name,
                *meaning,
                format!("{RWS_IMAGE_BASE}{}01.jpg", suit.code()),
            ));
        }

        let by_id = cards.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let by_name_lower = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.to_lowercase(), i))
            .collect();

        Self {
            cards,
            by_id,
            by_name_lower,
        }
    }

    /// All cards in catalog order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card by ID.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.by_id.get(&id).map(|&idx| &self.cards[idx])
    }

    /// Find a card by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name_lower
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.cards[idx])
    }

    /// Cards belonging to the given arcana.
    pub fn by_arcana(&self, arcana: Arcana) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.arcana == arcana).collect()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Card>> for CardCatalog {
    type Error = CatalogError;

    fn try_from(cards: Vec<Card>) -> CatalogResult<Self> {
        Self::new(cards)
    }
}

impl From<CardCatalog> for Vec<Card> {
    fn from(catalog: CardCatalog) -> Self {
        catalog.cards
    }
}

fn validate_card(card: &Card) -> CatalogResult<()> {
    match (card.is_major(), card.suit) {
        (true, Some(_)) => Err(CatalogError::InvalidCard {
            name: card.name.clone(),
            reason: "major arcana cards have no suit".to_string(),
        }),
        (false, None) => Err(CatalogError::InvalidCard {
            name: card.name.clone(),
            reason: "minor arcana cards need a suit".to_string(),
        }),
        _ => Ok(()),
    }
}
