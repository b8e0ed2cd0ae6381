//! Per-session draw order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use arcana_core::{Card, CardCatalog, CardId};

/// A shuffled copy of the catalog, fixed for the lifetime of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffledDeck {
    cards: Vec<Card>,
}

impl ShuffledDeck {
    /// Fisher–Yates shuffle of the catalog's cards. The catalog is untouched.
    pub fn shuffle(catalog: &CardCatalog, rng: &mut StdRng) -> Self {
        let mut cards = catalog.cards().to_vec();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Cards in draw order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card at a draw position.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Draw position of a card, if present.
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Whether the deck holds the given card.
    pub fn contains(&self, id: CardId) -> bool {
        self.position_of(id).is_some()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty (no session in progress).
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let catalog = CardCatalog::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let deck = ShuffledDeck::shuffle(&catalog, &mut rng);

        assert_eq!(deck.len(), catalog.len());
        let mut ids: Vec<_> = deck.cards().iter().map(|c| c.id).collect();
        ids.sort();
        let expected: Vec<_> = catalog.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn shuffle_leaves_catalog_untouched() {
        let catalog = CardCatalog::standard();
        let before = catalog.cards().to_vec();
        let mut rng = StdRng::seed_from_u64(2);
        let _ = ShuffledDeck::shuffle(&catalog, &mut rng);
        assert_eq!(catalog.cards(), before.as_slice());
    }

    #[test]
    fn same_seed_same_order() {
        let catalog = CardCatalog::standard();
        let a = ShuffledDeck::shuffle(&catalog, &mut StdRng::seed_from_u64(42));
        let b = ShuffledDeck::shuffle(&catalog, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn successive_shuffles_differ() {
        let catalog = CardCatalog::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let a = ShuffledDeck::shuffle(&catalog, &mut rng);
        let b = ShuffledDeck::shuffle(&catalog, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        let catalog = CardCatalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let trials = 13_000;
        let fool_first = (0..trials)
            .filter(|_| ShuffledDeck::shuffle(&catalog, &mut rng).cards()[0].id == CardId(0))
            .count();
        // expected 500
        assert!((380..=620).contains(&fool_first), "fool first {fool_first} times");
    }

    #[test]
    fn lookups() {
        let catalog = CardCatalog::standard();
        let deck = ShuffledDeck::shuffle(&catalog, &mut StdRng::seed_from_u64(5));
        let first = deck.get(0).unwrap().clone();
        assert_eq!(deck.position_of(first.id), Some(0));
        assert!(deck.contains(first.id));
        assert!(!deck.contains(CardId(200)));
        assert!(deck.get(26).is_none());
        assert!(ShuffledDeck::default().is_empty());
    }
}
