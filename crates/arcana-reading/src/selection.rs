//! Drawn cards and the outcome of a selection attempt.

use serde::{Deserialize, Serialize};

use arcana_core::Card;

use crate::orientation::Orientation;

/// A card bound to its orientation and spread position at draw time.
///
/// Created once when the card is selected and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCard {
    /// The drawn card.
    pub card: Card,
    /// Upright or reversed.
    pub orientation: Orientation,
    /// Position label from the spread, at the index the card was drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl SelectedCard {
    /// Whether the card was drawn reversed.
    pub fn is_reversed(&self) -> bool {
        self.orientation.is_reversed()
    }

    /// The position label, or "Position N" (1-based) if none was assigned.
    pub fn position_label(&self, index: usize) -> String {
        self.position
            .clone()
            .unwrap_or_else(|| format!("Position {}", index + 1))
    }
}

impl std::fmt::Display for SelectedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{pos}: {} ({})", self.card.name, self.orientation),
            None => write!(f, "{} ({})", self.card.name, self.orientation),
        }
    }
}

/// Why a selection attempt was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session is not drawing cards.
    NotDrawing,
    /// The card was already drawn this session.
    AlreadySelected,
    /// Every slot of the spread is filled.
    SpreadFull,
    /// The card is not part of this session's deck.
    NotInDeck,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDrawing => write!(f, "not drawing"),
            Self::AlreadySelected => write!(f, "already selected"),
            Self::SpreadFull => write!(f, "spread full"),
            Self::NotInDeck => write!(f, "not in deck"),
        }
    }
}

/// What happened when a card was offered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The card was drawn; more slots remain.
    Accepted {
        /// Number of slots still open.
        remaining: usize,
    },
    /// The card filled the last slot; the session is resolving.
    Completed,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl SelectOutcome {
    /// Whether the card was added to the selection.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}
