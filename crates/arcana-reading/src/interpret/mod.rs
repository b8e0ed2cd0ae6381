//! Interpretation providers.
//!
//! A provider turns a question and the drawn cards into narrative guidance,
//! or fails. Two variants exist: [`LocalInterpreter`], which derives
//! everything from each card's static meaning, and [`GeminiInterpreter`],
//! which asks the Gemini API. Which one a reader uses is decided by
//! [`ProviderConfig`], never by the session.

pub mod gemini;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use arcana_core::{Arcana, CardId, SpreadKind};

use crate::config::ProviderConfig;
use crate::error::{InterpretError, InterpretResult};
use crate::orientation::Orientation;
use crate::selection::SelectedCard;

pub use gemini::{GeminiConfig, GeminiInterpreter};
pub use local::LocalInterpreter;

/// One drawn card as seen by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// Card identity.
    pub id: CardId,
    /// Card name.
    pub name: String,
    /// Major or minor arcana.
    pub arcana: Arcana,
    /// Upright or reversed.
    pub orientation: Orientation,
    /// Position label, or "Position N" when the spread has none.
    pub position: String,
    /// Static meaning text.
    pub meaning: String,
}

impl DrawnCard {
    /// Build from the card at `index` of a selection.
    pub fn from_selected(index: usize, selected: &SelectedCard) -> Self {
        Self {
            id: selected.card.id,
            name: selected.card.name.clone(),
            arcana: selected.card.arcana,
            orientation: selected.orientation,
            position: selected.position_label(index),
            meaning: selected.card.meaning.clone(),
        }
    }
}

/// Input to a provider: the question and the cards in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationRequest {
    /// The question, already trimmed.
    pub question: String,
    /// The spread the cards were drawn into.
    pub spread: SpreadKind,
    /// Drawn cards in draw order.
    pub cards: Vec<DrawnCard>,
}

impl InterpretationRequest {
    /// Build a request from a question and a selection sequence.
    pub fn new(question: impl Into<String>, spread: SpreadKind, cards: &[SelectedCard]) -> Self {
        Self {
            question: question.into(),
            spread,
            cards: cards
                .iter()
                .enumerate()
                .map(|(i, sc)| DrawnCard::from_selected(i, sc))
                .collect(),
        }
    }
}

/// The reading for a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInterpretation {
    /// Name of the card this entry describes.
    pub card_name: String,
    /// Narrative text for the card in its position.
    pub interpretation: String,
}

/// A structured interpretation of a completed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// Overall summary of the reading.
    pub summary: String,
    /// One entry per drawn card, keyed by card name.
    pub card_interpretations: Vec<CardInterpretation>,
    /// Closing guidance.
    pub guidance: String,
}

impl Interpretation {
    /// The entry for a card, matched by name (case-insensitive).
    pub fn for_card(&self, name: &str) -> Option<&str> {
        self.card_interpretations
            .iter()
            .find(|ci| ci.card_name.eq_ignore_ascii_case(name))
            .map(|ci| ci.interpretation.as_str())
    }

    /// Reject interpretations with no usable narrative.
    pub fn validate(self) -> InterpretResult<Self> {
        if self.summary.trim().is_empty() && self.guidance.trim().is_empty() {
            return Err(InterpretError::Incomplete(
                "summary and guidance are both empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// The capability of producing an interpretation from a question and cards.
#[async_trait]
pub trait InterpretationProvider: Send + Sync {
    /// Short provider name for logs and status output.
    fn name(&self) -> &str;

    /// Produce an interpretation. Called at most once per completed draw.
    async fn interpret(&self, request: &InterpretationRequest) -> InterpretResult<Interpretation>;
}

/// Construct the provider selected by configuration.
pub fn build_provider(config: &ProviderConfig) -> InterpretResult<Box<dyn InterpretationProvider>> {
    match config {
        ProviderConfig::Local => Ok(Box::new(LocalInterpreter::new())),
        ProviderConfig::Gemini(gemini) => Ok(Box::new(GeminiInterpreter::new(gemini.clone())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::Card;

    fn selection() -> Vec<SelectedCard> {
        vec![
            SelectedCard {
                card: Card::major(0, "The Fool", "Beginnings.", "m00.jpg"),
                orientation: Orientation::Upright,
                position: Some("Past".to_string()),
            },
            SelectedCard {
                card: Card::major(16, "The Tower", "Upheaval.", "m16.jpg"),
                orientation: Orientation::Reversed,
                position: None,
            },
        ]
    }

    #[test]
    fn request_preserves_order_and_labels() {
        let req = InterpretationRequest::new("Career outlook?", SpreadKind::ThreeCard, &selection());
        assert_eq!(req.cards.len(), 2);
        assert_eq!(req.cards[0].name, "The Fool");
        assert_eq!(req.cards[0].position, "Past");
        assert_eq!(req.cards[1].position, "Position 2");
        assert_eq!(req.cards[1].orientation, Orientation::Reversed);
    }

    #[test]
    fn interpretation_wire_format_is_camel_case() {
        let json = r#"{
            "summary": "A new chapter.",
            "cardInterpretations": [
                {"cardName": "The Fool", "interpretation": "Leap."}
            ],
            "guidance": "Trust the path."
        }"#;
        let parsed: Interpretation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.for_card("the fool"), Some("Leap."));
        assert!(parsed.for_card("The Tower").is_none());

        let back = serde_json::to_string(&parsed).unwrap();
        assert!(back.contains("cardInterpretations"));
        assert!(back.contains("cardName"));
    }

    #[test]
    fn validate_rejects_blank_narrative() {
        let blank = Interpretation {
            summary: "  ".to_string(),
            card_interpretations: Vec::new(),
            guidance: String::new(),
        };
        assert!(matches!(blank.validate(), Err(InterpretError::Incomplete(_))));
    }

    #[test]
    fn build_local_provider() {
        let provider = build_provider(&ProviderConfig::Local).unwrap();
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn build_gemini_without_key_fails() {
        let result = build_provider(&ProviderConfig::Gemini(GeminiConfig::default()));
        assert!(matches!(result, Err(InterpretError::NotConfigured(_))));
    }
}
