//! Completed-reading snapshot and export.

use serde::{Deserialize, Serialize};

use arcana_core::SpreadKind;

use crate::error::ReadingResult;
use crate::interpret::Interpretation;
use crate::selection::SelectedCard;
use crate::session::Resolution;

/// A finished reading: question, drawn cards, and how it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// The question that was asked.
    pub question: String,
    /// The spread the cards were drawn into.
    pub spread: SpreadKind,
    /// Drawn cards in draw order.
    pub cards: Vec<SelectedCard>,
    /// Interpretation or the reason there is none.
    pub resolution: Resolution,
}

impl ReadingRecord {
    /// The interpretation, if the provider produced one.
    pub fn interpretation(&self) -> Option<&Interpretation> {
        self.resolution.interpretation()
    }

    /// Text shown for the card at `index`: the provider's reading for that
    /// card when present, otherwise the card's static meaning.
    pub fn card_text(&self, index: usize) -> Option<&str> {
        let selected = self.cards.get(index)?;
        let provided = self
            .interpretation()
            .and_then(|i| i.for_card(&selected.card.name));
        Some(provided.unwrap_or(&selected.card.meaning))
    }

    /// Export the reading as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Tarot Reading\n\n");
        out.push_str(&format!("**Question**: {}\n\n", self.question));
        out.push_str(&format!("**Spread**: {}\n\n", self.spread));

        out.push_str("## Cards\n\n");
        for (i, sc) in self.cards.iter().enumerate() {
            out.push_str(&format!(
                "### {}: {} ({})\n\n",
                sc.position_label(i),
                sc.card.name,
                sc.orientation
            ));
            out.push_str(&format!("![{}]({})\n\n", sc.card.name, sc.card.image));
            if let Some(text) = self.card_text(i) {
                out.push_str(&format!("{text}\n\n"));
            }
        }

        match &self.resolution {
            Resolution::Interpreted { interpretation } => {
                out.push_str(&format!("## Summary\n\n{}\n\n", interpretation.summary));
                out.push_str(&format!("## Guidance\n\n{}\n", interpretation.guidance));
            }
            Resolution::Unavailable { reason } => {
                out.push_str(&format!(
                    "> *Interpretation unavailable* ({reason}). The card meanings above are shown instead.\n"
                ));
            }
        }
        out
    }

    /// Export the reading as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Tarot Reading\n=============\n\n");
        out.push_str(&format!("Question: {}\n", self.question));
        out.push_str(&format!("Spread: {}\n\n", self.spread));

        for (i, sc) in self.cards.iter().enumerate() {
            out.push_str(&format!("{}. {sc}\n", i + 1));
            if let Some(text) = self.card_text(i) {
                out.push_str(&format!("   {text}\n"));
            }
            out.push('\n');
        }

        match &self.resolution {
            Resolution::Interpreted { interpretation } => {
                out.push_str(&format!("Summary: {}\n\n", interpretation.summary));
                out.push_str(&format!("Guidance: {}\n", interpretation.guidance));
            }
            Resolution::Unavailable { reason } => {
                out.push_str(&format!("Interpretation unavailable: {reason}\n"));
            }
        }
        out
    }

    /// Export the reading as pretty-printed JSON.
    pub fn to_json(&self) -> ReadingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::CardInterpretation;
    use crate::orientation::Orientation;
    use arcana_core::Card;

    fn cards() -> Vec<SelectedCard> {
        vec![
            SelectedCard {
                card: Card::major(0, "The Fool", "Beginnings.", "https://img/m00.jpg"),
                orientation: Orientation::Upright,
                position: Some("Past".to_string()),
            },
            SelectedCard {
                card: Card::major(16, "The Tower", "Upheaval.", "https://img/m16.jpg"),
                orientation: Orientation::Reversed,
                position: Some("Present".to_string()),
            },
        ]
    }

    fn interpreted() -> ReadingRecord {
        ReadingRecord {
            question: "Career outlook?".to_string(),
            spread: SpreadKind::ThreeCard,
            cards: cards(),
            resolution: Resolution::Interpreted {
                interpretation: Interpretation {
                    summary: "A turning point.".to_string(),
                    card_interpretations: vec![CardInterpretation {
                        card_name: "The Fool".to_string(),
                        interpretation: "You began boldly.".to_string(),
                    }],
                    guidance: "Stay curious.".to_string(),
                },
            },
        }
    }

    fn unavailable() -> ReadingRecord {
        ReadingRecord {
            resolution: Resolution::Unavailable {
                reason: "no answer within 30s".to_string(),
            },
            ..interpreted()
        }
    }

    #[test]
    fn card_text_falls_back_to_meaning() {
        let record = interpreted();
        assert_eq!(record.card_text(0), Some("You began boldly."));
        // no provider entry for The Tower
        assert_eq!(record.card_text(1), Some("Upheaval."));
        assert_eq!(record.card_text(2), None);

        let failed = unavailable();
        assert_eq!(failed.card_text(0), Some("Beginnings."));
    }

    #[test]
    fn markdown_export() {
        let md = interpreted().export_markdown();
        assert!(md.starts_with("# Tarot Reading"));
        assert!(md.contains("**Question**: Career outlook?"));
        assert!(md.contains("### Past: The Fool (Upright)"));
        assert!(md.contains("### Present: The Tower (Reversed)"));
        assert!(md.contains("![The Fool](https://img/m00.jpg)"));
        assert!(md.contains("## Summary\n\nA turning point."));
        assert!(md.contains("## Guidance\n\nStay curious."));
    }

    #[test]
    fn markdown_export_without_interpretation() {
        let md = unavailable().export_markdown();
        assert!(md.contains("Interpretation unavailable"));
        assert!(md.contains("Beginnings."));
        assert!(md.contains("Upheaval."));
        assert!(!md.contains("## Summary"));
    }

    #[test]
    fn text_export() {
        let text = interpreted().export_text();
        assert!(text.contains("Question: Career outlook?"));
        assert!(text.contains("1. Past: The Fool (Upright)"));
        assert!(text.contains("2. Present: The Tower (Reversed)"));
        assert!(text.contains("Guidance: Stay curious."));
        assert!(!text.contains('#'));
    }

    #[test]
    fn json_export_round_trips() {
        let record = unavailable();
        let json = record.to_json().unwrap();
        assert!(json.contains("\"status\": \"unavailable\""));
        let back: ReadingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
