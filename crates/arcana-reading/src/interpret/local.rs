//! Offline interpreter built purely from each card's meaning text.

use async_trait::async_trait;

use arcana_core::Arcana;

use crate::error::InterpretResult;
use crate::orientation::Orientation;

use super::{CardInterpretation, DrawnCard, Interpretation, InterpretationProvider, InterpretationRequest};

/// Deterministic interpreter: the same request always yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalInterpreter;

impl LocalInterpreter {
    /// Create a local interpreter.
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of [`InterpretationProvider::interpret`].
    pub fn compose(&self, request: &InterpretationRequest) -> Interpretation {
        Interpretation {
            summary: summary(request),
            card_interpretations: request
                .cards
                .iter()
                .map(|card| CardInterpretation {
                    card_name: card.name.clone(),
                    interpretation: card_text(card),
                })
                .collect(),
            guidance: guidance(&request.cards),
        }
    }
}

#[async_trait]
impl InterpretationProvider for LocalInterpreter {
    fn name(&self) -> &str {
        "local"
    }

    async fn interpret(&self, request: &InterpretationRequest) -> InterpretResult<Interpretation> {
        self.compose(request).validate()
    }
}

fn summary(request: &InterpretationRequest) -> String {
    let total = request.cards.len();
    let reversed = request
        .cards
        .iter()
        .filter(|c| c.orientation.is_reversed())
        .count();
    let upright = total - reversed;

    let tone = if reversed == 0 {
        "The energy around this question flows openly."
    } else if reversed * 2 > total {
        "Much of the energy here is blocked or turned inward; patience is asked of you."
    } else {
        "Open paths and inner obstacles both shape this question."
    };

    format!(
        "For \"{}\", the {} spread drew {} card{}: {} upright and {} reversed. {}",
        request.question,
        request.spread,
        total,
        if total == 1 { "" } else { "s" },
        upright,
        reversed,
        tone,
    )
}

fn card_text(card: &DrawnCard) -> String {
    match card.orientation {
        Orientation::Upright => format!(
            "In the {} position, {} stands upright: {}",
            card.position, card.name, card.meaning
        ),
        Orientation::Reversed => format!(
            "In the {} position, {} appears reversed, so its themes are delayed or turned inward: {}",
            card.position, card.name, card.meaning
        ),
    }
}

fn guidance(cards: &[DrawnCard]) -> String {
    let Some(last) = cards.last() else {
        return "Return when a card has been drawn.".to_string();
    };

    let majors = cards.iter().filter(|c| c.arcana == Arcana::Major).count();
    let mut out = String::new();
    if majors > 0 {
        out.push_str(&format!(
            "{majors} major arcana card{} appear{}, so this question touches a larger life lesson. ",
            if majors == 1 { "" } else { "s" },
            if majors == 1 { "s" } else { "" },
        ));
    }
    if last.orientation.is_reversed() {
        out.push_str(&format!(
            "Look at what holds {} back before you act.",
            last.name
        ));
    } else {
        out.push_str(&format!("Let {} guide your next step.", last.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::{CardId, SpreadKind};

    fn drawn(id: u8, name: &str, orientation: Orientation, position: &str) -> DrawnCard {
        DrawnCard {
            id: CardId(id),
            name: name.to_string(),
            arcana: if id < 22 { Arcana::Major } else { Arcana::Minor },
            orientation,
            position: position.to_string(),
            meaning: format!("{name} meaning."),
        }
    }

    fn request() -> InterpretationRequest {
        InterpretationRequest {
            question: "Career outlook?".to_string(),
            spread: SpreadKind::ThreeCard,
            cards: vec![
                drawn(0, "The Fool", Orientation::Upright, "Past"),
                drawn(16, "The Tower", Orientation::Reversed, "Present"),
                drawn(25, "Ace of Wands", Orientation::Upright, "Future"),
            ],
        }
    }

    #[test]
    fn one_entry_per_card_in_order() {
        let reading = LocalInterpreter::new().compose(&request());
        let names: Vec<_> = reading
            .card_interpretations
            .iter()
            .map(|ci| ci.card_name.as_str())
            .collect();
        assert_eq!(names, vec!["The Fool", "The Tower", "Ace of Wands"]);
    }

    #[test]
    fn text_uses_meaning_position_and_orientation() {
        let reading = LocalInterpreter::new().compose(&request());
        let fool = reading.for_card("The Fool").unwrap();
        assert!(fool.contains("Past"));
        assert!(fool.contains("upright"));
        assert!(fool.contains("The Fool meaning."));

        let tower = reading.for_card("The Tower").unwrap();
        assert!(tower.contains("reversed"));
        assert!(tower.contains("Present"));
    }

    #[test]
    fn summary_counts_orientations() {
        let reading = LocalInterpreter::new().compose(&request());
        assert!(reading.summary.contains("Career outlook?"));
        assert!(reading.summary.contains("3 cards: 2 upright and 1 reversed"));
        assert!(reading.summary.contains("Past, Present, Future"));
    }

    #[test]
    fn guidance_mentions_last_card_and_majors() {
        let reading = LocalInterpreter::new().compose(&request());
        assert!(reading.guidance.starts_with("2 major arcana cards appear"));
        assert!(reading.guidance.contains("Let Ace of Wands guide"));
    }

    #[test]
    fn deterministic() {
        let interp = LocalInterpreter::new();
        assert_eq!(interp.compose(&request()), interp.compose(&request()));
    }

    #[tokio::test]
    async fn provider_contract() {
        let interp = LocalInterpreter::new();
        assert_eq!(interp.name(), "local");
        let reading = interp.interpret(&request()).await.unwrap();
        assert_eq!(reading.card_interpretations.len(), 3);
    }
}
