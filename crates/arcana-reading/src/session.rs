//! The card-selection state machine.
//!
//! A `ReadingSession` walks through
//! `Idle -> AwaitingQuestion -> Drawing -> Resolving -> Complete`.
//! Every mutation goes through `&mut self`, so a session is never changed
//! from two places at once. The RNG is injected, which makes shuffles and
//! orientations reproducible under a fixed seed.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use arcana_core::{Card, CardCatalog, SpreadDefinition, SpreadKind};

use crate::config::ReadingConfig;
use crate::deck::ShuffledDeck;
use crate::error::{InterpretResult, ReadingError, ReadingResult};
use crate::interpret::{Interpretation, InterpretationRequest};
use crate::orientation::draw_orientation;
use crate::record::ReadingRecord;
use crate::selection::{IgnoreReason, SelectOutcome, SelectedCard};

/// Lifecycle phase of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session in progress.
    Idle,
    /// Waiting for the question (and optionally a spread choice).
    AwaitingQuestion,
    /// Cards are being drawn.
    Drawing,
    /// All slots are filled; waiting on the interpretation.
    Resolving,
    /// The reading is finished, with or without an interpretation.
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingQuestion => write!(f, "awaiting a question"),
            Self::Drawing => write!(f, "drawing cards"),
            Self::Resolving => write!(f, "resolving"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// How a completed draw was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// The provider produced an interpretation.
    Interpreted {
        /// The interpretation.
        interpretation: Interpretation,
    },
    /// No interpretation is available; show each card's static meaning.
    Unavailable {
        /// Why the provider failed.
        reason: String,
    },
}

impl Resolution {
    /// The interpretation, if one was produced.
    pub fn interpretation(&self) -> Option<&Interpretation> {
        match self {
            Self::Interpreted { interpretation } => Some(interpretation),
            Self::Unavailable { .. } => None,
        }
    }
}

/// A single tarot reading, owned by one controller.
#[derive(Debug)]
pub struct ReadingSession {
    catalog: Arc<CardCatalog>,
    rng: StdRng,
    default_spread: SpreadKind,
    phase: Phase,
    question: Option<String>,
    spread: SpreadDefinition,
    deck: ShuffledDeck,
    selection: Vec<SelectedCard>,
    resolution: Option<Resolution>,
}

impl ReadingSession {
    /// Create an idle session from a configuration.
    pub fn new(catalog: Arc<CardCatalog>, config: &ReadingConfig) -> Self {
        Self::with_rng(catalog, config.rng(), config.spread)
    }

    /// Create an idle session with an explicit random source.
    pub fn with_rng(catalog: Arc<CardCatalog>, rng: StdRng, default_spread: SpreadKind) -> Self {
        Self {
            catalog,
            rng,
            default_spread,
            phase: Phase::Idle,
            question: None,
            spread: default_spread.definition(),
            deck: ShuffledDeck::default(),
            selection: Vec::new(),
            resolution: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The submitted question, once past `AwaitingQuestion`.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// The active spread.
    pub fn spread(&self) -> &SpreadDefinition {
        &self.spread
    }

    /// Shuffled draw order. Empty until the question is submitted.
    pub fn deck(&self) -> &ShuffledDeck {
        &self.deck
    }

    /// Drawn cards in draw order.
    pub fn selection(&self) -> &[SelectedCard] {
        &self.selection
    }

    /// Slots still open in the spread.
    pub fn remaining(&self) -> usize {
        self.spread.slots.saturating_sub(self.selection.len())
    }

    /// How the draw was resolved, once complete.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// The interpretation, if the reading completed with one.
    pub fn interpretation(&self) -> Option<&Interpretation> {
        self.resolution.as_ref().and_then(Resolution::interpretation)
    }

    /// The catalog this session draws from.
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Begin a session: `Idle -> AwaitingQuestion`. No-op in any other phase.
    pub fn start(&mut self) -> Phase {
        if self.phase == Phase::Idle {
            self.enter(Phase::AwaitingQuestion);
        }
        self.phase
    }

    /// Choose the spread for this session. Only before the question is
    /// submitted.
    pub fn choose_spread(&mut self, kind: SpreadKind) -> ReadingResult<()> {
        if self.phase != Phase::AwaitingQuestion {
            return Err(ReadingError::WrongPhase {
                action: "change the spread",
                phase: self.phase,
            });
        }
        self.spread = kind.definition();
        debug!(spread = %kind, "spread chosen");
        Ok(())
    }

    /// Submit the question: `AwaitingQuestion -> Drawing`.
    ///
    /// A blank question is rejected and the phase stays put. On success the
    /// deck is shuffled once for the rest of the session.
    pub fn submit_question(&mut self, text: &str) -> ReadingResult<()> {
        if self.phase != Phase::AwaitingQuestion {
            return Err(ReadingError::WrongPhase {
                action: "ask a question",
                phase: self.phase,
            });
        }
        let question = text.trim();
        if question.is_empty() {
            return Err(ReadingError::EmptyQuestion);
        }

        self.question = Some(question.to_string());
        self.selection.clear();
        self.deck = ShuffledDeck::shuffle(&self.catalog, &mut self.rng);
        self.enter(Phase::Drawing);
        Ok(())
    }

    /// Offer a card to the spread.
    ///
    /// Ignored without error when not drawing, when the card was already
    /// drawn, when every slot is filled, or when the card is not in this
    /// session's deck. Filling the last slot moves the session to
    /// `Resolving`.
    pub fn select(&mut self, card: &Card) -> SelectOutcome {
        if let Some(reason) = self.reject_reason(card) {
            debug!(card = %card.name, %reason, "selection ignored");
            return SelectOutcome::Ignored(reason);
        }

        let index = self.selection.len();
        let orientation = draw_orientation(&mut self.rng);
        let position = self.spread.position(index).map(str::to_string);
        debug!(card = %card.name, %orientation, position = ?position, "card drawn");

        self.selection.push(SelectedCard {
            card: card.clone(),
            orientation,
            position,
        });

        if self.selection.len() == self.spread.slots {
            self.enter(Phase::Resolving);
            SelectOutcome::Completed
        } else {
            SelectOutcome::Accepted {
                remaining: self.remaining(),
            }
        }
    }

    /// Select the card at a position of the shuffled deck.
    pub fn select_at(&mut self, deck_index: usize) -> SelectOutcome {
        match self.deck.get(deck_index).cloned() {
            Some(card) => self.select(&card),
            None => {
                debug!(deck_index, "selection ignored: no such deck position");
                SelectOutcome::Ignored(IgnoreReason::NotInDeck)
            }
        }
    }

    /// The provider request for the completed draw.
    pub fn interpretation_request(&self) -> ReadingResult<InterpretationRequest> {
        match (self.phase, &self.question) {
            (Phase::Resolving | Phase::Complete, Some(question)) => Ok(InterpretationRequest::new(
                question.clone(),
                self.spread.kind,
                &self.selection,
            )),
            _ => Err(ReadingError::WrongPhase {
                action: "request an interpretation",
                phase: self.phase,
            }),
        }
    }

    /// Record the provider's answer: `Resolving -> Complete`.
    ///
    /// A failure completes the reading without an interpretation; the drawn
    /// cards are kept as they are. Ignored outside `Resolving`.
    pub fn finish(&mut self, outcome: InterpretResult<Interpretation>) -> bool {
        if self.phase != Phase::Resolving {
            debug!(phase = %self.phase, "interpretation result ignored");
            return false;
        }
        self.resolution = Some(match outcome {
            Ok(interpretation) => Resolution::Interpreted { interpretation },
            Err(e) => Resolution::Unavailable {
                reason: e.to_string(),
            },
        });
        self.enter(Phase::Complete);
        true
    }

    /// Discard everything and return to `Idle`. Valid from any phase.
    ///
    /// The RNG keeps running, so the next session gets a fresh shuffle.
    pub fn reset(&mut self) {
        self.question = None;
        self.spread = self.default_spread.definition();
        self.deck = ShuffledDeck::default();
        self.selection.clear();
        self.resolution = None;
        self.enter(Phase::Idle);
    }

    /// Snapshot of a completed reading.
    pub fn record(&self) -> ReadingResult<ReadingRecord> {
        match (self.phase, &self.question, &self.resolution) {
            (Phase::Complete, Some(question), Some(resolution)) => Ok(ReadingRecord {
                question: question.clone(),
                spread: self.spread.kind,
                cards: self.selection.clone(),
                resolution: resolution.clone(),
            }),
            _ => Err(ReadingError::WrongPhase {
                action: "export the reading",
                phase: self.phase,
            }),
        }
    }

    fn reject_reason(&self, card: &Card) -> Option<IgnoreReason> {
        if self.phase != Phase::Drawing {
            Some(IgnoreReason::NotDrawing)
        } else if self.selection.iter().any(|sc| sc.card.id == card.id) {
            Some(IgnoreReason::AlreadySelected)
        } else if self.selection.len() >= self.spread.slots {
            Some(IgnoreReason::SpreadFull)
        } else if !self.deck.contains(card.id) {
            Some(IgnoreReason::NotInDeck)
        } else {
            None
        }
    }

    fn enter(&mut self, phase: Phase) {
        info!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }
}
