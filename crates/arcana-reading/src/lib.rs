//! Tarot reading engine.
//!
//! Shuffles a fresh deck for every session, walks the user through choosing
//! a spread, asking a question and drawing cards, then hands the completed
//! draw to an interpretation provider. A provider failure never loses the
//! drawn cards: the reading completes and falls back to each card's static
//! meaning.

pub mod config;
pub mod deck;
pub mod error;
pub mod interpret;
pub mod orientation;
pub mod reader;
pub mod record;
pub mod selection;
pub mod session;

pub use config::{DEFAULT_TIMEOUT, ProviderConfig, ReadingConfig};
pub use deck::ShuffledDeck;
pub use error::{InterpretError, InterpretResult, ReadingError, ReadingResult};
pub use interpret::{
    CardInterpretation, DrawnCard, GeminiConfig, GeminiInterpreter, Interpretation,
    InterpretationProvider, InterpretationRequest, LocalInterpreter, build_provider,
};
pub use orientation::{Orientation, REVERSED_THRESHOLD};
pub use reader::Reader;
pub use record::ReadingRecord;
pub use selection::{IgnoreReason, SelectOutcome, SelectedCard};
pub use session::{Phase, ReadingSession, Resolution};
