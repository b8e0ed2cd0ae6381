//! The reading controller: a session plus the provider that resolves it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use arcana_core::{Card, CardCatalog, SpreadKind};

use crate::config::ReadingConfig;
use crate::error::{InterpretError, ReadingResult};
use crate::interpret::{InterpretationProvider, build_provider};
use crate::record::ReadingRecord;
use crate::selection::SelectOutcome;
use crate::session::{Phase, ReadingSession};

/// Owns one [`ReadingSession`] and drives its resolution.
///
/// When a selection fills the spread, the provider is asked exactly once,
/// bounded by the configured timeout. Any failure, including the timeout,
/// completes the reading without an interpretation.
pub struct Reader {
    session: ReadingSession,
    provider: Box<dyn InterpretationProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("session", &self.session)
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Reader {
    /// Create a reader with the provider named in `config`.
    pub fn new(catalog: Arc<CardCatalog>, config: &ReadingConfig) -> ReadingResult<Self> {
        let provider = build_provider(&config.provider)?;
        Ok(Self::with_provider(catalog, config, provider))
    }

    /// Create a reader with an explicit provider.
    pub fn with_provider(
        catalog: Arc<CardCatalog>,
        config: &ReadingConfig,
        provider: Box<dyn InterpretationProvider>,
    ) -> Self {
        Self {
            session: ReadingSession::new(catalog, config),
            provider,
            timeout: config.timeout,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Time allowed for an interpretation.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// See [`ReadingSession::start`].
    pub fn start(&mut self) -> Phase {
        self.session.start()
    }

    /// See [`ReadingSession::choose_spread`].
    pub fn choose_spread(&mut self, kind: SpreadKind) -> ReadingResult<()> {
        self.session.choose_spread(kind)
    }

    /// See [`ReadingSession::submit_question`].
    pub fn submit_question(&mut self, text: &str) -> ReadingResult<()> {
        self.session.submit_question(text)
    }

    /// Offer a card; resolves the reading if it fills the spread.
    pub async fn select(&mut self, card: &Card) -> SelectOutcome {
        let outcome = self.session.select(card);
        if outcome == SelectOutcome::Completed {
            self.resolve().await;
        }
        outcome
    }

    /// Select by shuffled-deck position; resolves the reading if it fills
    /// the spread.
    pub async fn select_at(&mut self, deck_index: usize) -> SelectOutcome {
        let outcome = self.session.select_at(deck_index);
        if outcome == SelectOutcome::Completed {
            self.resolve().await;
        }
        outcome
    }

    /// See [`ReadingSession::reset`].
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// See [`ReadingSession::record`].
    pub fn record(&self) -> ReadingResult<ReadingRecord> {
        self.session.record()
    }

    async fn resolve(&mut self) {
        let request = match self.session.interpretation_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "cannot build interpretation request");
                self.session
                    .finish(Err(InterpretError::Incomplete(e.to_string())));
                return;
            }
        };

        info!(
            provider = self.provider.name(),
            cards = request.cards.len(),
            "requesting interpretation"
        );
        let result = match tokio::time::timeout(self.timeout, self.provider.interpret(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(InterpretError::Timeout(self.timeout)),
        };

        if let Err(e) = &result {
            warn!(
                provider = self.provider.name(),
                error = %e,
                "interpretation unavailable; falling back to card meanings"
            );
        }
        self.session.finish(result);
    }
}
