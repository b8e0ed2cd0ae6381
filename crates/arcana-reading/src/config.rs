//! Configuration for a reading session.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use arcana_core::SpreadKind;

use crate::interpret::gemini::GeminiConfig;

/// Default time allowed for an interpretation before the reading completes
/// without one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which interpretation provider a reader uses.
#[derive(Debug, Clone, Default)]
pub enum ProviderConfig {
    /// Deterministic interpretation built from each card's meaning text.
    #[default]
    Local,
    /// Interpretation generated by the Gemini API.
    Gemini(GeminiConfig),
}

impl ProviderConfig {
    /// Short name of the selected provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Gemini(_) => "gemini",
        }
    }
}

/// Configuration for a reading session.
#[derive(Debug, Clone)]
pub struct ReadingConfig {
    /// RNG seed for reproducible shuffles and orientations.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Spread used until the user picks another.
    pub spread: SpreadKind,
    /// Interpretation provider.
    pub provider: ProviderConfig,
    /// How long to wait for an interpretation.
    pub timeout: Duration,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spread: SpreadKind::default(),
            provider: ProviderConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ReadingConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default spread.
    pub fn with_spread(mut self, spread: SpreadKind) -> Self {
        self.spread = spread;
        self
    }

    /// Set the interpretation provider.
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Set the interpretation timeout (at least one millisecond).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Build the random source described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_config() {
        let cfg = ReadingConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.spread, SpreadKind::ThreeCard);
        assert_eq!(cfg.provider.name(), "local");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn builder_methods() {
        let cfg = ReadingConfig::default()
            .with_seed(123)
            .with_spread(SpreadKind::Single)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.spread, SpreadKind::Single);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn timeout_has_floor() {
        let cfg = ReadingConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(cfg.timeout, Duration::from_millis(1));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = ReadingConfig::default().with_seed(9);
        let a: u64 = cfg.rng().random();
        let b: u64 = cfg.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn gemini_provider_name() {
        let cfg = ReadingConfig::default()
            .with_provider(ProviderConfig::Gemini(GeminiConfig::default()));
        assert_eq!(cfg.provider.name(), "gemini");
    }
}
