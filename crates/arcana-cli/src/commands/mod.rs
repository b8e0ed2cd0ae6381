pub mod cards;
pub mod draw;
pub mod read;
pub mod spreads;

use std::time::Duration;

use arcana_core::SpreadKind;
use arcana_reading::{GeminiConfig, ProviderConfig, ReadingConfig, ReadingRecord};

/// Output formats for a finished reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "unsupported format: \"{s}\". Use: text, markdown, json"
            )),
        }
    }

    pub fn render(self, record: &ReadingRecord) -> Result<String, String> {
        match self {
            Self::Text => Ok(record.export_text()),
            Self::Markdown => Ok(record.export_markdown()),
            Self::Json => record
                .to_json()
                .map(|json| format!("{json}\n"))
                .map_err(|e| format!("JSON serialization error: {e}")),
        }
    }
}

/// Parse a spread name, listing the valid choices on failure.
pub fn parse_spread(s: &str) -> Result<SpreadKind, String> {
    SpreadKind::parse(s).ok_or_else(|| {
        let names: Vec<_> = SpreadKind::all().iter().map(|k| k.slug()).collect();
        format!("unknown spread: \"{s}\". Use: {}", names.join(", "))
    })
}

/// Build the provider selection from its command-line name.
pub fn provider_config(name: &str) -> Result<ProviderConfig, String> {
    match name.to_ascii_lowercase().as_str() {
        "local" => Ok(ProviderConfig::Local),
        "gemini" => GeminiConfig::from_env()
            .map(ProviderConfig::Gemini)
            .ok_or_else(|| "the gemini provider needs GEMINI_API_KEY (or API_KEY) to be set".into()),
        _ => Err(format!("unknown provider: \"{name}\". Use: local, gemini")),
    }
}

/// Assemble a reading configuration from shared command-line options.
pub fn reading_config(
    seed: Option<u64>,
    provider: &str,
    timeout_secs: u64,
) -> Result<ReadingConfig, String> {
    let mut config = ReadingConfig::default()
        .with_provider(provider_config(provider)?)
        .with_timeout(Duration::from_secs(timeout_secs));
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Shorten `text` to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
