use std::path::PathBuf;
use std::sync::Arc;

use arcana_core::CardCatalog;
use arcana_reading::{Reader, SelectOutcome};

use super::ExportFormat;

pub struct DrawOptions {
    pub question: String,
    pub spread: String,
    pub seed: Option<u64>,
    /// 1-based deck positions.
    pub picks: Vec<usize>,
    pub provider: String,
    pub format: String,
    pub output: Option<PathBuf>,
    pub timeout: u64,
}

pub async fn run(opts: DrawOptions) -> Result<(), String> {
    let spread = super::parse_spread(&opts.spread)?;
    let format = ExportFormat::parse(&opts.format)?;
    let config = super::reading_config(opts.seed, &opts.provider, opts.timeout)?.with_spread(spread);

    let catalog = Arc::new(CardCatalog::standard());
    let deck_size = catalog.len();
    let mut reader = Reader::new(catalog, &config).map_err(|e| e.to_string())?;

    reader.start();
    reader
        .submit_question(&opts.question)
        .map_err(|e| e.to_string())?;

    let slots = reader.session().spread().slots;
    let picks = deck_indices(&opts.picks, slots, deck_size)?;

    for index in picks {
        if let SelectOutcome::Ignored(reason) = reader.select_at(index).await {
            return Err(format!("cannot draw card {}: {reason}", index + 1));
        }
    }

    let record = reader.record().map_err(|e| e.to_string())?;
    let content = format.render(&record)?;

    if let Some(path) = opts.output {
        std::fs::write(&path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Reading saved to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

/// Turn 1-based picks into deck indices; no picks draws from the top.
fn deck_indices(picks: &[usize], slots: usize, deck_size: usize) -> Result<Vec<usize>, String> {
    if picks.is_empty() {
        return Ok((0..slots).collect());
    }
    if picks.len() != slots {
        return Err(format!(
            "this spread needs {slots} card{}, got {} pick{}",
            if slots == 1 { "" } else { "s" },
            picks.len(),
            if picks.len() == 1 { "" } else { "s" },
        ));
    }
    picks
        .iter()
        .map(|&p| {
            if (1..=deck_size).contains(&p) {
                Ok(p - 1)
            } else {
                Err(format!("pick {p} is out of range (1-{deck_size})"))
            }
        })
        .collect()
}
