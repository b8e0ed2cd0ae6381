//! CLI frontend for the Arcana tarot reader.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "arcana",
    about = "Arcana: draw tarot cards and read what they say",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cards in the deck, or show one card
    Cards {
        /// Card name to show in detail (case-insensitive)
        name: Option<String>,

        /// Filter by arcana: major or minor
        #[arg(short, long)]
        arcana: Option<String>,
    },

    /// List the available spreads and their positions
    Spreads,

    /// Perform a single reading non-interactively
    Draw {
        /// The question to ask the cards
        #[arg(short, long)]
        question: String,

        /// Spread: single, three-card, five-card-cross
        #[arg(short = 'S', long, default_value = "three-card")]
        spread: String,

        /// RNG seed for a reproducible reading
        #[arg(short, long)]
        seed: Option<u64>,

        /// Deck positions to draw (1-based); defaults to the top of the deck
        #[arg(short, long, num_args = 1..)]
        pick: Vec<usize>,

        /// Interpretation provider: local, gemini
        #[arg(long, default_value = "local")]
        provider: String,

        /// Output format: text, markdown, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the reading to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seconds to wait for an interpretation
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Start an interactive reading session
    Read {
        /// RNG seed for reproducible readings
        #[arg(short, long)]
        seed: Option<u64>,

        /// Interpretation provider: local, gemini
        #[arg(long, default_value = "local")]
        provider: String,

        /// Seconds to wait for an interpretation
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ARCANA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cards { name, arcana } => match name {
            Some(name) => commands::cards::show(&name),
            None => commands::cards::run(arcana.as_deref()),
        },
        Commands::Spreads => commands::spreads::run(),
        Commands::Draw {
            question,
            spread,
            seed,
            pick,
            provider,
            format,
            output,
            timeout,
        } => {
            let opts = commands::draw::DrawOptions {
                question,
                spread,
                seed,
                picks: pick,
                provider,
                format,
                output,
                timeout,
            };
            commands::draw::run(opts).await
        }
        Commands::Read {
            seed,
            provider,
            timeout,
        } => commands::read::run(seed, &provider, timeout).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
