use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;

use arcana_core::CardCatalog;
use arcana_reading::{Phase, Reader, SelectOutcome};

use super::ExportFormat;

const HELP: &str = "\
Commands:
  spread <kind>       choose single, three-card or five-card-cross
  ask <question>      submit your question and shuffle the deck
  deck                show the face-down deck
  pick <n> [<n>...]   draw the card(s) at deck position n
  show                show the cards drawn so far
  export [format]     print the reading as text, markdown or json
  reset               discard this reading and start over
  status              show the session state
  help                show this help
  quit                leave";

pub async fn run(seed: Option<u64>, provider: &str, timeout: u64) -> Result<(), String> {
    let config = super::reading_config(seed, provider, timeout)?;
    let mut reader = Reader::new(Arc::new(CardCatalog::standard()), &config)
        .map_err(|e| format!("failed to start session: {e}"))?;
    reader.start();

    println!("  {} Tarot Reading", "Starting".bold());
    match seed {
        Some(seed) => println!("  Provider: {} | Seed: {seed}", reader.provider_name()),
        None => println!("  Provider: {}", reader.provider_name()),
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut input_lines = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match input_lines.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        match process(&mut reader, input).await {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}

async fn process(reader: &mut Reader, input: &str) -> Result<String, String> {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(HELP.to_string()),
        "status" => Ok(status(reader)),
        "spread" => {
            let kind = super::parse_spread(rest)?;
            reader.choose_spread(kind).map_err(|e| e.to_string())?;
            let def = reader.session().spread();
            Ok(format!(
                "Spread: {kind} ({} card{}: {})",
                def.slots,
                if def.slots == 1 { "" } else { "s" },
                def.positions.join(", ")
            ))
        }
        "ask" => {
            reader.submit_question(rest).map_err(|e| e.to_string())?;
            Ok(format!(
                "The deck is shuffled. Pick {} card{} with 'pick <n>' (1-{}).",
                reader.session().remaining(),
                if reader.session().remaining() == 1 { "" } else { "s" },
                reader.session().deck().len()
            ))
        }
        "deck" => deck(reader),
        "pick" | "p" => pick(reader, rest).await,
        "show" => Ok(show(reader)),
        "export" => {
            let format = if rest.is_empty() {
                ExportFormat::Text
            } else {
                ExportFormat::parse(rest)?
            };
            let record = reader.record().map_err(|e| e.to_string())?;
            format.render(&record)
        }
        "reset" => {
            reader.reset();
            reader.start();
            Ok("The reading was discarded. Choose a spread or ask a new question.".into())
        }
        _ => Err(format!("unknown command: \"{command}\". Type 'help' for commands.")),
    }
}

fn status(reader: &Reader) -> String {
    let session = reader.session();
    let mut out = format!("Phase: {}\n", session.phase());
    out.push_str(&format!("Spread: {}\n", session.spread().kind));
    if let Some(question) = session.question() {
        out.push_str(&format!("Question: {question}\n"));
    }
    out.push_str(&format!(
        "Drawn: {}/{}\n",
        session.selection().len(),
        session.spread().slots
    ));
    out.push_str(&format!(
        "Provider: {} (timeout {}s)",
        reader.provider_name(),
        reader.timeout().as_secs()
    ));
    out
}

fn deck(reader: &Reader) -> Result<String, String> {
    let session = reader.session();
    if session.deck().is_empty() {
        return Err("the deck is shuffled once you ask your question".into());
    }

    let cells: Vec<String> = session
        .deck()
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let drawn = session.selection().iter().any(|sc| sc.card.id == card.id);
            if drawn {
                format!("[{:>2}] {}", i + 1, card.name)
            } else {
                format!("[{:>2}] ??", i + 1)
            }
        })
        .collect();

    Ok(cells
        .chunks(6)
        .map(|row| row.join("  "))
        .collect::<Vec<_>>()
        .join("\n"))
}

async fn pick(reader: &mut Reader, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err("usage: pick <n> [<n>...]".into());
    }

    let mut out = Vec::new();
    for token in rest.split_whitespace() {
        let n: usize = token
            .parse()
            .map_err(|_| format!("not a deck position: \"{token}\""))?;
        if n == 0 {
            return Err("deck positions start at 1".into());
        }

        match reader.select_at(n - 1).await {
            SelectOutcome::Accepted { remaining } => {
                out.push(format!(
                    "{} ({remaining} to go)",
                    describe_last(reader)
                ));
            }
            SelectOutcome::Completed => {
                out.push(describe_last(reader));
                out.push(String::new());
                out.push(show(reader));
                break;
            }
            SelectOutcome::Ignored(reason) => {
                out.push(format!("Card {n} ignored: {reason}"));
            }
        }
    }
    Ok(out.join("\n"))
}

fn describe_last(reader: &Reader) -> String {
    reader
        .session()
        .selection()
        .last()
        .map(|sc| format!("Drew {sc}"))
        .unwrap_or_default()
}

fn show(reader: &Reader) -> String {
    let session = reader.session();
    if session.phase() == Phase::Complete {
        return match reader.record() {
            Ok(record) => record.export_text(),
            Err(e) => e.to_string(),
        };
    }
    if session.selection().is_empty() {
        return "No cards drawn yet.".into();
    }
    session
        .selection()
        .iter()
        .map(|sc| sc.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
