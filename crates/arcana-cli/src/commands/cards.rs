use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use arcana_core::{Arcana, CardCatalog};

pub fn run(arcana: Option<&str>) -> Result<(), String> {
    let catalog = CardCatalog::standard();

    let cards = match arcana {
        Some(s) => {
            let filter = Arcana::parse(s)
                .ok_or_else(|| format!("unknown arcana: \"{s}\". Use: major, minor"))?;
            catalog.by_arcana(filter)
        }
        None => catalog.cards().iter().collect(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Arcana", "Suit", "Meaning"]);

    for card in &cards {
        let suit = card.suit.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
        table.add_row(vec![
            card.id.0.to_string(),
            card.name.clone(),
            card.arcana.to_string(),
            suit,
            super::truncate(&card.meaning, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}

pub fn show(name: &str) -> Result<(), String> {
    let catalog = CardCatalog::standard();
    let card = catalog
        .find_by_name(name)
        .ok_or_else(|| format!("card not found: \"{name}\""))?;

    println!("  {}", card.name.bold());
    match card.suit {
        Some(suit) => println!("  {} arcana, {suit}", card.arcana),
        None => println!("  {} arcana", card.arcana),
    }
    println!();
    println!("  {}", card.meaning);
    println!();
    println!("  Image: {}", card.image);

    Ok(())
}
