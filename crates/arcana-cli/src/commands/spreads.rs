use comfy_table::{ContentArrangement, Table};

use arcana_core::SpreadKind;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Spread", "Name", "Cards", "Positions"]);

    for kind in SpreadKind::all() {
        let def = kind.definition();
        table.add_row(vec![
            kind.slug().to_string(),
            kind.title().to_string(),
            def.slots.to_string(),
            def.positions.join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}
