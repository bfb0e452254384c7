use std::io::Write;

use ngb_core::{ApiClient, ReferenceApi, Table, Transport, REFERENCE_COLUMNS};

use crate::cli::ReferenceCommands;

pub fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    command: &ReferenceCommands,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let api = ReferenceApi::new(client);
    match command {
        ReferenceCommands::List if json => {
            let records = api.load_all()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        }
        ReferenceCommands::List => match api.list()? {
            Some(table) => {
                tracing::info!(count = table.len(), "listed references");
                writeln!(out, "{table}")?;
            }
            None => writeln!(out, "No references found.")?,
        },
        ReferenceCommands::Get { id } => {
            let record = api.load(*id)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            } else {
                let table = Table::from_records([&record], &REFERENCE_COLUMNS)?;
                writeln!(out, "{table}")?;
            }
        }
    }
    Ok(())
}
