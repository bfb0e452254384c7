pub mod reference;

use std::io::Write;

use ngb_core::ApiClient;

use crate::cli::{Cli, Commands};

pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::HelloWorld { name } => greet(name.as_deref(), out),
        Commands::Version => {
            writeln!(out, "ngb {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        Commands::Reference { command } => {
            let config = cli.endpoint_config();
            tracing::debug!(base_url = %config.base_url, "using API endpoint");
            let client = ApiClient::new(config);
            reference::run(&client, command, cli.json, out)
        }
    }
}

fn greet<W: Write>(name: Option<&str>, out: &mut W) -> anyhow::Result<()> {
    match name {
        Some(name) => writeln!(out, "Hello, {name}!")?,
        None => writeln!(out, "Hello, world!")?,
    }
    Ok(())
}
