use std::time::Duration;

use clap::{Parser, Subcommand};
use ngb_core::config::DEFAULT_BASE_URL;
use ngb_core::EndpointConfig;

#[derive(Parser, Debug)]
#[command(name = "ngb", version, about = "NGB CLI")]
pub struct Cli {
    /// Base address of the NGB REST API
    #[arg(long, global = true, env = "NGB_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "NGB_TIMEOUT", default_value_t = 5)]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[arg(long, global = true, env = "NGB_CONNECT_TIMEOUT", default_value_t = 10)]
    pub connect_timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "NGB_INSECURE")]
    pub insecure: bool,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, env = "NGB_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Greets User
    #[command(alias = "hello")]
    HelloWorld {
        /// your name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print the client version
    Version,
    /// Reference genomes registered on the server
    Reference {
        #[command(subcommand)]
        command: ReferenceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReferenceCommands {
    /// List all references
    List,
    /// Show one reference
    Get { id: u64 },
}

impl Cli {
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig::new(&self.api_url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
            .with_insecure(self.insecure)
    }
}
