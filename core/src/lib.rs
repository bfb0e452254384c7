//! Blocking client core for the NGB (catgenome) REST API.
//!
//! # Overview
//! `ApiClient` turns an `ApiCall` into one HTTP request against a configured
//! base address, sends it through a `Transport`, and validates the status
//! envelope the server wraps every answer in. `Table` renders payload records
//! as an aligned text table for the terminal.
//!
//! # Design
//! - Configuration is passed in at construction; there is no global client.
//! - Request building and envelope parsing are pure, so they are tested
//!   without a server. `UreqTransport` is the only code doing network I/O.
//! - No retries and no client-side state between calls.
//! - TLS verification stays on unless `EndpointConfig::insecure` is set.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod reference;
pub mod table;

pub use client::{resolve_method, ApiCall, ApiClient};
pub use config::EndpointConfig;
pub use envelope::{Envelope, Record};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use reference::{ReferenceApi, REFERENCE_COLUMNS};
pub use table::Table;
