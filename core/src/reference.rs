//! Reference genome endpoints.

use serde_json::Value;

use crate::client::{ApiCall, ApiClient};
use crate::envelope::Record;
use crate::error::ApiError;
use crate::http::Transport;
use crate::table::Table;

/// Columns shown for a reference genome, in display order.
pub const REFERENCE_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "bioDataItemId",
    "type",
    "path",
    "source",
    "format",
    "createdDate",
];

/// Thin wrapper over `ApiClient` for the `reference/*` methods.
pub struct ReferenceApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ReferenceApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// All registered references, raw.
    pub fn load_all(&self) -> Result<Vec<Record>, ApiError> {
        let envelope = self.client.call(
            &ApiCall::new("reference/loadAll").error_context("Failed to load references"),
        )?;
        Ok(envelope.records()?.into_iter().cloned().collect())
    }

    /// All registered references as a table, or `None` when there are none.
    pub fn list(&self) -> Result<Option<Table>, ApiError> {
        let records = self.load_all()?;
        if records.is_empty() {
            return Ok(None);
        }
        Table::from_records(&records, &REFERENCE_COLUMNS).map(Some)
    }

    /// A single reference by its identifier.
    pub fn load(&self, id: u64) -> Result<Record, ApiError> {
        let envelope = self.client.call(
            &ApiCall::new(format!("reference/{id}/load"))
                .error_context(format!("Failed to load reference {id}")),
        )?;
        match envelope.into_payload() {
            Some(Value::Object(record)) => Ok(record),
            Some(other) => Err(ApiError::Protocol(format!(
                "expected reference {id} as a record, got {other}"
            ))),
            None => Err(ApiError::Protocol(format!(
                "server returned no payload for reference {id}"
            ))),
        }
    }
}
