//! Typed endpoint groups
//!
//! One module per backend collection. Methods live on [`ApiClient`]
//! (`crate::http`) and take the caller's [`crate::Session`] explicitly.

mod approvals;
mod complaints;
mod invoices;
mod maintenances;
mod projects;
mod users;

pub use approvals::PendingRequest;

use serde::Serialize;

/// Body for the bulk worker-assignment endpoints. The full resulting id
/// array is sent every time (replace semantics, not a diff).
#[derive(Debug, Serialize)]
pub(crate) struct AssignWorkers<'a> {
    pub worker_ids: &'a [String],
}
