//! FieldOps domain layer
//!
//! Entities, role/capability model, tracked value fields and the pure
//! list-filtering logic shared by every FieldOps client. No I/O lives here.

pub mod domain;
pub mod error;
pub mod filter;
pub mod role;
pub mod status;
pub mod tracked;

pub use domain::{
    Complaint, Invoice, Maintenance, Photo, PhotoSet, Project, ServiceVisit, User,
    MAX_SURVEY_PHOTOS,
};
pub use error::DomainError;
pub use filter::{filter_records, Searchable, StatusFilter};
pub use role::{ApprovalStatus, Capabilities, Role};
pub use status::{PaymentTerms, Priority, WorkStatus};
pub use tracked::TrackedValue;
