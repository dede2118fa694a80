//! Domain entities
//!
//! Transient client copies of records owned and versioned by the backend;
//! no entity outlives the screen that fetched it.

pub mod complaint;
pub mod invoice;
pub mod maintenance;
pub mod photo;
pub mod project;
pub mod user;

pub use complaint::Complaint;
pub use invoice::Invoice;
pub use maintenance::{Maintenance, ServiceVisit};
pub use photo::{Photo, PhotoSet};
pub use project::{Project, MAX_SURVEY_PHOTOS};
pub use user::User;
