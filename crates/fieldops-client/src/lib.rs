//! FieldOps API client
//!
//! Typed REST client for the FieldOps backend plus the hosted-image upload
//! pipeline. Every call takes an explicit [`Session`]; nothing here holds
//! ambient global state.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod upload;

pub use config::{ApiConfig, ImageConfig, Settings};
pub use error::ClientError;
pub use http::ApiClient;
pub use session::Session;
pub use upload::ImageUploader;
