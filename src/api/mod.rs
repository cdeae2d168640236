//! Backend access: transport, endpoint surface, and the shared error type.

mod client;
mod error;
mod repository;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::ApiError;
pub use repository::{HttpRepository, Repository};
