//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize without leaking wire shapes into the domain model.

pub mod character;
pub mod sheet;

pub use character::*;
pub use sheet::*;
