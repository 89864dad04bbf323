//! Shared types for the blogfront client: wire models, the response envelope
//! and the client error taxonomy.

pub mod envelope;
pub mod error;
pub mod models;

pub use envelope::*;
pub use error::*;
pub use models::*;
