//! Domain stores mirroring server data.

pub mod posts;

pub use posts::{Pagination, PostState, PostStore};
