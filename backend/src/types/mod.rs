//! Strongly typed identifiers shared across the crate.

pub mod id;

pub use id::{RequestId, UserId};
