//! Storage collaborators of the lifecycle engine.

pub mod employee;
pub mod memory;
pub mod request;

pub use employee::{EmployeeDirectory, PgEmployeeDirectory};
pub use memory::{InMemoryEmployeeDirectory, InMemoryRequestStore};
pub use request::{PgRequestStore, RequestStore, StoreError};

#[cfg(test)]
pub use employee::MockEmployeeDirectory;
#[cfg(test)]
pub use request::MockRequestStore;
