pub mod employees;
pub mod requests;

pub use employees::*;
pub use requests::*;
