//! Data models shared across the store, the lifecycle engine and API handlers.

pub mod request;
pub mod request_status;
pub mod user;

pub use request::{CreateRequest, DecisionPayload, NewRequest, Request, RequestResponse};
pub use request_status::{Decision, RequestStatus, StatusFilter, UnknownStatus};
pub use user::{Actor, Employee, Role};
