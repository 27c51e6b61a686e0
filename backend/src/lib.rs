//! Work request tracking service.
//!
//! Employees open requests assigned to a co-worker, managers approve or reject
//! them, and the assignee actions and closes approved ones. All status changes
//! go through [`services::RequestLifecycle`].

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;
