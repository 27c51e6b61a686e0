//! Input validation for request payloads.
//!
//! Field rules live in [`rules`]; payload structs derive `validator::Validate` and the
//! lifecycle engine turns any failure into a validation error.

pub mod rules;

use validator::ValidationErrors;

/// Flattens field errors into `"field: code"` messages, sorted for stable output.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| format!("{}: {}", field, e.code.as_ref()))
        })
        .collect();
    messages.sort();
    messages
}
