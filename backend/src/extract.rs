//! Extractors that report malformed input in the API's error shape.
//!
//! Axum's own `Json` and `Path` reject with plain-text bodies (and a 422 for
//! JSON that parses but does not fit the payload). These wrappers run the same
//! extraction and convert the rejection into [`AppError::Validation`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body; any rejection becomes 400 `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; any rejection becomes 400 `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
