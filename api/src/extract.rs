//! Request extractors whose rejections use the JSON error envelope.
//!
//! Drop-in wrappers around axum's `Json`, `Query` and `Path`. A malformed body,
//! query string or path segment becomes a `validation` failure instead of
//! axum's plain-text rejection.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
