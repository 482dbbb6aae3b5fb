//! Request extractors whose rejections are rendered as failure envelopes.
//!
//! These wrap axum's `Json`, `Path` and `Query` so that malformed input is
//! answered with `400` and the usual `{Status, Message, Data}` body instead
//! of axum's plain-text rejection.

use axum::extract::{FromRequest, FromRequestParts};

use super::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
