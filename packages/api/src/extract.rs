// ABOUTME: Request extractors whose rejections use the API error envelope
// ABOUTME: Drop-in replacements for axum's Json, Path, and Query in handlers

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body; malformed or oversized bodies become `ApiError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

/// Path parameters; unparseable ids become `ApiError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);
