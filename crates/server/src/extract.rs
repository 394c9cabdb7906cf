//! Extractors whose rejections use the server's JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ServerError;

/// JSON request body. Syntax and shape errors are answered with `422`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters. Unparseable values are answered with `400`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);
