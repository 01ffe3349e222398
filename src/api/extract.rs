//! Request extractors that turn shape mismatches into [`ApiError`]s.
//!
//! Body and path parsing happens here, before any handler runs, so a
//! request that fails validation never reaches the store.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::Json;

use crate::error::ApiError;

/// JSON body extractor answering 422 on malformed input.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor answering 422 on malformed input.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
