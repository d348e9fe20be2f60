//! Custom [extractors] that reject requests with an [`HttpError`].
//!
//! [extractors]: axum::extract

use axum::extract::FromRequestParts;

use crate::http::HttpError;

/// An [extractor] for URI query strings.
///
/// This is the same as [`axum::extract::Query`], except that it produces the same kind of error
/// response as all of our errors.
///
/// [extractor]: axum::extract
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HttpError))]
pub(crate) struct Query<T>(pub(crate) T);
