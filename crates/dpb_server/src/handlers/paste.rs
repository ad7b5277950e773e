//! Paste HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use dpb_core::{Lookup, StoredPaste, DEFAULT_CONTENT_TYPE};
use futures::TryStreamExt;
use http_body_util::{BodyExt, Limited};
use std::io;
use tokio_util::io::{ReaderStream, StreamReader};

fn declared_content_type(headers: &HeaderMap) -> &str {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return DEFAULT_CONTENT_TYPE;
    };
    match std::str::from_utf8(value.as_bytes()) {
        Ok(declared) if !declared.trim().is_empty() => declared,
        Ok(_) => DEFAULT_CONTENT_TYPE,
        Err(err) => {
            tracing::warn!(
                "Declared content type {:?} is not UTF-8 ({}); storing as {}",
                value,
                err,
                DEFAULT_CONTENT_TYPE
            );
            DEFAULT_CONTENT_TYPE
        }
    }
}

/// Identifier taken straight from the request path, without percent-decoding.
fn raw_id(uri: &Uri) -> &str {
    uri.path().strip_prefix('/').unwrap_or_else(|| uri.path())
}

fn paste_response(paste: StoredPaste) -> Response {
    let content_type = HeaderValue::from_str(&paste.content_type).unwrap_or_else(|err| {
        tracing::warn!(
            "Stored content type {:?} is not a valid header value ({}); serving as {}",
            paste.content_type,
            err,
            DEFAULT_CONTENT_TYPE
        );
        HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
    });
    let body = Body::from_stream(ReaderStream::new(paste.body));
    (
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        body,
    )
        .into_response()
}

async fn lookup_response(state: &AppState, id: &str) -> Result<Response, HttpError> {
    match state.store.retrieve(id).await? {
        Lookup::Version(version) => Ok(version.into_response()),
        Lookup::Paste(paste) => Ok(paste_response(paste)),
    }
}

/// Store the request body as a new paste.
///
/// The body is streamed to disk through a limit of
/// `config.max_upload_bytes`; exceeding it fails the store.
///
/// # Returns
/// The bare identifier of the new paste.
///
/// # Errors
/// Returns an error if the engine rejects or fails the store.
pub async fn create_paste(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<String, HttpError> {
    let content_type = declared_content_type(&headers);
    let stream = Limited::new(body, state.config.max_upload_bytes)
        .into_data_stream()
        .map_err(io::Error::other);
    let id = state
        .store
        .store(content_type, StreamReader::new(stream))
        .await?;
    Ok(id)
}

/// Stream a stored paste back with its original content type.
///
/// A path segment that cannot be decoded is looked up as written, so it
/// still ends in the delayed not-found.
///
/// # Errors
/// Returns a (delayed) not-found error when no paste exists for `id`.
pub async fn get_paste(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, HttpError> {
    match id {
        Ok(Path(id)) => lookup_response(&state, &id).await,
        Err(rejection) => {
            tracing::debug!(path = %uri.path(), %rejection, "undecodable paste identifier");
            lookup_response(&state, raw_id(&uri)).await
        }
    }
}

/// Return the running engine's version banner.
pub async fn version(State(state): State<AppState>) -> Result<Response, HttpError> {
    lookup_response(&state, "").await
}

/// Reject methods other than `GET /<id>` and `POST /`.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        "only GET /<id> or POST / is allowed",
    )
}

/// Catch-all for paths no route matches.
///
/// Reads still go through the engine so that they get the same delayed
/// not-found as any other unknown identifier.
pub async fn fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, HttpError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(method_not_allowed().await.into_response());
    }
    lookup_response(&state, raw_id(&uri)).await
}
