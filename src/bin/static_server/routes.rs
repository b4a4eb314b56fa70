use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use http_conformance::model::ExpectedRedirect;

use super::files::{content_type, resolve_file};

pub(super) struct ServerState {
    pub(super) root: PathBuf,
    pub(super) redirects: Vec<ExpectedRedirect>,
}

pub(super) fn build_router(state: Arc<ServerState>) -> Router {
    Router::new().fallback(serve).with_state(state)
}

async fn serve(State(state): State<Arc<ServerState>>, method: Method, uri: Uri) -> Response {
    let head = method == Method::HEAD;
    if method != Method::GET && !head {
        tracing::debug!(%method, path = uri.path(), "method not allowed");
        return StatusCode::FORBIDDEN.into_response();
    }

    let path = uri.path();
    if let Some(r) = state.redirects.iter().find(|r| r.path == path) {
        return (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, r.location.clone())],
        )
            .into_response();
    }

    let Some(file) = resolve_file(&state.root, path).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(file = %file.display(), error = %err, "read file");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let content_length = bytes.len().to_string();
    let body = if head { Body::empty() } else { Body::from(bytes) };
    (
        [
            (header::CONTENT_TYPE, content_type(&file).to_string()),
            (header::CONTENT_LENGTH, content_length),
        ],
        body,
    )
        .into_response()
}
