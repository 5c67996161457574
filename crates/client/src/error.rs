//! Client error taxonomy.

use thiserror::Error;

/// Failures surfaced by the session and gateway.
///
/// Guard denials never appear here: a denial is a silent redirect, not an
/// error. Unauthorized/forbidden responses propagate to the calling view for
/// presentation and do not force a logout; credential expiry is discovered
/// lazily, one rejected call at a time.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401 — the server did not accept the credential (absent, expired or
    /// forged).
    #[error("not authenticated")]
    Unauthorized,

    /// 403 — authenticated, but not for this tenant or operation.
    #[error("not allowed")]
    Forbidden,

    #[error("not found")]
    NotFound,

    /// Business-rule rejection (HTTP 400/409). The server's stated reason is
    /// carried verbatim for user-visible presentation.
    #[error("{0}")]
    Rejected(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The view that issued the request has been navigated away from; the
    /// response must not overwrite the current view's state.
    #[error("response superseded by a newer view")]
    Superseded,
}

impl ClientError {
    /// Map a non-success response to the taxonomy, extracting the server's
    /// `detail` message where one is present.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let message = detail_message(response).await;

        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 409 => Self::Rejected(message),
            code => Self::Server {
                status: code,
                message,
            },
        }
    }
}

/// Pull the human-readable rejection reason out of an error body.
///
/// The collaborating server wraps reasons as `{"detail": "..."}`; fall back
/// to the raw body, then to the bare status.
async fn detail_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(detail) = value["detail"].as_str() {
            return detail.to_string();
        }
    }

    if body.is_empty() {
        status.to_string()
    } else {
        body
    }
}
