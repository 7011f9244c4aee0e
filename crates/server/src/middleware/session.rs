//! Session middleware.
//!
//! Decodes the auth cookie on the way in and inserts a [`SessionExtension`]
//! into request extensions. On the way out, a [`SessionUpdate`] staged in
//! response extensions becomes a `Set-Cookie` header - this is the only
//! place the cookie is written, so handlers never touch headers themselves.

use axum::{
    extract::{Request, State},
    http::header::{COOKIE, HeaderValue, SET_COOKIE},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::session::{SessionExtension, SessionUpdate, cookie_value};
use crate::state::AppState;

/// Decode the auth cookie into request extensions; apply staged updates to
/// the response.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = request
        .headers()
        .get(COOKIE)
        .and_then(|header| header.to_str().ok())
        .and_then(cookie_value)
        .and_then(|value| match state.cookies().decode(value) {
            Ok(context) => Some(context),
            Err(err) => {
                // Undecodable cookies are treated as "no session"
                warn!(error = %err, "dropping undecodable auth cookie");
                None
            }
        });

    request.extensions_mut().insert(SessionExtension(context));

    let mut response = next.run(request).await;

    if let Some(update) = response.extensions_mut().remove::<SessionUpdate>() {
        let header = match &update {
            SessionUpdate::Issue(context) => state.cookies().issue_header(context),
            SessionUpdate::Clear => state.cookies().clear_header(),
        };
        if let Ok(value) = HeaderValue::from_str(&header) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Wrap a response so the session middleware issues or clears the cookie.
pub struct WithSession<T> {
    update: SessionUpdate,
    inner: T,
}

impl<T> WithSession<T> {
    /// Issue (or re-issue) the auth cookie alongside `inner`.
    pub const fn issue(context: crate::session::SessionContext, inner: T) -> Self {
        Self {
            update: SessionUpdate::Issue(context),
            inner,
        }
    }

    /// Expire the auth cookie alongside `inner`.
    pub const fn clear(inner: T) -> Self {
        Self {
            update: SessionUpdate::Clear,
            inner,
        }
    }
}

impl<T: axum::response::IntoResponse> axum::response::IntoResponse for WithSession<T> {
    fn into_response(self) -> Response {
        let mut response = self.inner.into_response();
        response.extensions_mut().insert(self.update);
        response
    }
}
