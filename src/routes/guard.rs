// src/routes/guard.rs
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::state::SharedState;

/// Lets the request through only when someone is logged in, handing the
/// identity to the handler as an extension. Every member category passes.
pub async fn require_identity(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    match state.session.current_identity().await {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => {
            debug!(path = %req.uri().path(), "no session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
