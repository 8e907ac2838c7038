// src/routes/mod.rs
pub mod auth;
pub mod chat;
pub mod guard;
pub mod pages;

use crate::state::SharedState;
use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState) -> Router {
    let member_routes = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/ads", get(pages::ads))
        .route("/products", get(pages::products))
        .route("/workshops", get(pages::workshops))
        .route("/news", get(pages::news))
        .route_layer(middleware::from_fn_with_state(state.clone(), guard::require_identity));

    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login).post(auth::login_handler))
        .route("/logout", post(auth::logout_handler))
        .route("/session", get(auth::session_handler))
        .route("/register", get(pages::register).post(auth::register_handler))
        .route("/history-commerce", get(pages::history_commerce))
        .route("/connect", get(pages::connect))
        .route("/qa", get(chat::qa_page).post(chat::chat_handler))
        .route("/qa/{chat_id}", get(chat::history_handler))
        .route("/chat", post(chat::chat_handler))
        .route("/health", get(|| async { "OK" }))
        .merge(member_routes)
        .fallback(|| async { Redirect::to("/") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
