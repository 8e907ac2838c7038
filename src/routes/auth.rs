// src/routes/auth.rs
use axum::{Json, extract::State};
use tracing::info;

use crate::{
    content::REGISTER_ACK,
    error::AppError,
    message::{LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse},
    services::session_store::Identity,
    state::SharedState,
};

pub async fn login_handler(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identity = state.session.login(payload.category, &payload.name).await?;
    Ok(Json(LoginResponse {
        identity,
        redirect: "/dashboard".to_string(),
    }))
}

pub async fn logout_handler(
    State(state): State<SharedState>,
) -> Result<Json<LogoutResponse>, AppError> {
    let logged_out = state.session.logout().await?;
    Ok(Json(LogoutResponse { logged_out }))
}

pub async fn session_handler(State(state): State<SharedState>) -> Json<Option<Identity>> {
    Json(state.session.current_identity().await)
}

// Submissions are acknowledged as-is; nothing is stored.
pub async fn register_handler(Json(payload): Json<RegisterRequest>) -> Json<RegisterResponse> {
    info!(
        tab = payload.tab.as_deref().unwrap_or("type1"),
        agreed = payload.agreed,
        has_company = payload.company.is_some(),
        "registration request received"
    );
    Json(RegisterResponse {
        message: REGISTER_ACK.to_string(),
        redirect: "/login".to_string(),
    })
}
