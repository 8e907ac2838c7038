// src/routes/pages.rs
use axum::{
    Extension, Json,
    extract::Query,
};

use crate::{
    content::{self, PageView},
    message::RegisterQuery,
    services::session_store::Identity,
};

pub async fn home() -> Json<PageView> {
    Json(content::home())
}

pub async fn login() -> Json<PageView> {
    Json(content::login())
}

pub async fn register(Query(query): Query<RegisterQuery>) -> Json<PageView> {
    Json(content::register(query.tab.as_deref()))
}

pub async fn history_commerce() -> Json<PageView> {
    Json(content::history_commerce())
}

pub async fn connect() -> Json<PageView> {
    Json(content::connect())
}

pub async fn dashboard(Extension(identity): Extension<Identity>) -> Json<PageView> {
    Json(content::dashboard(&identity))
}

pub async fn ads() -> Json<PageView> {
    Json(content::ads())
}

pub async fn products() -> Json<PageView> {
    Json(content::products())
}

pub async fn workshops() -> Json<PageView> {
    Json(content::workshops("/workshops"))
}

pub async fn news() -> Json<PageView> {
    Json(content::workshops("/news"))
}
