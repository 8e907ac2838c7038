use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vanigar_portal::{
    config::PortalConfig,
    routes,
    services::{
        answer::AnswerService,
        session_store::{JsonFileStorage, SessionStore},
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vanigar_portal=info,tower_http=info")),
        )
        .init();

    let config = PortalConfig::from_env().context("reading configuration")?;

    let session = SessionStore::open(Arc::new(JsonFileStorage::new(&config.data_dir)));
    let answers = AnswerService::from_config(&config).context("building answer client")?;
    if !answers.has_credential() {
        tracing::warn!("API_KEY is not set; the Q&A assistant will reply with a configuration notice");
    }

    let state = Arc::new(AppState::new(session, answers, config.chat_ttl));

    // Sweep idle chat logs.
    let chats = state.chats.clone();
    let sweep_every = config.chat_ttl.max(std::time::Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            let removed = chats.purge_expired().await;
            if removed > 0 {
                info!(removed, "purged idle chats");
            }
        }
    });

    let app = routes::create_router(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "portal listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
