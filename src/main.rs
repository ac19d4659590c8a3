use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tracing::{info, warn};

use barcelona_guide::{
    config::{CompletionConfig, ServerConfig},
    routes,
    services::completion::{Completer, OpenAiCompleter, UnconfiguredCompleter},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("loading server configuration")?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .init();

    let completer: Arc<dyn Completer> = match CompletionConfig::from_env() {
        Ok(completion) => Arc::new(
            OpenAiCompleter::new(completion).context("building completion client")?,
        ),
        Err(err) => {
            warn!(error = %err, "tour guide replies will fall back to the apology message");
            Arc::new(UnconfiguredCompleter::new(err))
        }
    };

    let state = Arc::new(AppState::new(config.session_ttl, completer));
    spawn_session_purge(state.clone());

    let app: Router = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!("🚀 Barcelona guide running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_session_purge(state: Arc<AppState>) {
    let period = state
        .sessions
        .ttl()
        .clamp(Duration::from_secs(1), Duration::from_secs(300));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = state.sessions.purge_expired().await;
            if removed > 0 {
                info!(removed, "purged idle sessions");
            }
        }
    });
}
