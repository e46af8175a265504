//! Lantern bridge server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use lantern_api::config::Config;
use lantern_api::state::AppState;
use lantern_chat::{ChatApi, HttpChatApi};
use lantern_dispatch::TurnConfig;
use lantern_zmachine::{GameRunner, HttpGameRunner};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Lantern bridge");

    let config = Config::from_env()?;

    let runner: Arc<dyn GameRunner> = Arc::new(HttpGameRunner::new(&config.zmachine_url));
    let chat: Arc<dyn ChatApi> =
        Arc::new(HttpChatApi::new(&config.chat_api_url, &config.chat_token));

    // Resolve the bot's own identity once. Failure degrades self-message
    // filtering, it does not stop the server.
    let identity = match chat.own_identity().await {
        Ok(identity) => {
            tracing::info!(person_id = %identity.person_id, "resolved bot identity");
            Some(identity)
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not resolve bot identity; may reply to own messages");
            None
        }
    };

    let state = AppState::new(
        runner,
        chat,
        identity,
        TurnConfig::new(config.default_game.clone()),
        config.admin_contact.clone(),
    );

    let app = lantern_api::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
