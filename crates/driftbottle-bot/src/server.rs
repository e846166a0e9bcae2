//! Webhook server receiving OneBot v11 event pushes.
//!
//! The gateway POSTs every event as JSON to the configured path. Group
//! messages are dispatched on their own task so the webhook responds
//! immediately; replies go back through the gateway's `send_group_msg`.
//! The handler always answers 204 — event push has no useful response body
//! and a non-2xx would make the gateway retry.

use std::sync::Arc;

use axum::{Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use driftbottle_gateway::OneBotHttpClient;

use crate::config::ServerConfig;
use crate::dispatcher::Dispatcher;
use crate::event::PushEvent;

/// Shared state for the webhook server.
pub struct AppState {
    /// Command dispatcher.
    pub dispatcher: Dispatcher,
    /// Gateway client used to send replies.
    pub gateway: Arc<OneBotHttpClient>,
}

/// Binds the webhook server and serves until ctrl-c.
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let path = if config.path.starts_with('/') {
        config.path.clone()
    } else {
        format!("/{}", config.path)
    };

    let router = Router::new().route(&path, post(handle_push)).with_state(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, path = %path, "webhook server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

/// Accepts one pushed event.
async fn handle_push(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    let event: PushEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "ignoring undecodable event push");
            return StatusCode::NO_CONTENT;
        }
    };

    let Some(msg) = event.into_group_message() else {
        trace!("ignoring non-group event");
        return StatusCode::NO_CONTENT;
    };

    // Dispatch off the webhook path; enrichment may take seconds.
    tokio::spawn(async move {
        if let Some(reply) = state.dispatcher.handle(&msg).await
            && let Err(e) = state.gateway.send_group_msg(msg.group_id, &reply).await
        {
            error!(group_id = msg.group_id, error = %e, "failed to send reply");
        }
    });

    StatusCode::NO_CONTENT
}
