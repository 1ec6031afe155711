//! WebSocket upgrade handlers for tutoring sessions.
//!
//! Each connection gets its own session:
//! 1. Upgrade to WebSocket
//! 2. Create a staged or stateless session in the registry
//! 3. Answer frames one at a time until disconnect
//! 4. Discard the session
//!
//! The client-supplied id in the path is only a log label. Sessions are keyed
//! by a server-generated [`SessionId`].

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Json, Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::application::SessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::tutoring::TutorError;

use super::messages::{ErrorFrame, TutorFrame};

/// State shared by all tutoring routes.
#[derive(Clone)]
pub struct TutorState {
    pub registry: Arc<SessionRegistry>,
}

impl TutorState {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }
}

/// Liveness endpoint.
///
/// Route: `GET /`
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the Virtual Tutor Server!" }))
}

/// Staged tutoring session.
///
/// Routes: `GET /tutor/ws/:client_id`, `GET /test_2/ws/:client_id`
pub async fn tutor_ws_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<TutorState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_tutor_socket(socket, client_id, state))
}

/// Stateless tutoring session.
///
/// Routes: `GET /dummy/ws/:client_id`, `GET /test_1/ws/:client_id`
pub async fn dummy_ws_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<TutorState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_dummy_socket(socket, client_id, state))
}

async fn handle_tutor_socket(socket: WebSocket, client_id: String, state: TutorState) {
    let (session_id, controller) = match state.registry.create_session().await {
        Ok(created) => created,
        Err(err) => {
            tracing::error!(
                client_id = %client_id,
                error = %err,
                "Failed to create tutoring session"
            );
            let (mut sender, _) = socket.split();
            let frame = ErrorFrame::session_failed(err.to_string());
            let _ = send_json(&mut sender, &frame).await;
            return;
        }
    };

    let live_sessions = state.registry.len().await;
    tracing::info!(
        client_id = %client_id,
        session_id = %session_id,
        live_sessions,
        "Tutor session connected"
    );

    run_session(socket, &client_id, session_id, move |utterance| {
        let controller = controller.clone();
        async move { controller.lock().await.handle_turn(&utterance).await }
    })
    .await;

    state.registry.remove(&session_id).await;
    tracing::info!(client_id = %client_id, session_id = %session_id, "Tutor session closed");
}

async fn handle_dummy_socket(socket: WebSocket, client_id: String, state: TutorState) {
    let (session_id, tutor) = state.registry.create_stateless_session().await;

    let live_sessions = state.registry.len().await;
    tracing::info!(
        client_id = %client_id,
        session_id = %session_id,
        live_sessions,
        "Stateless session connected"
    );

    run_session(socket, &client_id, session_id, move |utterance| {
        let tutor = tutor.clone();
        async move { Ok(tutor.lock().await.handle_turn(&utterance).await) }
    })
    .await;

    state.registry.remove(&session_id).await;
    tracing::info!(client_id = %client_id, session_id = %session_id, "Stateless session closed");
}

/// Reads frames until the client leaves, answering each before reading the
/// next one.
async fn run_session<F, Fut>(
    socket: WebSocket,
    client_id: &str,
    session_id: SessionId,
    mut turn: F,
) where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String, TutorError>>,
{
    let (mut sender, mut receiver) = socket.split();

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let frame = match TutorFrame::parse(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!(session_id = %session_id, error = %e, "Malformed frame");
                        let error = ErrorFrame::malformed(e.to_string());
                        if send_json(&mut sender, &error).await.is_err() {
                            break;
                        }
                        continue;
                    }
                };

                match turn(frame.content.clone()).await {
                    Ok(reply) => {
                        if let Err(e) = send_json(&mut sender, &frame.reply(reply)).await {
                            tracing::debug!(
                                session_id = %session_id,
                                "Send error, closing connection: {}",
                                e
                            );
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(
                            client_id = %client_id,
                            session_id = %session_id,
                            error = %err,
                            "Session failed, closing connection"
                        );
                        let error = ErrorFrame::session_failed(err.to_string());
                        let _ = send_json(&mut sender, &error).await;
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            Ok(Message::Binary(_)) => {
                tracing::warn!(session_id = %session_id, "Received unsupported binary message");
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // handled by axum
            }
            Ok(Message::Close(_)) => {
                tracing::debug!(session_id = %session_id, "Client sent close frame");
                break;
            }
            Err(e) => {
                tracing::debug!(session_id = %session_id, "Receive error: {}", e);
                break;
            }
        }
    }
}

/// Send a JSON frame over the WebSocket.
async fn send_json<T: Serialize>(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &T,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create the axum router for all tutoring routes.
///
/// `/test_2` and `/test_1` are the paths deployed clients already use; they
/// serve the same sessions as `/tutor` and `/dummy`.
pub fn tutor_router(state: TutorState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/tutor/ws/:client_id", get(tutor_ws_handler))
        .route("/test_2/ws/:client_id", get(tutor_ws_handler))
        .route("/dummy/ws/:client_id", get(dummy_ws_handler))
        .route("/test_1/ws/:client_id", get(dummy_ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
