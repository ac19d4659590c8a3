use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, NavigateRequest},
    services::{
        composer::Composer,
        guide::{PendingTurn, SessionView, TurnKind, TurnOutcome},
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s).await,
        _ => state.sessions.create_session().await,
    };

    // User entry is recorded before the reply is composed.
    let turn = state.sessions.begin_turn(&session_id, &payload.message).await?;

    // Completion calls run on their own task so a dropped client
    // connection cannot strand the user entry without a reply.
    let (reply, outcome) = if turn.needs_completion() {
        let task = tokio::spawn(complete_turn(state.clone(), session_id.clone(), turn));
        task.await
            .map_err(|err| AppError::Internal(format!("reply task failed: {err}")))??
    } else {
        complete_turn(state.clone(), session_id.clone(), turn).await?
    };
    debug!(session = %session_id, mode = ?outcome.mode, "reply composed");

    Ok(Json(ChatResponse {
        session_id,
        mode: outcome.mode,
        reply,
        selection: outcome.selection.to_vec(),
    }))
}

async fn complete_turn(
    state: SharedState,
    session_id: String,
    turn: PendingTurn,
) -> Result<(String, TurnOutcome), AppError> {
    let composed = match turn.kind {
        TurnKind::Tour(route) => state.tour.compose(&turn.text, &route).await,
        TurnKind::Food(intent) => state.food.compose(&turn.text, &intent).await,
    };
    let reply = composed.reply.clone();

    let outcome = state.sessions.finish_turn(&session_id, turn, composed).await?;
    Ok((reply, outcome))
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .view(&session_id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound(session_id))
}

pub async fn navigate_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.navigate(&session_id, payload.mode).await?;
    Ok(Json(view))
}
