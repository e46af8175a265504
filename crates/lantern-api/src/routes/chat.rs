//! Team-chat channel adapter.
//!
//! The chat platform announces events by webhook; message bodies are
//! fetched separately. Two events matter: a message was created (play a
//! turn) and a membership was created (introduce the game).

use axum::extract::State;
use axum::{Json, Router, routing::post};
use lantern_chat::markup::{clean_incoming, to_markdown};
use lantern_core::action::Action;
use lantern_core::error::BridgeError;
use lantern_core::session::SessionLabel;
use lantern_dispatch::take_turn;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Message posted when the bot joins a room.
const INTRO_MESSAGE: &str =
    "Hi! I run classic interactive fiction in this room. Everyone here plays \
     the same game together - just mention me followed by a command.";

/// Action played on the user's behalf to open a fresh room's session.
const IMPLICIT_FIRST_ACTION: &str = "look";

/// Webhook body for a message-created event.
#[derive(Debug, Deserialize)]
pub struct MessageWebhook {
    /// Event payload.
    pub data: MessageData,
}

/// Message-created payload; the body text has to be fetched by id.
#[derive(Debug, Deserialize)]
pub struct MessageData {
    /// Id of the created message.
    pub id: String,
    /// Room it was posted in.
    #[serde(rename = "roomId")]
    pub room_id: String,
    /// Author.
    #[serde(rename = "personId", default)]
    pub person_id: String,
}

/// Webhook body for a membership-created event.
#[derive(Debug, Deserialize)]
pub struct MembershipWebhook {
    /// Event payload.
    pub data: MembershipData,
}

/// Membership-created payload.
#[derive(Debug, Deserialize)]
pub struct MembershipData {
    /// Room the membership was created in.
    #[serde(rename = "roomId")]
    pub room_id: String,
}

/// Acknowledgement returned to the webhook caller.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// `ok` when a turn was played, `ignored` for self-authored messages.
    pub status: &'static str,
}

/// Unwraps a chat API result, escalating failures to the admin contact
/// out-of-band. The end user never sees the detail.
async fn escalate<T>(
    state: &AppState,
    result: Result<T, BridgeError>,
    context: &str,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            error!(context, error = %err, "chat API failure");
            if let Some(admin) = &state.admin_contact {
                let note = format!("lantern: {context} failed: {err}");
                if let Err(notify_err) = state.chat.post_direct_message(admin, &note).await {
                    warn!(error = %notify_err, "could not reach admin contact");
                }
            }
            Err(ApiError(err))
        }
    }
}

/// Plays one turn for a room and posts the reply back to it.
async fn play_and_reply(state: &AppState, room_id: &str, action: &Action) -> Result<(), ApiError> {
    let label = SessionLabel::from_room_id(room_id);
    let outcome = take_turn(&state.runner, &label, action, &state.turn).await;

    let markdown = to_markdown(&outcome.reply);
    escalate(
        state,
        state
            .chat
            .post_message(room_id, &markdown, &outcome.reply)
            .await,
        "post reply",
    )
    .await
}

/// POST /spark/messages
#[instrument(skip(state, webhook), fields(room_id = %webhook.data.room_id))]
async fn message_created(
    State(state): State<AppState>,
    Json(webhook): Json<MessageWebhook>,
) -> Result<Json<WebhookResponse>, ApiError> {
    match &state.identity {
        Some(identity) if identity.person_id == webhook.data.person_id => {
            // Our own reply echoing back through the webhook.
            return Ok(Json(WebhookResponse { status: "ignored" }));
        }
        Some(_) => {}
        None => warn!("bot identity unknown; cannot filter self-authored messages"),
    }

    let message = escalate(
        &state,
        state.chat.get_message(&webhook.data.id).await,
        "get message",
    )
    .await?;

    let cleaned = clean_incoming(&message.text, state.identity.as_ref());
    let action = Action::parse(&cleaned);
    info!(action = action.as_str(), "playing chat turn");

    play_and_reply(&state, &webhook.data.room_id, &action).await?;
    Ok(Json(WebhookResponse { status: "ok" }))
}

/// POST /spark/memberships
#[instrument(skip(state, webhook), fields(room_id = %webhook.data.room_id))]
async fn membership_created(
    State(state): State<AppState>,
    Json(webhook): Json<MembershipWebhook>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let room_id = &webhook.data.room_id;
    escalate(
        &state,
        state
            .chat
            .post_message(room_id, INTRO_MESSAGE, INTRO_MESSAGE)
            .await,
        "post introduction",
    )
    .await?;

    // Open the session so the room sees where the story starts.
    play_and_reply(&state, room_id, &Action::parse(IMPLICIT_FIRST_ACTION)).await?;
    Ok(Json(WebhookResponse { status: "ok" }))
}

/// Returns the team-chat channel router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/spark/messages", post(message_created))
        .route("/spark/memberships", post(membership_created))
}
