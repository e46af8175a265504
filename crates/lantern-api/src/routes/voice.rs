//! Voice/SMS channel adapter.
//!
//! The IVR platform delivers each inbound text as a webhook and expects a
//! script of directives back: `say` to speak/send a fragment, `wait` to
//! pause between fragments, `reject` to drop the session.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use lantern_core::action::Action;
use lantern_core::chunk::chunk;
use lantern_core::session::SessionLabel;
use lantern_dispatch::take_turn;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{instrument, warn};

use crate::state::AppState;

/// Largest fragment the SMS/voice channel accepts.
const VOICE_CHUNK_LEN: usize = 140;

/// Pause between spoken fragments, in milliseconds.
const WAIT_MS: u64 = 500;

/// Inbound IVR webhook payload.
#[derive(Debug, Deserialize)]
pub struct VoiceWebhook {
    /// The IVR session wrapper.
    pub session: VoiceSession,
}

/// IVR session details.
#[derive(Debug, Deserialize)]
pub struct VoiceSession {
    /// The number/channel the message arrived on.
    pub to: VoiceEndpoint,
    /// The caller.
    pub from: VoiceCaller,
    /// The message body.
    #[serde(rename = "initialText", default)]
    pub initial_text: String,
}

/// Receiving endpoint; only the channel kind matters here.
#[derive(Debug, Deserialize)]
pub struct VoiceEndpoint {
    /// `TEXT` for SMS; anything else is a call, which this bridge rejects.
    #[serde(default)]
    pub channel: String,
}

/// Caller identification.
#[derive(Debug, Deserialize)]
pub struct VoiceCaller {
    /// E.164-formatted caller id.
    #[serde(rename = "e164Id", default)]
    pub e164_id: Option<String>,
    /// Fallback id some carriers deliver instead.
    #[serde(default)]
    pub id: Option<String>,
}

impl VoiceCaller {
    fn caller_id(&self) -> Option<&str> {
        self.e164_id.as_deref().or(self.id.as_deref())
    }
}

fn reject() -> Json<Value> {
    Json(json!({ "tropo": [{ "reject": {} }] }))
}

/// One `say` per chunk, separated by `wait`s so the carrier keeps the
/// fragments in order.
fn say_directives(chunks: &[String]) -> Json<Value> {
    let mut steps = Vec::with_capacity(chunks.len() * 2);
    for (i, fragment) in chunks.iter().enumerate() {
        steps.push(json!({ "say": { "value": fragment } }));
        if i + 1 < chunks.len() {
            steps.push(json!({ "wait": { "milliseconds": WAIT_MS } }));
        }
    }
    Json(json!({ "tropo": steps }))
}

/// POST /tropo
#[instrument(skip(state, webhook))]
async fn inbound(State(state): State<AppState>, Json(webhook): Json<VoiceWebhook>) -> Json<Value> {
    if webhook.session.to.channel != "TEXT" {
        warn!(channel = %webhook.session.to.channel, "rejecting non-text session");
        return reject();
    }
    let Some(caller_id) = webhook.session.from.caller_id() else {
        warn!("inbound text without caller id");
        return reject();
    };

    let label = SessionLabel::from_caller_id(caller_id);
    let action = Action::parse(&webhook.session.initial_text);
    let outcome = take_turn(&state.runner, &label, &action, &state.turn).await;

    say_directives(&chunk(&outcome.reply, VOICE_CHUNK_LEN))
}

/// Returns the voice/SMS channel router.
pub fn router() -> Router<AppState> {
    Router::new().route("/tropo", post(inbound))
}
