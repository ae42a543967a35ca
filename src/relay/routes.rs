//! Route handlers for the three relay operations

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;

use super::prompt::build_turn_list;
use super::request_log::{format_chat_log, format_generate_log};
use super::server::RelayState;
use crate::api::{
    ChatCompletionRequest, ChatCompletionResponse, ChatPayload, ChatReply, GeneratePayload,
    SynthesisRequest, TTS_VERSION_HEADER,
};

/// JSON error body in the shape the browser expects: `{"error": <message>}`
fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// GET /voices: relay the upstream voice catalog.
///
/// Success passes the upstream status and JSON body through unchanged. An
/// upstream rejection is relayed as 502 with the upstream error text; a
/// transport failure collapses to a generic 500.
pub async fn list_voices(State(state): State<RelayState>) -> Response {
    let tts = &state.config.tts;

    let mut request = state
        .http_client
        .get(tts.voices_url())
        .timeout(Duration::from_secs(tts.timeout_seconds))
        .header(TTS_VERSION_HEADER, tts.api_version.as_str())
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(ref key) = tts.api_key {
        request = request.bearer_auth(key);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, "Failed to reach voice catalog upstream");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch voices");
        }
    };

    let status = upstream.status();
    if !status.is_success() {
        let body = upstream.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Voice catalog upstream rejected request");
        return json_error(StatusCode::BAD_GATEWAY, &body);
    }

    match upstream.bytes().await {
        Ok(body) => Response::builder()
            .status(StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read voice catalog response");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch voices")
        }
    }
}

/// POST /generate: synthesize speech for a transcript.
///
/// Validates before any upstream call. Upstream failure detail stays in the
/// server log; unlike /voices it is never relayed to the caller.
pub async fn generate_speech(
    State(state): State<RelayState>,
    Json(payload): Json<GeneratePayload>,
) -> Response {
    let tts = &state.config.tts;

    let Some((text, voice_id)) = payload.require_fields() else {
        return json_error(StatusCode::BAD_REQUEST, "Missing text or voice_id");
    };

    let model_id = payload
        .model_id
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| tts.default_model.clone());

    tracing::info!("{}", format_generate_log(text, voice_id, &model_id));

    let body = SynthesisRequest::new(text, voice_id, model_id);

    let mut request = state
        .http_client
        .post(tts.synthesis_url())
        .timeout(Duration::from_secs(tts.timeout_seconds))
        .header(TTS_VERSION_HEADER, tts.api_version.as_str())
        .json(&body);
    if let Some(ref key) = tts.api_key {
        request = request.bearer_auth(key);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, "Failed to reach synthesis upstream");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
        }
    };

    let status = upstream.status();
    if !status.is_success() {
        let body = upstream.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Synthesis upstream rejected request");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
    }

    match upstream.bytes().await {
        Ok(audio) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "audio/wav")
            .body(Body::from(audio))
            .unwrap()
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read synthesis response");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

/// POST /chat: forward a conversation to the chat completion upstream and
/// return the first choice's content as `{"reply": ...}`.
pub async fn relay_chat(
    State(state): State<RelayState>,
    Json(payload): Json<ChatPayload>,
) -> Response {
    let chat = &state.config.chat;

    if !payload.has_input() {
        return json_error(StatusCode::BAD_REQUEST, "Message or messages is required");
    }

    let turns = build_turn_list(&payload, &state.config.assistant);
    tracing::info!("{}", format_chat_log(&turns));

    let completion_request = ChatCompletionRequest {
        model: chat.model.clone(),
        messages: turns,
    };

    let mut request = state
        .http_client
        .post(chat.completions_url())
        .timeout(Duration::from_secs(chat.timeout_seconds))
        .json(&completion_request);
    if let Some(ref key) = chat.api_key {
        request = request.bearer_auth(key);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, "Failed to reach chat upstream");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Chat generation failed");
        }
    };

    let status = upstream.status();
    if !status.is_success() {
        let body = upstream.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Chat upstream rejected request");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Chat generation failed");
    }

    let completion = match upstream.json::<ChatCompletionResponse>().await {
        Ok(completion) => completion,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse chat completion response");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Chat generation failed");
        }
    };

    match completion.first_content() {
        Some(reply) => (
            StatusCode::OK,
            Json(ChatReply {
                reply: reply.to_string(),
            }),
        )
            .into_response(),
        None => {
            tracing::error!(id = ?completion.id, "Chat completion carried no message content");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Chat generation failed")
        }
    }
}
