//! HTTP routes
//!
//! The API keeps the original dashboard's route shapes: frame ingest in
//! three encodings, the two live feeds, bot roster management and
//! transaction ingestion/aggregation. Roster and detail pages are JSON.

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Json, Redirect, Response};
use axum::routing::{get, post, put};
use axum::{Form, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ledger::BotSummary;
use crate::registry::Bot;
use crate::relay::codec;

use super::error::ApiError;
use super::state::AppState;

/// Build the API router over the shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/bots", get(list_bots))
        .route("/bot_details/:bot_name", get(bot_details))
        .route("/add", post(add_bot))
        .route("/delete/:name", post(delete_bot))
        .route("/login_bot/:name/:local_ip/:temp/:gathering_map", put(login_bot))
        .route("/update_temp/:bot_name/:new_temp", put(update_temp))
        .route("/add_transaction/:bot_name/:quantity", post(add_transaction))
        .route("/send_frame_from_string/:stream_id", post(send_frame_from_string))
        .route("/send_frame_from_bytes/:stream_id", post(send_frame_from_bytes))
        .route("/send_frame_from_file/:stream_id", post(send_frame_from_file))
        .route("/video_feed/:stream_id", get(video_feed))
        .route("/base64_stream", get(base64_stream))
        .with_state(state)
}

// --- Frame ingest ---

/// JSON body for string-encoded frame ingest
#[derive(Debug, Deserialize)]
struct FramePayload {
    img_base64str: String,
}

async fn send_frame_from_string(
    State(state): State<AppState>,
    Path(stream_id): Path<String>,
    Json(payload): Json<FramePayload>,
) -> StatusCode {
    state.frames.put(&stream_id, payload.img_base64str).await;
    StatusCode::NO_CONTENT
}

async fn send_frame_from_bytes(
    State(state): State<AppState>,
    Path(stream_id): Path<String>,
    body: Bytes,
) -> StatusCode {
    state.frames.put(&stream_id, codec::to_base64(&body)).await;
    StatusCode::NO_CONTENT
}

async fn send_frame_from_file(
    State(state): State<AppState>,
    Path(stream_id): Path<String>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    // First field wins; the upload carries a single image file
    if let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let raw = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        state.frames.put(&stream_id, codec::to_base64(&raw)).await;
        return Ok(StatusCode::NO_CONTENT);
    }

    Err(ApiError::BadRequest("upload carried no file field".to_string()))
}

// --- Live feeds ---

#[derive(Debug, Deserialize)]
struct FeedQuery {
    freq: Option<u32>,
}

async fn video_feed(
    State(state): State<AppState>,
    Path(stream_id): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, ApiError> {
    let config = state.relay.config();
    let freq = config.clamp_hz(query.freq.unwrap_or(config.default_feed_hz));

    let feed = state.relay.stream_feed(stream_id, freq);
    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, config.mixed_replace_content_type())
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .body(Body::from_stream(feed))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct MixQuery {
    fps: Option<u32>,
}

async fn base64_stream(
    State(state): State<AppState>,
    Query(query): Query<MixQuery>,
) -> Result<Response, ApiError> {
    let config = state.relay.config();
    let fps = config.clamp_hz(query.fps.unwrap_or(config.mix_hz));

    // Roster captured once per request; a changed roster shows up on the
    // next connection, not mid-stream.
    let stream_ids = state.registry.stream_ids().await;
    let feed = state.relay.mix_feed(stream_ids, fps);

    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, "text/plain")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .body(Body::from_stream(feed))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// --- Roster ---

async fn list_bots(State(state): State<AppState>) -> Json<Vec<Bot>> {
    Json(state.registry.list().await)
}

/// Bot record plus its gathering aggregates
#[derive(Debug, Serialize)]
struct BotDetails {
    bot: Bot,
    summary: BotSummary,
}

async fn bot_details(
    State(state): State<AppState>,
    Path(bot_name): Path<String>,
) -> Result<Json<BotDetails>, ApiError> {
    let bot = state
        .registry
        .get(&bot_name)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("unknown bot: {}", bot_name)))?;

    let summary = state.ledger.summary(&bot_name, Utc::now()).await;
    Ok(Json(BotDetails { bot, summary }))
}

#[derive(Debug, Deserialize)]
struct AddBotForm {
    name: String,
    ip: String,
}

async fn add_bot(State(state): State<AppState>, Form(form): Form<AddBotForm>) -> Redirect {
    state.registry.add(&form.name, &form.ip).await;
    Redirect::to("/bots")
}

async fn delete_bot(State(state): State<AppState>, Path(name): Path<String>) -> Redirect {
    state.registry.remove(&name).await;
    // Drop the bot's last frame along with its roster entry
    state.frames.remove(&name).await;
    Redirect::to("/bots")
}

async fn login_bot(
    State(state): State<AppState>,
    Path((name, local_ip, temp, gathering_map)): Path<(String, String, i32, String)>,
) -> StatusCode {
    state.registry.login(&name, &local_ip, temp, &gathering_map).await;
    StatusCode::NO_CONTENT
}

async fn update_temp(
    State(state): State<AppState>,
    Path((bot_name, new_temp)): Path<(String, i32)>,
) -> Result<StatusCode, ApiError> {
    if state.registry.update_temperature(&bot_name, new_temp).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("unknown bot: {}", bot_name)))
    }
}

async fn add_transaction(
    State(state): State<AppState>,
    Path((bot_name, quantity)): Path<(String, i64)>,
) -> StatusCode {
    state.ledger.record(&bot_name, quantity).await;
    StatusCode::NO_CONTENT
}
