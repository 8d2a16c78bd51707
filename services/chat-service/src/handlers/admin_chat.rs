use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    config::AppState,
    domain::{
        conversation::ConversationSummary,
        message::{Message, SendMessageRequest},
    },
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthAdmin,
    repositories::{conversation_repo, message_repo},
};

/// Inbox admin: semua thread dengan pesan terakhir dan jumlah belum dibaca
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "Admin Chat",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daftar thread", body = [ConversationSummary]),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<Vec<ConversationSummary>>> {
    let summaries = conversation_repo::list_summaries(&state.db).await?;

    Ok(Json(summaries))
}

/// Isi thread percakapan seorang user (admin)
#[utoipa::path(
    get,
    path = "/api/conversations/{user_id}/messages",
    tag = "Admin Chat",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "ID user pemilik thread")),
    responses(
        (status = 200, description = "Isi percakapan", body = [Message]),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn get_user_messages(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<Message>>> {
    if !conversation_repo::user_exists(&state.db, user_id).await? {
        return Err(AppError::not_found("User Tidak Ditemukan"));
    }

    let conversation = conversation_repo::get_or_create(&state.db, user_id).await?;
    let messages = message_repo::list(&state.db, conversation.id).await?;

    Ok(Json(messages))
}

/// Balas thread seorang user (admin)
#[utoipa::path(
    post,
    path = "/api/conversations/{user_id}/messages",
    tag = "Admin Chat",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "ID user pemilik thread")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Balasan terkirim", body = Message),
        (status = 400, description = "Payload tidak valid"),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn reply_to_user(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(user_id): Path<i32>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let message_type = req.resolve_type().map_err(AppError::Validation)?;

    if !conversation_repo::user_exists(&state.db, user_id).await? {
        return Err(AppError::not_found("User Tidak Ditemukan"));
    }

    let conversation = conversation_repo::get_or_create(&state.db, user_id).await?;
    let message = message_repo::create(
        &state.db,
        conversation.id,
        admin.user_id,
        req.content.trim(),
        message_type,
        req.media_url.as_deref(),
        req.stok_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Tandai pesan user di satu thread sebagai sudah dibaca (admin)
#[utoipa::path(
    post,
    path = "/api/conversations/{user_id}/read",
    tag = "Admin Chat",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "ID user pemilik thread")),
    responses(
        (status = 200, description = "Pesan ditandai terbaca", body = MessageResponse),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn mark_thread_read(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(user_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    if !conversation_repo::user_exists(&state.db, user_id).await? {
        return Err(AppError::not_found("User Tidak Ditemukan"));
    }

    let conversation = conversation_repo::get_or_create(&state.db, user_id).await?;
    let updated = message_repo::mark_read(&state.db, conversation.id, admin.user_id).await?;

    Ok(Json(MessageResponse {
        message: format!("{} pesan ditandai terbaca", updated),
    }))
}
