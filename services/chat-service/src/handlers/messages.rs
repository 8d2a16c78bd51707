use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    config::AppState,
    domain::message::{Message, SendMessageRequest},
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthUser,
    repositories::{conversation_repo, message_repo},
};

// Thread support milik admin tidak ada, admin melayani lewat endpoint percakapan
fn ensure_not_admin(auth: &AuthUser) -> AppResult<()> {
    if auth.is_admin() {
        return Err(AppError::forbidden(
            "Admin memakai endpoint /api/conversations",
        ));
    }

    Ok(())
}

/// Isi thread percakapan user yang login, urut kronologis
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Isi percakapan", body = [Message]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_messages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Message>>> {
    ensure_not_admin(&auth)?;

    let conversation = conversation_repo::get_or_create(&state.db, auth.user_id).await?;
    let messages = message_repo::list(&state.db, conversation.id).await?;

    Ok(Json(messages))
}

/// Kirim pesan ke tim support
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Pesan terkirim", body = Message),
        (status = 400, description = "Payload tidak valid")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    ensure_not_admin(&auth)?;

    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let message_type = req.resolve_type().map_err(AppError::Validation)?;

    let conversation = conversation_repo::get_or_create(&state.db, auth.user_id).await?;
    let message = message_repo::create(
        &state.db,
        conversation.id,
        auth.user_id,
        req.content.trim(),
        message_type,
        req.media_url.as_deref(),
        req.stok_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Tandai balasan admin di thread sendiri sebagai sudah dibaca
#[utoipa::path(
    post,
    path = "/api/messages/read",
    tag = "Messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pesan ditandai terbaca", body = MessageResponse)
    )
)]
pub async fn mark_my_thread_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    ensure_not_admin(&auth)?;

    let conversation = conversation_repo::get_or_create(&state.db, auth.user_id).await?;
    let updated = message_repo::mark_read(&state.db, conversation.id, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: format!("{} pesan ditandai terbaca", updated),
    }))
}
