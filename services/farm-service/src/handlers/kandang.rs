use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    config::AppState,
    domain::kandang::{CreateKandangRequest, Kandang, UpdateKandangRequest},
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthAdmin,
    repositories::kandang_repo,
};

/// Daftar semua kandang (publik)
#[utoipa::path(
    get,
    path = "/api/kandang",
    tag = "Kandang",
    responses(
        (status = 200, description = "Daftar kandang", body = [Kandang])
    )
)]
pub async fn get_kandang(State(state): State<AppState>) -> AppResult<Json<Vec<Kandang>>> {
    let kandang = kandang_repo::find_all(&state.db).await?;

    Ok(Json(kandang))
}

/// Buat kandang baru (admin)
#[utoipa::path(
    post,
    path = "/api/kandang",
    tag = "Kandang",
    security(("bearer_auth" = [])),
    request_body = CreateKandangRequest,
    responses(
        (status = 201, description = "Kandang berhasil dibuat", body = Kandang),
        (status = 400, description = "Payload tidak valid"),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn create_kandang(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Json(req): Json<CreateKandangRequest>,
) -> AppResult<(StatusCode, Json<Kandang>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let kandang = kandang_repo::create(&state.db, &req).await?;

    tracing::info!(kandang_id = kandang.id, "Kandang baru dibuat");

    Ok((StatusCode::CREATED, Json(kandang)))
}

/// Update kandang by ID (admin)
#[utoipa::path(
    patch,
    path = "/api/kandang/{id}",
    tag = "Kandang",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID kandang")),
    request_body = UpdateKandangRequest,
    responses(
        (status = 200, description = "Kandang berhasil diupdate", body = Kandang),
        (status = 400, description = "Payload tidak valid"),
        (status = 404, description = "Kandang tidak ditemukan")
    )
)]
pub async fn update_kandang(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<UpdateKandangRequest>,
) -> AppResult<Json<Kandang>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let kandang = kandang_repo::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Kandang Tidak Ditemukan"))?;

    Ok(Json(kandang))
}

/// Hapus kandang by ID (admin)
#[utoipa::path(
    delete,
    path = "/api/kandang/{id}",
    tag = "Kandang",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID kandang")),
    responses(
        (status = 200, description = "Kandang berhasil dihapus", body = MessageResponse),
        (status = 404, description = "Kandang tidak ditemukan")
    )
)]
pub async fn delete_kandang(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = kandang_repo::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::not_found("Kandang Tidak Ditemukan"));
    }

    Ok(Json(MessageResponse {
        message: "Kandang berhasil dihapus".to_string(),
    }))
}
