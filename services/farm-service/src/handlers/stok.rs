use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    config::AppState,
    domain::stok::{CreateStokRequest, Stok, UpdateStokRequest},
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthAdmin,
    repositories::stok_repo,
};

/// Daftar semua stok ayam (publik, untuk katalog pembeli)
#[utoipa::path(
    get,
    path = "/api/stok",
    tag = "Stok",
    responses(
        (status = 200, description = "Daftar stok", body = [Stok])
    )
)]
pub async fn get_stok(State(state): State<AppState>) -> AppResult<Json<Vec<Stok>>> {
    let stok = stok_repo::find_all(&state.db).await?;

    Ok(Json(stok))
}

/// Detail satu stok by ID (publik)
#[utoipa::path(
    get,
    path = "/api/stok/{id}",
    tag = "Stok",
    params(("id" = i32, Path, description = "ID stok")),
    responses(
        (status = 200, description = "Detail stok", body = Stok),
        (status = 404, description = "Stok tidak ditemukan")
    )
)]
pub async fn get_stok_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Stok>> {
    let stok = stok_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Stok Tidak Ditemukan"))?;

    Ok(Json(stok))
}

/// Buat stok baru (admin)
#[utoipa::path(
    post,
    path = "/api/stok",
    tag = "Stok",
    security(("bearer_auth" = [])),
    request_body = CreateStokRequest,
    responses(
        (status = 201, description = "Stok berhasil dibuat", body = Stok),
        (status = 400, description = "Payload tidak valid"),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn create_stok(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Json(req): Json<CreateStokRequest>,
) -> AppResult<(StatusCode, Json<Stok>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    req.validate_enums().map_err(AppError::Validation)?;

    let stok = stok_repo::create(&state.db, &req).await?;

    tracing::info!(stok_id = stok.id, "Stok baru dibuat");

    Ok((StatusCode::CREATED, Json(stok)))
}

/// Update stok by ID (admin)
#[utoipa::path(
    patch,
    path = "/api/stok/{id}",
    tag = "Stok",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID stok")),
    request_body = UpdateStokRequest,
    responses(
        (status = 200, description = "Stok berhasil diupdate", body = Stok),
        (status = 400, description = "Payload tidak valid"),
        (status = 404, description = "Stok tidak ditemukan")
    )
)]
pub async fn update_stok(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStokRequest>,
) -> AppResult<Json<Stok>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    req.validate_enums().map_err(AppError::Validation)?;

    let stok = stok_repo::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Stok Tidak Ditemukan"))?;

    Ok(Json(stok))
}

/// Hapus stok by ID (admin)
#[utoipa::path(
    delete,
    path = "/api/stok/{id}",
    tag = "Stok",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID stok")),
    responses(
        (status = 200, description = "Stok berhasil dihapus", body = MessageResponse),
        (status = 404, description = "Stok tidak ditemukan")
    )
)]
pub async fn delete_stok(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = stok_repo::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::not_found("Stok Tidak Ditemukan"));
    }

    Ok(Json(MessageResponse {
        message: "Stok berhasil dihapus".to_string(),
    }))
}
