use axum::{
    extract::{Path, State},
    Json,
};

use shared::utils::validation;

use crate::{
    config::AppState,
    domain::user::{UpdateUserRequest, UserResponse},
    error::{AppError, AppResult},
    handlers::auth::MessageResponse,
    middleware::auth::AuthAdmin,
    repositories::user_repo,
};

/// Daftar semua user (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daftar user", body = [UserResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user_repo::find_all(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Update profil user by ID (admin)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID user")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User berhasil diupdate", body = UserResponse),
        (status = 400, description = "Payload tidak valid"),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    // Field yang dikirim tidak boleh kosong
    if let Some(nama) = &req.nama_lengkap {
        validation::validate_required(nama, "Nama lengkap").map_err(AppError::Validation)?;
    }
    if let Some(telepon) = &req.nomor_telepon {
        validation::validate_phone(telepon).map_err(AppError::Validation)?;
    }

    let user = user_repo::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Hapus user by ID (admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID user")),
    responses(
        (status = 200, description = "User berhasil dihapus", body = MessageResponse),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = user_repo::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::not_found("User Tidak Ditemukan"));
    }

    Ok(Json(MessageResponse {
        message: "User berhasil dihapus".to_string(),
    }))
}
