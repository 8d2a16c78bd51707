use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use shared::utils::upload;

use crate::{
    config::AppState,
    domain::user::{RejectVerificationRequest, UserResponse, VerificationStatus},
    error::{AppError, AppResult},
    middleware::auth::{AuthAdmin, AuthUser},
    repositories::user_repo,
};

/// Response upload KTP
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadKtpResponse {
    #[schema(example = "Dokumen KTP berhasil diunggah, menunggu verifikasi admin")]
    pub message: String,
    #[schema(example = "/uploads/ktp/ktp-1724500000000-12345.jpg")]
    pub ktp_image_url: String,
}

// Baca field file "ktp" dari multipart form. Validasi tipe dan ukuran
// dilakukan sebelum ada byte yang menyentuh disk.
async fn read_ktp_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("ktp") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::validation("Content-Type file tidak ditemukan"))?
            .to_string();
        upload::validate_image_type(&content_type).map_err(AppError::Validation)?;

        let original_name = field.file_name().unwrap_or("ktp.jpg").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Gagal membaca file: {}", e)))?;
        upload::validate_file_size(data.len()).map_err(AppError::Validation)?;

        return Ok((original_name, data.to_vec()));
    }

    Err(AppError::validation("Field file 'ktp' tidak ditemukan"))
}

/// Upload dokumen KTP (JPEG/PNG/JPG, maksimal 5MB), status verifikasi jadi pending
#[utoipa::path(
    post,
    path = "/api/users/me/ktp",
    tag = "Verification",
    security(("bearer_auth" = [])),
    request_body(content = String, description = "Multipart form dengan field file 'ktp'", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "KTP berhasil diunggah", body = UploadKtpResponse),
        (status = 400, description = "File bukan JPEG/PNG/JPG atau melebihi 5MB"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_ktp(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadKtpResponse>> {
    let (original_name, data) = read_ktp_field(&mut multipart).await?;

    let filename = upload::generate_filename("ktp", &original_name);
    let url = upload::save_to_disk(&state.config.upload_dir, "ktp", &filename, &data)
        .await
        .map_err(|e| AppError::internal(format!("Gagal menyimpan file KTP: {}", e)))?;

    user_repo::set_ktp_pending(&state.db, auth.user_id, &url)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    tracing::info!("User {} mengunggah KTP: {}", auth.user_id, url);

    Ok(Json(UploadKtpResponse {
        message: "Dokumen KTP berhasil diunggah, menunggu verifikasi admin".to_string(),
        ktp_image_url: url,
    }))
}

/// Daftar user yang menunggu verifikasi (admin)
#[utoipa::path(
    get,
    path = "/api/verifications/pending",
    tag = "Verification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daftar user pending", body = [UserResponse]),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn get_pending_verifications(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user_repo::find_pending_verifications(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Setujui verifikasi user (admin)
#[utoipa::path(
    post,
    path = "/api/verifications/{user_id}/approve",
    tag = "Verification",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "ID user")),
    responses(
        (status = 200, description = "Verifikasi disetujui", body = UserResponse),
        (status = 400, description = "User belum mengunggah KTP"),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn approve_verification(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(user_id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let target = user_repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    if target.verification_status == VerificationStatus::NotVerified.as_str() {
        return Err(AppError::bad_request("User belum mengunggah dokumen KTP"));
    }

    let user = user_repo::approve_verification(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    tracing::info!("Admin {} menyetujui verifikasi user {}", admin.user_id, user_id);

    Ok(Json(UserResponse::from(user)))
}

/// Tolak verifikasi user dengan alasan wajib (admin)
#[utoipa::path(
    post,
    path = "/api/verifications/{user_id}/reject",
    tag = "Verification",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "ID user")),
    request_body = RejectVerificationRequest,
    responses(
        (status = 200, description = "Verifikasi ditolak", body = UserResponse),
        (status = 400, description = "Alasan penolakan tidak diisi"),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn reject_verification(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(user_id): Path<i32>,
    Json(req): Json<RejectVerificationRequest>,
) -> AppResult<Json<UserResponse>> {
    let alasan = req
        .alasan
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("Alasan penolakan wajib diisi"))?;

    let user = user_repo::reject_verification(&state.db, user_id, alasan)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    tracing::info!("Admin {} menolak verifikasi user {}", admin.user_id, user_id);

    Ok(Json(UserResponse::from(user)))
}
