use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use shared::utils::{jwt, validation};

use crate::{
    config::AppState,
    domain::user::{JenisAkun, LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    repositories::user_repo,
    utils::hash,
};

/// Response dengan message sukses
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Operasi berhasil")]
    pub message: String,
}

// Validasi payload registrasi sebelum menyentuh database
fn validate_register_payload(req: &RegisterRequest) -> Result<(), AppError> {
    // Admin tidak bisa didaftarkan lewat endpoint publik
    match JenisAkun::from_str(&req.jenis_akun) {
        Some(JenisAkun::Pembeli) | Some(JenisAkun::Peternak) => {}
        Some(JenisAkun::Admin) => {
            return Err(AppError::validation(
                "Akun Admin tidak bisa didaftarkan lewat registrasi",
            ))
        }
        None => {
            return Err(AppError::validation(
                "Jenis akun harus Pembeli atau Peternak",
            ))
        }
    }

    validation::validate_email(&req.email).map_err(AppError::Validation)?;
    validation::validate_password(&req.password).map_err(AppError::Validation)?;
    validation::validate_phone(&req.nomor_telepon).map_err(AppError::Validation)?;

    validation::validate_required(&req.nama_lengkap, "Nama lengkap").map_err(AppError::Validation)?;
    validation::validate_required(&req.alamat, "Alamat").map_err(AppError::Validation)?;
    validation::validate_required(&req.nama_bank, "Nama bank").map_err(AppError::Validation)?;
    validation::validate_required(&req.nomor_rekening, "Nomor rekening")
        .map_err(AppError::Validation)?;
    validation::validate_required(&req.nama_pemilik_rekening, "Nama pemilik rekening")
        .map_err(AppError::Validation)?;

    Ok(())
}

/// Registrasi user baru (Pembeli atau Peternak)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User berhasil didaftarkan", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email sudah terdaftar")
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_register_payload(&req)?;

    // Cek apakah email sudah terdaftar
    let email = req.email.trim().to_lowercase();
    if user_repo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::conflict("Email sudah terdaftar"));
    }

    // Hash password
    let password_hash = hash::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Gagal hash password: {}", e)))?;

    let normalized_phone = validation::normalize_phone(&req.nomor_telepon);
    let user = user_repo::create(&state.db, &req, &password_hash, &normalized_phone).await?;

    tracing::info!("User baru terdaftar: {} ({})", user.email, user.jenis_akun);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login dengan email dan password, return token berlaku 1 hari
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login berhasil", body = LoginResponse),
        (status = 400, description = "Password salah"),
        (status = 404, description = "User tidak ditemukan")
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Cek user terdaftar
    let user = user_repo::find_by_email(&state.db, &req.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    // Cek password
    let is_valid = hash::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Gagal verifikasi password: {}", e)))?;

    if !is_valid {
        return Err(AppError::bad_request("Password Salah"));
    }

    let token = jwt::generate_token(user.id, &user.email, &user.jenis_akun, &state.config.jwt_secret)
        .map_err(|e| AppError::internal(format!("Gagal membuat token: {}", e)))?;

    tracing::info!("Login berhasil: {}", user.email);

    Ok(Json(LoginResponse {
        message: "Login Berhasil".to_string(),
        token,
        user: UserResponse::from(user),
    }))
}

/// Profil user yang sedang login
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profil user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = user_repo::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    Ok(Json(UserResponse::from(user)))
}
