use sqlx::PgPool;

use crate::{
    domain::user::{RegisterRequest, UpdateUserRequest, User, VerificationStatus},
    error::AppError,
};

// Ambil semua user, terbaru lebih dulu
pub async fn find_all(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

// Ambil user by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

// Ambil user by email (lookup login dan cek duplikat registrasi)
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

// Buat user baru dari data registrasi yang sudah divalidasi + password hash
pub async fn create(
    pool: &PgPool,
    payload: &RegisterRequest,
    password_hash: &str,
    normalized_phone: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as(
        "INSERT INTO users (
            jenis_akun, nama_lengkap, email, password_hash, nomor_telepon,
            alamat, nama_bank, nomor_rekening, nama_pemilik_rekening
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *",
    )
    .bind(&payload.jenis_akun)
    .bind(payload.nama_lengkap.trim())
    .bind(payload.email.trim().to_lowercase())
    .bind(password_hash)
    .bind(normalized_phone)
    .bind(payload.alamat.trim())
    .bind(payload.nama_bank.trim())
    .bind(payload.nomor_rekening.trim())
    .bind(payload.nama_pemilik_rekening.trim())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

// Update profil user dengan allow-list field (COALESCE: None = tidak berubah)
pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &UpdateUserRequest,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        "UPDATE users SET
            nama_lengkap = COALESCE($2, nama_lengkap),
            nomor_telepon = COALESCE($3, nomor_telepon),
            alamat = COALESCE($4, alamat),
            nama_bank = COALESCE($5, nama_bank),
            nomor_rekening = COALESCE($6, nomor_rekening),
            nama_pemilik_rekening = COALESCE($7, nama_pemilik_rekening),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&payload.nama_lengkap)
    .bind(&payload.nomor_telepon)
    .bind(&payload.alamat)
    .bind(&payload.nama_bank)
    .bind(&payload.nomor_rekening)
    .bind(&payload.nama_pemilik_rekening)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

// Hapus user by ID, return true kalau ada baris yang terhapus
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Daftar user yang menunggu verifikasi KTP
pub async fn find_pending_verifications(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as(
        "SELECT * FROM users WHERE verification_status = $1 ORDER BY updated_at ASC",
    )
    .bind(VerificationStatus::Pending.as_str())
    .fetch_all(pool)
    .await?;

    Ok(users)
}

// Simpan URL KTP dan set status verifikasi ke pending
pub async fn set_ktp_pending(
    pool: &PgPool,
    user_id: i32,
    ktp_image_url: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        "UPDATE users SET
            ktp_image_url = $2,
            verification_status = $3,
            rejection_reason = NULL,
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(user_id)
    .bind(ktp_image_url)
    .bind(VerificationStatus::Pending.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

// Admin menyetujui verifikasi user
pub async fn approve_verification(pool: &PgPool, user_id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        "UPDATE users SET
            verification_status = $2,
            rejection_reason = NULL,
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(user_id)
    .bind(VerificationStatus::Approved.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

// Admin menolak verifikasi user dengan alasan
pub async fn reject_verification(
    pool: &PgPool,
    user_id: i32,
    alasan: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as(
        "UPDATE users SET
            verification_status = $2,
            rejection_reason = $3,
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(user_id)
    .bind(VerificationStatus::Rejected.as_str())
    .bind(alasan)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
