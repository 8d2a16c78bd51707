use sqlx::PgPool;

use crate::{
    domain::kandang::{CreateKandangRequest, Kandang, UpdateKandangRequest},
    error::AppError,
};

// Ambil semua kandang
pub async fn find_all(pool: &PgPool) -> Result<Vec<Kandang>, AppError> {
    let kandang = sqlx::query_as("SELECT * FROM kandang ORDER BY nama_kandang ASC")
        .fetch_all(pool)
        .await?;

    Ok(kandang)
}

// Buat kandang baru
pub async fn create(pool: &PgPool, payload: &CreateKandangRequest) -> Result<Kandang, AppError> {
    let kandang = sqlx::query_as(
        "INSERT INTO kandang (nama_kandang, alamat, kapasitas, kontak_nama, kontak_nomor_telepon)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(payload.nama_kandang.trim())
    .bind(payload.alamat.trim())
    .bind(payload.kapasitas)
    .bind(payload.kontak_nama.trim())
    .bind(payload.kontak_nomor_telepon.trim())
    .fetch_one(pool)
    .await?;

    Ok(kandang)
}

// Update kandang by ID (COALESCE: None = tidak berubah)
pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &UpdateKandangRequest,
) -> Result<Option<Kandang>, AppError> {
    let kandang = sqlx::query_as(
        "UPDATE kandang SET
            nama_kandang = COALESCE($2, nama_kandang),
            alamat = COALESCE($3, alamat),
            kapasitas = COALESCE($4, kapasitas),
            kontak_nama = COALESCE($5, kontak_nama),
            kontak_nomor_telepon = COALESCE($6, kontak_nomor_telepon),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&payload.nama_kandang)
    .bind(&payload.alamat)
    .bind(payload.kapasitas)
    .bind(&payload.kontak_nama)
    .bind(&payload.kontak_nomor_telepon)
    .fetch_optional(pool)
    .await?;

    Ok(kandang)
}

// Hapus kandang by ID
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM kandang WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
