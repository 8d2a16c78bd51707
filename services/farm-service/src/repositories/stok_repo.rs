use sqlx::PgPool;

use crate::{
    domain::stok::{CreateStokRequest, Stok, UpdateStokRequest},
    error::AppError,
};

// Ambil semua stok, terbaru dulu
pub async fn find_all(pool: &PgPool) -> Result<Vec<Stok>, AppError> {
    let stok = sqlx::query_as("SELECT * FROM stok ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(stok)
}

// Ambil stok by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Stok>, AppError> {
    let stok = sqlx::query_as("SELECT * FROM stok WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(stok)
}

// Buat stok baru, stok_tersisa mulai dari stok_awal
pub async fn create(pool: &PgPool, payload: &CreateStokRequest) -> Result<Stok, AppError> {
    let stok = sqlx::query_as(
        "INSERT INTO stok (nama_kandang, deskripsi, alamat_lengkap, ukuran,
                           stok_awal, stok_tersisa, metode_jual, harga_satuan, kondisi)
         VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(payload.nama_kandang.trim())
    .bind(payload.deskripsi.trim())
    .bind(payload.alamat_lengkap.trim())
    .bind(payload.ukuran.trim())
    .bind(payload.stok_awal)
    .bind(&payload.metode_jual)
    .bind(payload.harga_satuan)
    .bind(&payload.kondisi)
    .fetch_one(pool)
    .await?;

    Ok(stok)
}

// Update stok by ID. stok_tersisa bergeser mengikuti delta stok_awal
// (RHS UPDATE di Postgres membaca nilai lama), dan tidak pernah negatif.
pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &UpdateStokRequest,
) -> Result<Option<Stok>, AppError> {
    let stok = sqlx::query_as(
        "UPDATE stok SET
            nama_kandang = COALESCE($2, nama_kandang),
            deskripsi = COALESCE($3, deskripsi),
            alamat_lengkap = COALESCE($4, alamat_lengkap),
            ukuran = COALESCE($5, ukuran),
            stok_tersisa = GREATEST(0, stok_tersisa + COALESCE($6, stok_awal) - stok_awal),
            stok_awal = COALESCE($6, stok_awal),
            metode_jual = COALESCE($7, metode_jual),
            harga_satuan = COALESCE($8, harga_satuan),
            kondisi = COALESCE($9, kondisi),
            updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&payload.nama_kandang)
    .bind(&payload.deskripsi)
    .bind(&payload.alamat_lengkap)
    .bind(&payload.ukuran)
    .bind(payload.stok_awal)
    .bind(&payload.metode_jual)
    .bind(payload.harga_satuan)
    .bind(&payload.kondisi)
    .fetch_optional(pool)
    .await?;

    Ok(stok)
}

// Hapus stok by ID
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM stok WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
