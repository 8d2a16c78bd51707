use sqlx::PgPool;

use crate::{
    domain::cart::{CartItem, CartItemView},
    error::AppError,
};

const CART_VIEW_SQL: &str = "SELECT ci.id, ci.stok_id, ci.jumlah,
        s.nama_kandang, s.ukuran, s.metode_jual, s.harga_satuan, s.stok_tersisa,
        (s.stok_tersisa >= ci.jumlah) AS tersedia,
        (s.harga_satuan * ci.jumlah) AS subtotal
     FROM cart_items ci
     JOIN stok s ON s.id = ci.stok_id
     WHERE ci.user_id = $1
     ORDER BY ci.created_at ASC";

// Isi keranjang user, di-join dengan stok live
pub async fn find_views(pool: &PgPool, user_id: i32) -> Result<Vec<CartItemView>, AppError> {
    let items = sqlx::query_as(CART_VIEW_SQL)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(items)
}

pub async fn stok_exists(pool: &PgPool, stok_id: i32) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stok WHERE id = $1)")
        .bind(stok_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

// Tambah item ke keranjang. Kalau stok yang sama sudah ada, jumlahnya ditambah.
pub async fn add(
    pool: &PgPool,
    user_id: i32,
    stok_id: i32,
    jumlah: i32,
) -> Result<CartItem, AppError> {
    let item = sqlx::query_as(
        "INSERT INTO cart_items (user_id, stok_id, jumlah)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id, stok_id)
         DO UPDATE SET jumlah = cart_items.jumlah + EXCLUDED.jumlah, updated_at = NOW()
         RETURNING *",
    )
    .bind(user_id)
    .bind(stok_id)
    .bind(jumlah)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

// Set jumlah satu baris keranjang
pub async fn set_jumlah(
    pool: &PgPool,
    user_id: i32,
    stok_id: i32,
    jumlah: i32,
) -> Result<Option<CartItem>, AppError> {
    let item = sqlx::query_as(
        "UPDATE cart_items SET jumlah = $3, updated_at = NOW()
         WHERE user_id = $1 AND stok_id = $2
         RETURNING *",
    )
    .bind(user_id)
    .bind(stok_id)
    .bind(jumlah)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn remove(pool: &PgPool, user_id: i32, stok_id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND stok_id = $2")
        .bind(user_id)
        .bind(stok_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn clear(pool: &PgPool, user_id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
