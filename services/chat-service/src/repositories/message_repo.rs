use sqlx::PgPool;

use crate::{
    domain::message::{Message, MessageType},
    error::AppError,
};

// Simpan pesan dan geser last_message_at thread, dalam satu transaksi
pub async fn create(
    pool: &PgPool,
    conversation_id: i32,
    sender_id: i32,
    content: &str,
    message_type: MessageType,
    media_url: Option<&str>,
    stok_id: Option<i32>,
) -> Result<Message, AppError> {
    let mut tx = pool.begin().await?;

    let message: Message = sqlx::query_as(
        "INSERT INTO messages (conversation_id, sender_id, content, message_type, media_url, stok_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(conversation_id)
    .bind(sender_id)
    .bind(content)
    .bind(message_type.as_str())
    .bind(media_url)
    .bind(stok_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE conversations SET last_message_at = NOW() WHERE id = $1")
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(message)
}

// Semua pesan satu thread, urut kronologis
pub async fn list(pool: &PgPool, conversation_id: i32) -> Result<Vec<Message>, AppError> {
    let messages = sqlx::query_as(
        "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC",
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

// Tandai pesan lawan bicara sebagai sudah dibaca
pub async fn mark_read(
    pool: &PgPool,
    conversation_id: i32,
    reader_id: i32,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        "UPDATE messages SET is_read = TRUE, read_at = NOW()
         WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE",
    )
    .bind(conversation_id)
    .bind(reader_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
