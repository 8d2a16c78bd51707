use sqlx::PgPool;

use crate::{
    domain::conversation::{Conversation, ConversationSummary},
    error::AppError,
};

// Ambil thread milik user, buat kalau belum ada.
// ON CONFLICT DO UPDATE dipakai supaya RETURNING tetap mengembalikan baris.
pub async fn get_or_create(pool: &PgPool, user_id: i32) -> Result<Conversation, AppError> {
    let conversation = sqlx::query_as(
        "INSERT INTO conversations (user_id)
         VALUES ($1)
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
         RETURNING *",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(conversation)
}

// Inbox admin: semua thread dengan pesan terakhir dan jumlah pesan
// dari user yang belum dibaca, terbaru dulu.
pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ConversationSummary>, AppError> {
    let summaries = sqlx::query_as(
        "SELECT c.id, c.user_id, u.nama_lengkap, c.last_message_at,
                (SELECT m.content FROM messages m
                 WHERE m.conversation_id = c.id
                 ORDER BY m.created_at DESC LIMIT 1) AS last_message,
                (SELECT COUNT(*) FROM messages m
                 WHERE m.conversation_id = c.id
                   AND m.sender_id = c.user_id
                   AND m.is_read = FALSE) AS unread_count
         FROM conversations c
         JOIN users u ON u.id = c.user_id
         ORDER BY c.last_message_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries)
}

pub async fn user_exists(pool: &PgPool, user_id: i32) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}
