use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

// Satu thread percakapan per user dengan tim support
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Conversation {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

// Ringkasan thread untuk inbox admin: pesan terakhir + jumlah belum dibaca
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ConversationSummary {
    pub id: i32,
    pub user_id: i32,
    pub nama_lengkap: String,
    pub last_message_at: DateTime<Utc>,
    pub last_message: Option<String>,
    pub unread_count: i64,
}
