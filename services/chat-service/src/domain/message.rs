use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Pesan di dalam thread percakapan
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Message {
    pub id: i32,
    pub conversation_id: i32,
    pub sender_id: i32,
    pub content: String,
    pub message_type: String,
    pub media_url: Option<String>,
    pub stok_id: Option<i32>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Jenis pesan yang didukung
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Image,
    File,
    /// Pesan tanya produk, membawa referensi stok
    ProductInquiry,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::File => "file",
            MessageType::ProductInquiry => "product_inquiry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(MessageType::Text),
            "image" => Some(MessageType::Image),
            "file" => Some(MessageType::File),
            "product_inquiry" => Some(MessageType::ProductInquiry),
            _ => None,
        }
    }
}

// Kirim pesan. message_type default "text".
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Isi pesan 1 sampai 2000 karakter"))]
    #[schema(example = "Apakah stok Kandang Blitar 1 masih tersedia?")]
    pub content: String,
    #[schema(example = "text")]
    pub message_type: Option<String>,
    pub media_url: Option<String>,
    pub stok_id: Option<i32>,
}

impl SendMessageRequest {
    // Tipe pesan valid plus field pendampingnya:
    // image/file butuh media_url, product_inquiry butuh stok_id
    pub fn resolve_type(&self) -> Result<MessageType, String> {
        let message_type = match self.message_type.as_deref() {
            None => MessageType::Text,
            Some(s) => MessageType::from_str(s).ok_or_else(|| {
                "Tipe pesan harus 'text', 'image', 'file', atau 'product_inquiry'".to_string()
            })?,
        };

        match message_type {
            MessageType::Image | MessageType::File if self.media_url.is_none() => {
                Err("Pesan media membutuhkan media_url".to_string())
            }
            MessageType::ProductInquiry if self.stok_id.is_none() => {
                Err("Pesan tanya produk membutuhkan stok_id".to_string())
            }
            _ => Ok(message_type),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadAttachmentResponse {
    #[schema(example = "Lampiran berhasil diunggah")]
    pub message: String,
    #[schema(example = "/uploads/chat/chat-1724500000000-12345.jpg")]
    pub media_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        message_type: Option<&str>,
        media_url: Option<&str>,
        stok_id: Option<i32>,
    ) -> SendMessageRequest {
        SendMessageRequest {
            content: "Halo".to_string(),
            message_type: message_type.map(str::to_string),
            media_url: media_url.map(str::to_string),
            stok_id,
        }
    }

    #[test]
    fn test_message_type_roundtrip() {
        for message_type in [
            MessageType::Text,
            MessageType::Image,
            MessageType::File,
            MessageType::ProductInquiry,
        ] {
            assert_eq!(
                MessageType::from_str(message_type.as_str()),
                Some(message_type)
            );
        }
        assert_eq!(MessageType::from_str("video"), None);
    }

    #[test]
    fn test_resolve_type_defaults_to_text() {
        assert_eq!(
            request(None, None, None).resolve_type(),
            Ok(MessageType::Text)
        );
    }

    #[test]
    fn test_media_message_requires_url() {
        assert!(request(Some("image"), None, None).resolve_type().is_err());
        assert_eq!(
            request(Some("image"), Some("/uploads/chat/a.jpg"), None).resolve_type(),
            Ok(MessageType::Image)
        );
        assert!(request(Some("file"), None, None).resolve_type().is_err());
    }

    #[test]
    fn test_product_inquiry_requires_stok_id() {
        assert!(request(Some("product_inquiry"), None, None)
            .resolve_type()
            .is_err());
        assert_eq!(
            request(Some("product_inquiry"), None, Some(7)).resolve_type(),
            Ok(MessageType::ProductInquiry)
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(request(Some("video"), None, None).resolve_type().is_err());
    }

    #[test]
    fn test_content_length_bounds() {
        let mut req = request(None, None, None);

        req.content = "a".repeat(2000);
        assert!(req.validate().is_ok());

        req.content = "a".repeat(2001);
        assert!(req.validate().is_err());

        req.content = String::new();
        assert!(req.validate().is_err());
    }
}
