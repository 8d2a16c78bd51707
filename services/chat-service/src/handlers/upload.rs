use axum::{
    extract::{Multipart, State},
    Json,
};

use shared::utils::upload;

use crate::{
    config::AppState,
    domain::message::UploadAttachmentResponse,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
};

// Baca field file "file" dari multipart form, validasi sebelum tulis disk.
// Lampiran chat boleh gambar atau PDF.
async fn read_attachment_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::validation("Content-Type file tidak ditemukan"))?
            .to_string();
        upload::validate_chat_file_type(&content_type).map_err(AppError::Validation)?;

        let original_name = field.file_name().unwrap_or("lampiran").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Gagal membaca file: {}", e)))?;
        upload::validate_file_size(data.len()).map_err(AppError::Validation)?;

        return Ok((original_name, data.to_vec()));
    }

    Err(AppError::validation("Field file 'file' tidak ditemukan"))
}

/// Upload lampiran chat (JPEG/PNG/JPG/PDF, maksimal 5MB).
/// URL hasil dipakai sebagai media_url saat kirim pesan image/file.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Messages",
    security(("bearer_auth" = [])),
    request_body(content = String, description = "Multipart form dengan field file 'file'", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Lampiran tersimpan", body = UploadAttachmentResponse),
        (status = 400, description = "File bukan gambar/PDF atau melebihi 5MB"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_attachment(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadAttachmentResponse>> {
    let (original_name, data) = read_attachment_field(&mut multipart).await?;

    let filename = upload::generate_filename("chat", &original_name);
    let url = upload::save_to_disk(&state.config.upload_dir, "chat", &filename, &data)
        .await
        .map_err(|e| AppError::internal(format!("Gagal menyimpan lampiran: {}", e)))?;

    tracing::info!("User {} mengunggah lampiran chat: {}", auth.user_id, url);

    Ok(Json(UploadAttachmentResponse {
        message: "Lampiran berhasil diunggah".to_string(),
        media_url: url,
    }))
}
