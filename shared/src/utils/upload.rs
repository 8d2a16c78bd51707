use std::path::{Path, PathBuf};

use rand::Rng;

/// Batas ukuran file upload: 5MB
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Tipe gambar yang diterima untuk dokumen KTP dan bukti pembayaran
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Tipe file yang diterima untuk lampiran chat (gambar + dokumen PDF)
pub const ALLOWED_CHAT_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "application/pdf"];

/// Kategori file hasil validasi upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Document,
}

/// Validasi tipe gambar (JPEG/PNG/JPG saja), dijalankan SEBELUM menulis ke disk
pub fn validate_image_type(content_type: &str) -> Result<(), String> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err("Hanya File Berformat JPEG, PNG, JPG yang diizinkan!".to_string())
    }
}

/// Validasi tipe lampiran chat
pub fn validate_chat_file_type(content_type: &str) -> Result<FileCategory, String> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Ok(FileCategory::Image)
    } else if content_type == "application/pdf" {
        Ok(FileCategory::Document)
    } else {
        Err(format!(
            "Tipe file tidak diizinkan: {}. Gunakan JPEG, PNG, JPG, atau PDF",
            content_type
        ))
    }
}

/// Validasi ukuran file terhadap batas 5MB
pub fn validate_file_size(size: usize) -> Result<(), String> {
    if size == 0 {
        return Err("File kosong".to_string());
    }
    if size > MAX_FILE_SIZE {
        return Err("Ukuran file melebihi batas 5MB".to_string());
    }
    Ok(())
}

/// Generate nama file unik: <prefix>-<timestamp>-<random><ext>
pub fn generate_filename(prefix: &str, original_name: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    format!("{}-{}-{}{}", prefix, timestamp, random, ext)
}

/// Simpan file ke disk di bawah direktori upload, return URL path publiknya.
/// Direktori dibuat kalau belum ada.
pub async fn save_to_disk(
    upload_root: &str,
    subdir: &str,
    filename: &str,
    data: &[u8],
) -> std::io::Result<String> {
    let dir: PathBuf = Path::new(upload_root).join(subdir);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(filename);
    tokio::fs::write(&path, data).await?;

    Ok(format!("/uploads/{}/{}", subdir, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_type() {
        assert!(validate_image_type("image/jpeg").is_ok());
        assert!(validate_image_type("image/png").is_ok());
        assert!(validate_image_type("image/jpg").is_ok());
        assert!(validate_image_type("image/gif").is_err());
        assert!(validate_image_type("application/pdf").is_err());
        assert!(validate_image_type("text/html").is_err());
    }

    #[test]
    fn test_validate_chat_file_type() {
        assert_eq!(
            validate_chat_file_type("image/png").unwrap(),
            FileCategory::Image
        );
        assert_eq!(
            validate_chat_file_type("application/pdf").unwrap(),
            FileCategory::Document
        );
        assert!(validate_chat_file_type("application/zip").is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(1024).is_ok());
        assert!(validate_file_size(MAX_FILE_SIZE).is_ok());
        assert!(validate_file_size(MAX_FILE_SIZE + 1).is_err());
        assert!(validate_file_size(0).is_err());
    }

    #[test]
    fn test_generate_filename_keeps_extension() {
        let name = generate_filename("ktp", "Foto KTP.JPG");
        assert!(name.starts_with("ktp-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_generate_filename_without_extension() {
        let name = generate_filename("bukti", "tanpa_ekstensi");
        assert!(name.starts_with("bukti-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generate_filename_unique() {
        let a = generate_filename("ktp", "a.png");
        let b = generate_filename("ktp", "a.png");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_save_to_disk_roundtrip() {
        let tmp = std::env::temp_dir().join("pitek-upload-test");
        let root = tmp.to_str().unwrap();
        let filename = generate_filename("ktp", "test.png");

        let url = save_to_disk(root, "ktp", &filename, b"isi-file")
            .await
            .expect("Gagal menyimpan file");

        assert_eq!(url, format!("/uploads/ktp/{}", filename));

        let written = tokio::fs::read(tmp.join("ktp").join(&filename))
            .await
            .expect("File tidak ditemukan");
        assert_eq!(written, b"isi-file");
    }
}
