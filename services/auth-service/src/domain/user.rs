use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Model utama User dari database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub jenis_akun: String,
    pub nama_lengkap: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nomor_telepon: String,
    pub alamat: String,
    pub nama_bank: String,
    pub nomor_rekening: String,
    pub nama_pemilik_rekening: String,
    pub verification_status: String,
    pub ktp_image_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Enum jenis akun user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JenisAkun {
    Pembeli,
    Peternak,
    Admin,
}

impl JenisAkun {
    pub fn as_str(&self) -> &'static str {
        match self {
            JenisAkun::Pembeli => "Pembeli",
            JenisAkun::Peternak => "Peternak",
            JenisAkun::Admin => "Admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pembeli" => Some(JenisAkun::Pembeli),
            "Peternak" => Some(JenisAkun::Peternak),
            "Admin" => Some(JenisAkun::Admin),
            _ => None,
        }
    }
}

// Enum status verifikasi dokumen KTP
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VerificationStatus {
    NotVerified,
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::NotVerified => "not_verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_verified" => Some(VerificationStatus::NotVerified),
            "pending" => Some(VerificationStatus::Pending),
            "approved" => Some(VerificationStatus::Approved),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

// Request untuk registrasi user baru
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Pembeli")]
    pub jenis_akun: String,
    #[schema(example = "Budi Santoso")]
    pub nama_lengkap: String,
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[schema(example = "rahasia123")]
    pub password: String,
    #[schema(example = "081234567890")]
    pub nomor_telepon: String,
    #[schema(example = "Jl. Raya Pitik No. 7, Blitar")]
    pub alamat: String,
    #[schema(example = "BCA")]
    pub nama_bank: String,
    #[schema(example = "1234567890")]
    pub nomor_rekening: String,
    #[schema(example = "Budi Santoso")]
    pub nama_pemilik_rekening: String,
}

// Request untuk login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[schema(example = "rahasia123")]
    pub password: String,
}

// Request update user oleh admin. Field verifikasi sengaja tidak ada di sini,
// hanya bisa diubah lewat endpoint verifikasi.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub nama_lengkap: Option<String>,
    pub nomor_telepon: Option<String>,
    pub alamat: Option<String>,
    pub nama_bank: Option<String>,
    pub nomor_rekening: Option<String>,
    pub nama_pemilik_rekening: Option<String>,
}

// Request penolakan verifikasi
#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectVerificationRequest {
    #[schema(example = "Foto KTP buram, harap unggah ulang")]
    pub alasan: Option<String>,
}

// Proyeksi user tanpa field sensitif untuk response API
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub jenis_akun: String,
    pub nama_lengkap: String,
    pub email: String,
    pub nomor_telepon: String,
    pub alamat: String,
    pub nama_bank: String,
    pub nomor_rekening: String,
    pub nama_pemilik_rekening: String,
    pub verification_status: String,
    pub ktp_image_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            jenis_akun: user.jenis_akun,
            nama_lengkap: user.nama_lengkap,
            email: user.email,
            nomor_telepon: user.nomor_telepon,
            alamat: user.alamat,
            nama_bank: user.nama_bank,
            nomor_rekening: user.nomor_rekening,
            nama_pemilik_rekening: user.nama_pemilik_rekening,
            verification_status: user.verification_status,
            ktp_image_url: user.ktp_image_url,
            rejection_reason: user.rejection_reason,
            created_at: user.created_at,
        }
    }
}

// Response login dengan token dan proyeksi user
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login Berhasil")]
    pub message: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIs...")]
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jenis_akun_roundtrip() {
        for jenis in [JenisAkun::Pembeli, JenisAkun::Peternak, JenisAkun::Admin] {
            assert_eq!(JenisAkun::from_str(jenis.as_str()), Some(jenis));
        }
        assert_eq!(JenisAkun::from_str("pembeli"), None);
        assert_eq!(JenisAkun::from_str("Penjual"), None);
    }

    #[test]
    fn test_verification_status_roundtrip() {
        for status in [
            VerificationStatus::NotVerified,
            VerificationStatus::Pending,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(VerificationStatus::from_str("disetujui"), None);
    }
}
