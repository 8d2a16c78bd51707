use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Model kandang (fasilitas peternakan pemasok stok)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Kandang {
    pub id: i32,
    pub nama_kandang: String,
    pub alamat: String,
    pub kapasitas: i32,
    pub kontak_nama: String,
    pub kontak_nomor_telepon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Request untuk membuat kandang baru (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateKandangRequest {
    #[validate(length(min = 1, message = "Nama kandang tidak boleh kosong"))]
    #[schema(example = "Kandang Blitar 1")]
    pub nama_kandang: String,
    #[validate(length(min = 1, message = "Alamat tidak boleh kosong"))]
    #[schema(example = "Jl. Peternakan No. 12, Blitar")]
    pub alamat: String,
    #[validate(range(min = 1, message = "Kapasitas minimal 1 ekor"))]
    #[schema(example = 5000)]
    pub kapasitas: i32,
    #[validate(length(min = 1, message = "Nama kontak tidak boleh kosong"))]
    #[schema(example = "Pak Slamet")]
    pub kontak_nama: String,
    #[validate(length(min = 8, message = "Nomor telepon kontak tidak valid"))]
    #[schema(example = "081234567890")]
    pub kontak_nomor_telepon: String,
}

// Request update kandang, semua field opsional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateKandangRequest {
    #[validate(length(min = 1, message = "Nama kandang tidak boleh kosong"))]
    pub nama_kandang: Option<String>,
    #[validate(length(min = 1, message = "Alamat tidak boleh kosong"))]
    pub alamat: Option<String>,
    #[validate(range(min = 1, message = "Kapasitas minimal 1 ekor"))]
    pub kapasitas: Option<i32>,
    pub kontak_nama: Option<String>,
    pub kontak_nomor_telepon: Option<String>,
}
