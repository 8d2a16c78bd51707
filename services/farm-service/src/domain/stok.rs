use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Model stok ayam broiler per kandang
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Stok {
    pub id: i32,
    pub nama_kandang: String,
    pub deskripsi: String,
    pub alamat_lengkap: String,
    pub ukuran: String,
    pub stok_awal: i32,
    pub stok_tersisa: i32,
    pub metode_jual: String,
    pub harga_satuan: f64,
    pub kondisi: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Enum metode jual stok
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetodeJual {
    PerKg,
    PerEkor,
}

impl MetodeJual {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetodeJual::PerKg => "Per Kg",
            MetodeJual::PerEkor => "Per Ekor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Per Kg" => Some(MetodeJual::PerKg),
            "Per Ekor" => Some(MetodeJual::PerEkor),
            _ => None,
        }
    }
}

// Enum kondisi kesehatan ayam
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Kondisi {
    Sehat,
    Sakit,
    Penjarangan,
}

impl Kondisi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kondisi::Sehat => "Sehat",
            Kondisi::Sakit => "Sakit",
            Kondisi::Penjarangan => "Penjarangan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Sehat" => Some(Kondisi::Sehat),
            "Sakit" => Some(Kondisi::Sakit),
            "Penjarangan" => Some(Kondisi::Penjarangan),
            _ => None,
        }
    }
}

// Request untuk membuat stok baru (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStokRequest {
    #[validate(length(min = 1, message = "Nama kandang tidak boleh kosong"))]
    #[schema(example = "Kandang Blitar 1")]
    pub nama_kandang: String,
    #[validate(length(min = 1, message = "Deskripsi tidak boleh kosong"))]
    #[schema(example = "Ayam broiler siap panen, umur 35 hari")]
    pub deskripsi: String,
    #[validate(length(min = 1, message = "Alamat lengkap tidak boleh kosong"))]
    #[schema(example = "Jl. Peternakan No. 12, Blitar")]
    pub alamat_lengkap: String,
    #[validate(length(min = 1, message = "Ukuran tidak boleh kosong"))]
    #[schema(example = "1.8-2.2 kg")]
    pub ukuran: String,
    #[validate(range(min = 0, message = "Stok awal tidak boleh negatif"))]
    #[schema(example = 100)]
    pub stok_awal: i32,
    #[schema(example = "Per Ekor")]
    pub metode_jual: String,
    #[validate(range(min = 0.0, message = "Harga satuan tidak boleh negatif"))]
    #[schema(example = 50000.0)]
    pub harga_satuan: f64,
    #[schema(example = "Sehat")]
    pub kondisi: String,
}

impl CreateStokRequest {
    // Validasi nilai enum yang tidak tercakup derive Validate
    pub fn validate_enums(&self) -> Result<(), String> {
        if MetodeJual::from_str(&self.metode_jual).is_none() {
            return Err("Metode jual harus 'Per Kg' atau 'Per Ekor'".to_string());
        }
        if Kondisi::from_str(&self.kondisi).is_none() {
            return Err("Kondisi harus 'Sehat', 'Sakit', atau 'Penjarangan'".to_string());
        }
        Ok(())
    }
}

// Request update stok, semua field opsional.
// stok_tersisa tidak bisa di-set langsung: bergeser mengikuti perubahan stok_awal,
// dan berkurang hanya lewat transaksi order.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStokRequest {
    pub nama_kandang: Option<String>,
    pub deskripsi: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub ukuran: Option<String>,
    #[validate(range(min = 0, message = "Stok awal tidak boleh negatif"))]
    pub stok_awal: Option<i32>,
    pub metode_jual: Option<String>,
    #[validate(range(min = 0.0, message = "Harga satuan tidak boleh negatif"))]
    pub harga_satuan: Option<f64>,
    pub kondisi: Option<String>,
}

impl UpdateStokRequest {
    pub fn validate_enums(&self) -> Result<(), String> {
        if let Some(metode) = &self.metode_jual {
            if MetodeJual::from_str(metode).is_none() {
                return Err("Metode jual harus 'Per Kg' atau 'Per Ekor'".to_string());
            }
        }
        if let Some(kondisi) = &self.kondisi {
            if Kondisi::from_str(kondisi).is_none() {
                return Err("Kondisi harus 'Sehat', 'Sakit', atau 'Penjarangan'".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metode_jual_roundtrip() {
        for metode in [MetodeJual::PerKg, MetodeJual::PerEkor] {
            assert_eq!(MetodeJual::from_str(metode.as_str()), Some(metode));
        }
        assert_eq!(MetodeJual::from_str("per kg"), None);
        assert_eq!(MetodeJual::from_str("Per Kilo"), None);
    }

    #[test]
    fn test_kondisi_roundtrip() {
        for kondisi in [Kondisi::Sehat, Kondisi::Sakit, Kondisi::Penjarangan] {
            assert_eq!(Kondisi::from_str(kondisi.as_str()), Some(kondisi));
        }
        assert_eq!(Kondisi::from_str("sehat"), None);
    }

    #[test]
    fn test_create_request_enum_validation() {
        let mut req = CreateStokRequest {
            nama_kandang: "Kandang A".to_string(),
            deskripsi: "Siap panen".to_string(),
            alamat_lengkap: "Blitar".to_string(),
            ukuran: "1.8-2.2 kg".to_string(),
            stok_awal: 100,
            metode_jual: "Per Ekor".to_string(),
            harga_satuan: 50000.0,
            kondisi: "Sehat".to_string(),
        };
        assert!(req.validate_enums().is_ok());

        req.metode_jual = "Borongan".to_string();
        assert!(req.validate_enums().is_err());

        req.metode_jual = "Per Kg".to_string();
        req.kondisi = "Mati".to_string();
        assert!(req.validate_enums().is_err());
    }
}
