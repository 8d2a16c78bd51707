use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::status::MetodePembayaran;

// Order SPPA (Surat Perintah Pengambilan Ayam)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i32,
    pub nomor_sppa: String,
    pub buyer_id: i32,
    pub nama_pembeli: String,
    pub no_polisi: String,
    pub nama_supir: String,
    pub telepon_supir: String,
    pub sim_supir: String,
    pub metode_pembayaran: String,
    pub status: String,
    pub estimasi_total: f64,
    pub actual_tonnage: Option<f64>,
    pub actual_price: Option<f64>,
    pub actual_total: Option<f64>,
    pub payment_proof_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub rating: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Snapshot baris stok pada saat checkout
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub stok_id: i32,
    pub nama_kandang: String,
    pub ukuran: String,
    pub metode_jual: String,
    pub harga_satuan: f64,
    pub jumlah: i32,
    pub subtotal: f64,
}

// Order lengkap dengan baris item untuk response API
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// Checkout keranjang jadi order SPPA. Data supir wajib karena
// SPPA adalah surat jalan pengambilan di kandang.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Nomor polisi wajib diisi"))]
    #[schema(example = "AG 1234 BC")]
    pub no_polisi: String,
    #[validate(length(min = 1, message = "Nama supir wajib diisi"))]
    #[schema(example = "Budi Santoso")]
    pub nama_supir: String,
    #[validate(length(min = 8, message = "Telepon supir tidak valid"))]
    #[schema(example = "081234567890")]
    pub telepon_supir: String,
    #[validate(length(min = 1, message = "Nomor SIM supir wajib diisi"))]
    #[schema(example = "1234-5678-901234")]
    pub sim_supir: String,
    #[schema(example = "pay_later")]
    pub metode_pembayaran: String,
}

impl CheckoutRequest {
    pub fn metode(&self) -> Result<MetodePembayaran, String> {
        MetodePembayaran::from_str(&self.metode_pembayaran).ok_or_else(|| {
            "Metode pembayaran harus 'pay_later', 'qris', atau 'bank_transfer'".to_string()
        })
    }
}

// Hasil timbang dari admin, total dihitung server
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WeighingRequest {
    #[validate(range(min = 0.001, message = "Tonase harus lebih dari 0"))]
    #[schema(example = 58.4)]
    pub actual_tonnage: f64,
    #[validate(range(min = 1.0, message = "Harga per kg harus lebih dari 0"))]
    #[schema(example = 21500.0)]
    pub actual_price: f64,
}

impl WeighingRequest {
    pub fn actual_total(&self) -> f64 {
        self.actual_tonnage * self.actual_price
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectOrderRequest {
    #[schema(example = "Stok kandang sedang karantina")]
    pub alasan: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentConfirmRequest {
    pub confirm: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReleaseRequest {
    #[schema(example = "weighing")]
    pub to: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RatingRequest {
    #[validate(range(min = 1, max = 5, message = "Rating harus 1 sampai 5"))]
    #[schema(example = 5)]
    pub rating: i16,
}

// Query string daftar order untuk admin
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl OrderListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_metode_parsing() {
        let mut req = CheckoutRequest {
            no_polisi: "AG 1234 BC".to_string(),
            nama_supir: "Budi".to_string(),
            telepon_supir: "081234567890".to_string(),
            sim_supir: "1234-5678".to_string(),
            metode_pembayaran: "pay_later".to_string(),
        };
        assert!(req.metode().is_ok());

        req.metode_pembayaran = "cicilan".to_string();
        assert!(req.metode().is_err());
    }

    #[test]
    fn test_weighing_total_is_tonnage_times_price() {
        let req = WeighingRequest {
            actual_tonnage: 58.4,
            actual_price: 21500.0,
        };
        assert_eq!(req.actual_total(), 58.4 * 21500.0);
    }

    #[test]
    fn test_list_query_defaults_and_clamping() {
        let query = OrderListQuery {
            status: None,
            search: None,
            page: None,
            limit: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.offset(), 0);

        let query = OrderListQuery {
            status: None,
            search: None,
            page: Some(3),
            limit: Some(500),
        };
        assert_eq!(query.limit(), 100);
        assert_eq!(query.offset(), 200);

        let query = OrderListQuery {
            status: None,
            search: None,
            page: Some(-1),
            limit: Some(0),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
    }
}
