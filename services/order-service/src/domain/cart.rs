use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Baris keranjang mentah di tabel cart_items
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub stok_id: i32,
    pub jumlah: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Baris keranjang yang di-join dengan stok live.
// tersedia = false kalau stok tersisa sudah tidak mencukupi jumlah di keranjang.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CartItemView {
    pub id: i32,
    pub stok_id: i32,
    pub jumlah: i32,
    pub nama_kandang: String,
    pub ukuran: String,
    pub metode_jual: String,
    pub harga_satuan: f64,
    pub stok_tersisa: i32,
    pub tersedia: bool,
    pub subtotal: f64,
}

// Isi keranjang plus total estimasi
#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemView>,
    pub estimasi_total: f64,
}

impl CartResponse {
    pub fn from_items(items: Vec<CartItemView>) -> Self {
        let estimasi_total = items
            .iter()
            .filter(|item| item.tersedia)
            .map(|item| item.subtotal)
            .sum();

        CartResponse {
            items,
            estimasi_total,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    #[schema(example = 1)]
    pub stok_id: i32,
    #[validate(range(min = 1, message = "Jumlah minimal 1"))]
    #[schema(example = 30)]
    pub jumlah: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "Jumlah minimal 1"))]
    #[schema(example = 10)]
    pub jumlah: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(tersedia: bool, subtotal: f64) -> CartItemView {
        CartItemView {
            id: 1,
            stok_id: 1,
            jumlah: 2,
            nama_kandang: "Kandang A".to_string(),
            ukuran: "1.8-2.2 kg".to_string(),
            metode_jual: "Per Ekor".to_string(),
            harga_satuan: 50000.0,
            stok_tersisa: 10,
            tersedia,
            subtotal,
        }
    }

    #[test]
    fn test_estimasi_total_skips_unavailable_lines() {
        let response =
            CartResponse::from_items(vec![view(true, 100000.0), view(false, 999999.0)]);

        assert_eq!(response.estimasi_total, 100000.0);
        assert_eq!(response.items.len(), 2);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let response = CartResponse::from_items(vec![]);
        assert_eq!(response.estimasi_total, 0.0);
    }
}
