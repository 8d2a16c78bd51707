pub mod kandang;
pub mod stok;
