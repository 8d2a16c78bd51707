pub mod kandang_repo;
pub mod stok_repo;
