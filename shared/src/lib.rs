// Shared library untuk semua service Pitek Balap Marketplace
pub mod models;
pub mod utils;
