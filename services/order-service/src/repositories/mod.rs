pub mod cart_repo;
pub mod order_repo;
