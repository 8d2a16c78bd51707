pub mod cart;
pub mod order;
pub mod status;
