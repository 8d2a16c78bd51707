pub mod jwt;
pub mod upload;
pub mod validation;
