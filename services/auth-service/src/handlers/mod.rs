pub mod auth;
pub mod users;
pub mod verification;
