pub mod conversation_repo;
pub mod message_repo;
