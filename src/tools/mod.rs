pub mod chat;
pub mod compare;
