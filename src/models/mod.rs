pub mod chat;
pub mod openai;
