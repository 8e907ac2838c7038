pub mod answer;
pub mod chat_log;
pub mod session_store;
