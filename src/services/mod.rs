pub mod ai_service;
pub mod quiz_service;
pub mod source_service;
pub mod user_service;
