pub mod category_service;
pub mod error;
pub mod todo_service;
