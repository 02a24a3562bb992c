pub mod store;
pub mod service;

pub use service::QuestionService;
pub use store::{FileQuestionStore, MemoryQuestionStore, QuestionStore};
