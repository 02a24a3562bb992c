//! Service layer for the trivia question collection.
//! - `storage` mirrors an in-memory list to a JSON file.
//! - `question` holds the store abstraction and the query/validation service.

pub mod errors;
pub mod storage;
pub mod question;
