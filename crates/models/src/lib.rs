pub mod errors;
pub mod question;

pub use question::{NewQuestion, Question};
