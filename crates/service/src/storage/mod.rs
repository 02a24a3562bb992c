//! Storage abstractions for service layer
//!
//! File-backed stores that persist small collections as JSON.

pub mod json_list_store;
