//! Browser storage area bindings.

pub mod web_storage;
