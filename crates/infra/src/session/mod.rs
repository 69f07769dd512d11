//! Session token persistence

pub mod file_store;

pub use file_store::FileTokenStore;
