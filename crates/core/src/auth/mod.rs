//! Authentication and session management

pub mod claims;
pub mod memory_store;
pub mod ports;
pub mod service;
pub mod session;
pub mod validation;

pub use claims::decode_claims;
pub use memory_store::InMemoryTokenStore;
pub use ports::{AuthApi, TokenStore};
pub use service::AuthService;
pub use session::Session;
