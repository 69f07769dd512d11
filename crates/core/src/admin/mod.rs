//! Administrator listings

pub mod ports;
pub mod service;

pub use ports::AdminApi;
pub use service::{AdminOverview, AdminService};
