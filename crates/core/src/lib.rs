/// ABI type model, identifier conventions and binding configuration
pub mod config;
pub mod naming;
pub mod platform;
pub mod types;

/// Re-export common types from solbind-common
pub use solbind_common::{Error, Result};
