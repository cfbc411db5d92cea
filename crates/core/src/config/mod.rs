//! Configuration loading and schema definitions
//!
//! TOML configuration shared by the server and the CLI.

mod loader;
mod schema;

pub use loader::{Config, ENV_BIND, ENV_CONFIG, ENV_DATA, ENV_LOG};
pub use schema::*;
