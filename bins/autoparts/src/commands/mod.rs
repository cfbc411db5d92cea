//! CLI command implementations

pub mod check_config;
pub mod lookup;
pub mod search;
pub mod serve;
pub mod stats;
