// --- File: crates/cliniko_probe_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{config_error, validation_error, Context, ProbeError};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, get, json_headers},
    display_url, join_url,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level, log_error, log_result};
