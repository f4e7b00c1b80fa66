//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "CHATVEC_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "CHATVEC_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// File locations
pub mod paths {
    /// Directory holding training data, sentence files and models
    pub const MODELS_DIR: &str = "CHATVEC_MODELS_DIR";

    /// Explicit config file path (defaults to ~/.chatvec/config.toml)
    pub const CONFIG_FILE: &str = "CHATVEC_CONFIG";
}
