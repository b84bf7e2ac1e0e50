//! Central Configuration Constants
//!
//! Names and defaults shared by the library and the binary.

/// App name, also the config sub-directory
pub const APP_NAME: &str = "dropout-engine";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name inside `<config_dir>/dropout-engine/`
pub const CONFIG_FILE_NAME: &str = "engine.json";

// ============================================
// Environment overrides
// ============================================

/// Overrides `top_k`
pub const ENV_TOP_K: &str = "DROPOUT_TOP_K";

/// Overrides `parallel` (1/0, true/false, yes/no, on/off)
pub const ENV_PARALLEL: &str = "DROPOUT_PARALLEL";
