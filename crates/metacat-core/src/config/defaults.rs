//! Default values for metacat configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Lineage Defaults
// ============================================================================

/// Infer an edge kind when a candidate does not supply one.
pub const DEFAULT_INFER_MISSING_KINDS: bool = true;

/// Minimum confidence for an inferred kind to be accepted (0 accepts all).
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;

/// Treat a cycle in accepted lineage as a failure.
pub const DEFAULT_FAIL_ON_CYCLES: bool = true;

// ============================================================================
// Output Defaults
// ============================================================================

/// Default output format name.
pub const DEFAULT_OUTPUT_FORMAT: &str = "text";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "metacat.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "metacat";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_INFER_KINDS: &str = "METACAT_INFER_KINDS";
pub const ENV_MIN_CONFIDENCE: &str = "METACAT_MIN_CONFIDENCE";
pub const ENV_FAIL_ON_CYCLES: &str = "METACAT_FAIL_ON_CYCLES";
pub const ENV_FORMAT: &str = "METACAT_FORMAT";

/// Log filter, read by the CLI before falling back to `RUST_LOG`.
pub const ENV_LOG: &str = "METACAT_LOG";
