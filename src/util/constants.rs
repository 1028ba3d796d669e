// LogLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

use std::net::{IpAddr, Ipv4Addr};

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Categorisation
// =============================================================================

/// Literal that marks a category token in pattern-fallback mode.
/// Case-sensitive; must be followed by at least one word character.
pub const CATEGORY_PREFIX_MARKER: &str = "Log";

/// Character separating the category from the message on a log line.
pub const CATEGORY_DELIMITER: char = ':';

// =============================================================================
// Server defaults and limits
// =============================================================================

/// Default bind address for the HTTP service (all IPv4 interfaces).
pub const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default TCP port (overridden by the `PORT` environment variable).
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable consulted for the listening port.
pub const PORT_ENV_VAR: &str = "PORT";

/// Maximum accepted upload size in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024; // 16 MiB

/// Smallest configurable upload limit. Anything below this cannot hold a
/// meaningful log file.
pub const MIN_MAX_UPLOAD_BYTES: usize = 1024;

/// Hard upper bound on the upload limit. Parsing is in-memory, so the whole
/// file plus its parsed entries must fit comfortably in RAM.
pub const ABSOLUTE_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024; // 512 MiB

/// Name of the multipart form field carrying the uploaded log.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Subdirectory of the platform data directory that holds uploads.
pub const UPLOADS_DIR_NAME: &str = "uploads";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of entries that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
