// LogLens - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::CategorizerMode;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogLens data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loglens/)
    pub config_dir: PathBuf,

    /// Data directory; uploads live in its `uploads/` subdirectory.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Default upload directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(constants::UPLOADS_DIR_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[server]` section.
    pub server: ServerSection,
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[server]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind, e.g. "127.0.0.1".
    pub bind: Option<String>,
    /// TCP port.
    pub port: Option<u16>,
    /// Directory uploads are stored in.
    pub upload_dir: Option<String>,
    /// Maximum upload size in bytes.
    pub max_upload_bytes: Option<usize>,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// "closed-vocabulary" or "pattern-fallback". Kept as a string so a typo
    /// produces a warning instead of rejecting the whole file.
    pub mode: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Server --
    pub bind: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,

    // -- Analysis --
    /// Categorisation policy for the lifetime of the process.
    pub mode: CategorizerMode,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: constants::DEFAULT_BIND_ADDRESS,
            port: constants::DEFAULT_PORT,
            upload_dir: PathBuf::from(constants::UPLOADS_DIR_NAME),
            max_upload_bytes: constants::DEFAULT_MAX_UPLOAD_BYTES,
            mode: CategorizerMode::default(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Defaults with uploads placed under the platform data directory.
    pub fn for_platform(paths: &PlatformPaths) -> Self {
        Self {
            upload_dir: paths.uploads_dir(),
            ..Self::default()
        }
    }
}

/// Load and validate the config file at `config_path` on top of `defaults`.
///
/// Returns the validated config and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning -- the service
/// still starts but the operator is told why their settings were ignored.
pub fn load_config(config_path: &Path, defaults: AppConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (defaults, warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (defaults, warnings);
        }
    };

    let (config, mut parse_warnings) = parse_config(&content, defaults);
    if parse_warnings.is_empty() {
        tracing::info!(path = %config_path.display(), "Loaded config.toml");
    }
    warnings.append(&mut parse_warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Load a config file the operator named explicitly (`--config`).
///
/// Unlike [`load_config`], a missing or syntactically broken file is fatal:
/// silently running with defaults would hide the mistake. Out-of-range
/// values still only warn.
pub fn load_config_strict(
    config_path: &Path,
    defaults: AppConfig,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    // Syntax check first so the error keeps its typed source.
    toml::from_str::<RawConfig>(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let (config, warnings) = parse_config(&content, defaults);
    tracing::info!(
        path = %config_path.display(),
        warnings = warnings.len(),
        "Loaded config file"
    );
    Ok((config, warnings))
}

/// Parse and validate config.toml content. Separated from file I/O for testing.
pub fn parse_config(content: &str, defaults: AppConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config: {e}. Using defaults. \
                 See config.example.toml for the expected format."
            ));
            return (defaults, warnings);
        }
    };

    // Validate each field, accumulating all problems.
    let mut config = defaults;

    // -- Server: bind --
    if let Some(ref bind) = raw.server.bind {
        if let Ok(addr) = bind.trim().parse::<IpAddr>() {
            config.bind = addr;
        } else {
            warnings.push(format!(
                "[server] bind = \"{bind}\" is not an IP address. Using default ({}).",
                config.bind,
            ));
        }
    }

    // -- Server: port --
    if let Some(port) = raw.server.port {
        if port != 0 {
            config.port = port;
        } else {
            warnings.push(format!(
                "[server] port = 0 is not allowed. Using default ({}).",
                config.port,
            ));
        }
    }

    // -- Server: upload_dir --
    if let Some(ref dir) = raw.server.upload_dir {
        if dir.trim().is_empty() {
            warnings.push(format!(
                "[server] upload_dir is empty. Using default ({}).",
                config.upload_dir.display(),
            ));
        } else {
            config.upload_dir = PathBuf::from(dir);
        }
    }

    // -- Server: max_upload_bytes --
    if let Some(bytes) = raw.server.max_upload_bytes {
        if (constants::MIN_MAX_UPLOAD_BYTES..=constants::ABSOLUTE_MAX_UPLOAD_BYTES)
            .contains(&bytes)
        {
            config.max_upload_bytes = bytes;
        } else {
            warnings.push(format!(
                "[server] max_upload_bytes = {bytes} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_UPLOAD_BYTES,
                constants::ABSOLUTE_MAX_UPLOAD_BYTES,
                constants::DEFAULT_MAX_UPLOAD_BYTES,
            ));
        }
    }

    // -- Analysis: mode --
    if let Some(ref mode) = raw.analysis.mode {
        match mode.parse::<CategorizerMode>() {
            Ok(m) => config.mode = m,
            Err(e) => warnings.push(format!(
                "[analysis] {e}. Using default ({}).",
                config.mode
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Pick the listening port: CLI flag > `PORT` env var > config value.
///
/// An unparseable `PORT` value is reported and skipped.
pub fn resolve_port(
    cli_port: Option<u16>,
    env_port: Option<&str>,
    config_port: u16,
) -> (u16, Option<String>) {
    if let Some(port) = cli_port {
        return (port, None);
    }
    match env_port.map(str::trim) {
        Some(raw) if !raw.is_empty() => match raw.parse::<u16>() {
            Ok(port) if port != 0 => (port, None),
            _ => (
                config_port,
                Some(format!(
                    "{}=\"{raw}\" is not a valid port. Using {config_port}.",
                    constants::PORT_ENV_VAR
                )),
            ),
        },
        _ => (config_port, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_defaults() {
        let (config, warnings) = parse_config("", AppConfig::default());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[server]
bind = "127.0.0.1"
port = 8080
upload_dir = "/var/lib/loglens/uploads"
max_upload_bytes = 1048576

[analysis]
mode = "pattern-fallback"

[logging]
level = "debug"
"#;
        let (config, warnings) = parse_config(toml, AppConfig::default());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.bind, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/loglens/uploads"));
        assert_eq!(config.max_upload_bytes, 1_048_576);
        assert_eq!(config.mode, CategorizerMode::PatternFallback);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let toml = r#"
[server]
bind = "not-an-ip"
port = 0
max_upload_bytes = 1

[analysis]
mode = "regex"

[logging]
level = "loud"
"#;
        let (config, warnings) = parse_config(toml, AppConfig::default());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 5, "{warnings:?}");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (config, warnings) =
            parse_config("[future]\nshiny = true\n[server]\nport = 9000\n", AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_malformed_toml_uses_defaults() {
        let (config, warnings) = parse_config("[server\nport = ", AppConfig::default());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) =
            load_config(&dir.path().join("config.toml"), AppConfig::default());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nmode = \"pattern-fallback\"\n").unwrap();
        let (config, warnings) = load_config(&path, AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.mode, CategorizerMode::PatternFallback);
    }

    #[test]
    fn test_strict_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_strict(&dir.path().join("nope.toml"), AppConfig::default());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_strict_load_bad_syntax_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let result = load_config_strict(&path, AppConfig::default());
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_strict_load_range_problems_only_warn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();
        let (config, warnings) = load_config_strict(&path, AppConfig::default()).unwrap();
        assert_eq!(config.port, constants::DEFAULT_PORT);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_port_precedence() {
        assert_eq!(resolve_port(Some(1), Some("2"), 3), (1, None));
        assert_eq!(resolve_port(None, Some("2"), 3), (2, None));
        assert_eq!(resolve_port(None, None, 3), (3, None));
        assert_eq!(resolve_port(None, Some(""), 3), (3, None));

        let (port, warning) = resolve_port(None, Some("http"), 3);
        assert_eq!(port, 3);
        assert!(warning.is_some());
    }
}
