//! Configuration loading and root folder resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "STAKU_ROOT_FOLDER";

/// Environment variable pointing at an explicit config file
pub const CONFIG_FILE_ENV: &str = "STAKU_CONFIG";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const DATABASE_FILE_NAME: &str = "staku.db";
const UPLOAD_DIR_NAME: &str = "uploads";

/// Contents of the optional TOML config file
///
/// All keys are optional; absent keys fall through to compiled defaults.
///
/// ```toml
/// root_folder = "/var/lib/staku"
/// port = 8080
/// max_upload_bytes = 5242880
/// atomic_uploads = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_host: Option<String>,
    pub max_upload_bytes: Option<usize>,
    pub atomic_uploads: Option<bool>,
}

impl TomlConfig {
    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Load the config file if one is available, falling back to defaults
    ///
    /// A missing file is normal. A file that exists but cannot be read or parsed
    /// logs a warning; startup never fails because of it.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_FILE_ENV) {
                Some(path) => PathBuf::from(path),
                None => match default_config_path() {
                    Some(path) => path,
                    None => return Self::default(),
                },
            },
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("Config file not found: {} (using defaults)", path.display());
            }
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("{} (using defaults)", e);
                Self::default()
            }
        }
    }
}

/// Platform config file location: `<config_dir>/staku/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("staku").join("config.toml"))
}

/// Resolve the root folder holding the database and upload staging area
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = std::env::var_os(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("staku"))
        .unwrap_or_else(|| PathBuf::from("./staku_data"))
}

/// Values supplied on the command line (clap fills env-backed flags too)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub bind_host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub atomic_uploads: bool,
}

impl ServiceConfig {
    /// Merge command-line overrides, environment and TOML into one configuration
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let root_folder =
            resolve_root_folder(cli.root_folder.as_deref(), ROOT_FOLDER_ENV, toml_config);

        let max_upload_bytes = toml_config
            .max_upload_bytes
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes == 0 {
            return Err(Error::Config("max_upload_bytes must be greater than 0".to_string()));
        }

        Ok(Self {
            root_folder,
            bind_host: toml_config
                .bind_host
                .clone()
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            port: cli.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            max_upload_bytes,
            atomic_uploads: toml_config.atomic_uploads.unwrap_or(true),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    /// Directory where uploaded spreadsheets are staged while being parsed
    pub fn upload_dir(&self) -> PathBuf {
        self.root_folder.join(UPLOAD_DIR_NAME)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    /// Create the root folder and upload directory if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(self.upload_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_toml() {
        let config = TomlConfig::parse(
            r#"
            root_folder = "/srv/staku"
            port = 8080
            bind_host = "127.0.0.1"
            max_upload_bytes = 1024
            atomic_uploads = false
            "#,
        )
        .unwrap();

        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/staku")));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind_host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.max_upload_bytes, Some(1024));
        assert_eq!(config.atomic_uploads, Some(false));
    }

    #[test]
    fn test_parse_empty_toml_is_default() {
        assert_eq!(TomlConfig::parse("").unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = TomlConfig::parse("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_port_beats_toml() {
        let toml_config = TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/staku-toml")),
            port: Some(9000),
            ..Default::default()
        };
        let cli = CliOverrides {
            root_folder: Some(PathBuf::from("/tmp/staku-cli")),
            port: Some(7000),
        };

        let config = ServiceConfig::resolve(&cli, &toml_config).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.root_folder, PathBuf::from("/tmp/staku-cli"));
        assert_eq!(config.bind_addr(), "0.0.0.0:7000");
    }

    #[test]
    fn test_derived_paths() {
        let cli = CliOverrides {
            root_folder: Some(PathBuf::from("/tmp/staku-paths")),
            port: None,
        };
        let config = ServiceConfig::resolve(&cli, &TomlConfig::default()).unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/tmp/staku-paths/staku.db"));
        assert_eq!(config.upload_dir(), PathBuf::from("/tmp/staku-paths/uploads"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.atomic_uploads);
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let toml_config = TomlConfig {
            max_upload_bytes: Some(0),
            ..Default::default()
        };
        let cli = CliOverrides {
            root_folder: Some(PathBuf::from("/tmp/staku-zero")),
            port: None,
        };
        assert!(ServiceConfig::resolve(&cli, &toml_config).is_err());
    }
}
