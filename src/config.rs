use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

fn default_remote_path() -> String {
    "data.json".to_string()
}

fn default_remote_branch() -> String {
    "main".to_string()
}

/// Remote sync configuration: a single file in a GitHub repository acting
/// as the published replica of the dataset.
///
/// The token is stored in cleartext in the config file. That is a known
/// limitation of the deployment model, not something this layer hides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Personal access token with contents write permission
    pub token: Option<String>,
    /// Repository owner (user or org)
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Path of the dataset file inside the repository
    pub path: String,
    /// Branch to read from and commit to
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            path: default_remote_path(),
            branch: default_remote_branch(),
        }
    }
}

impl RemoteConfig {
    /// Returns true if publishing is possible: token, owner and repo are all
    /// present and non-empty. Absence of any of them disables sync.
    pub fn is_complete(&self) -> bool {
        self.has_repo() && matches!(&self.token, Some(t) if !t.is_empty())
    }

    /// Returns true if the public read endpoint is addressable (no token
    /// needed for reads from a public repository).
    pub fn has_repo(&self) -> bool {
        matches!(&self.owner, Some(o) if !o.is_empty())
            && matches!(&self.repo, Some(r) if !r.is_empty())
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the SQLite database
    pub database_path: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Remote sync configuration
    pub remote: RemoteConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_db_path = Self::default_data_dir().join("thanainfo.db");

        let mut database_path = ConfigValue::new(default_db_path, ConfigSource::Default);
        let mut config_file = None;
        let mut remote = RemoteConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(db_path) = file_config.database_path {
                // Resolve relative paths against config file's directory
                let resolved_path = if db_path.is_relative() {
                    path.parent().map(|p| p.join(&db_path)).unwrap_or(db_path)
                } else {
                    db_path
                };
                database_path = ConfigValue::new(resolved_path, ConfigSource::File);
            }
            if let Some(remote_config) = file_config.remote {
                remote = remote_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(db_path) = std::env::var("THANAINFO_DATABASE_PATH") {
            database_path = ConfigValue::new(PathBuf::from(db_path), ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("THANAINFO_GITHUB_TOKEN") {
            remote.token = Some(token);
        }
        if let Ok(owner) = std::env::var("THANAINFO_GITHUB_OWNER") {
            remote.owner = Some(owner);
        }
        if let Ok(repo) = std::env::var("THANAINFO_GITHUB_REPO") {
            remote.repo = Some(repo);
        }
        if let Ok(path) = std::env::var("THANAINFO_GITHUB_PATH") {
            remote.path = path;
        }
        if let Ok(branch) = std::env::var("THANAINFO_GITHUB_BRANCH") {
            remote.branch = branch;
        }

        Ok(Self {
            database_path,
            config_file,
            remote,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/thanainfo/
    /// - macOS: ~/Library/Application Support/thanainfo/
    /// - Windows: %APPDATA%/thanainfo/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thanainfo")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/thanainfo/
    /// - macOS: ~/Library/Application Support/thanainfo/
    /// - Windows: %APPDATA%/thanainfo/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thanainfo")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config
            .database_path
            .value
            .to_string_lossy()
            .contains("thanainfo.db"));
        assert_eq!(config.database_path.source, ConfigSource::Default);
        assert_eq!(config.remote.path, "data.json");
        assert_eq!(config.remote.branch, "main");
        assert!(!config.remote.is_complete());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_path: /custom/path/db.sqlite").unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  token: ghp_testtoken").unwrap();
        writeln!(file, "  owner: someone").unwrap();
        writeln!(file, "  repo: thana-data").unwrap();
        writeln!(file, "  branch: master").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.database_path.value,
            PathBuf::from("/custom/path/db.sqlite")
        );
        assert_eq!(config.database_path.source, ConfigSource::File);
        assert_eq!(config.remote.owner.as_deref(), Some("someone"));
        assert_eq!(config.remote.branch, "master");
        // path not in the file, keeps its default
        assert_eq!(config.remote.path, "data.json");
        assert!(config.remote.is_complete());
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_path: /from/file/db.sqlite").unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  owner: filewner").unwrap();
        writeln!(file, "  branch: master").unwrap();

        // Set env vars
        std::env::set_var("THANAINFO_DATABASE_PATH", "/from/env/db.sqlite");
        std::env::set_var("THANAINFO_GITHUB_OWNER", "envowner");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.database_path.value,
            PathBuf::from("/from/env/db.sqlite")
        );
        assert_eq!(config.database_path.source, ConfigSource::Environment);
        assert_eq!(config.remote.owner.as_deref(), Some("envowner"));
        // File values without an env override stay in effect
        assert_eq!(config.remote.branch, "master");

        // Clean up
        std::env::remove_var("THANAINFO_DATABASE_PATH");
        std::env::remove_var("THANAINFO_GITHUB_OWNER");
    }

    #[test]
    fn test_remote_config_completeness() {
        let mut remote = RemoteConfig::default();
        assert!(!remote.is_complete());
        assert!(!remote.has_repo());

        remote.owner = Some("o".to_string());
        remote.repo = Some("r".to_string());
        assert!(remote.has_repo());
        assert!(!remote.is_complete());

        remote.token = Some(String::new());
        assert!(!remote.is_complete());

        remote.token = Some("t".to_string());
        assert!(remote.is_complete());
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  owner: someone").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.database_path.source, ConfigSource::Default);
        assert_eq!(config.remote.owner.as_deref(), Some("someone"));
        assert!(config.remote.repo.is_none());
    }
}
