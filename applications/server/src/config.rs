/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Selects the environment profile
pub const APP_SETTINGS_VAR: &str = "APP_SETTINGS";
/// Database used in development and production
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Database used in testing
pub const DATABASE_TEST_URL_VAR: &str = "DATABASE_TEST_URL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub environment: AppEnvironment,

    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_database_test_url")]
    pub database_test_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Environment profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum AppEnvironment {
    #[default]
    Development,
    Testing,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Testing => "testing",
            AppEnvironment::Production => "production",
        }
    }
}

impl FromStr for AppEnvironment {
    type Err = ServerError;

    /// Accepts plain names (`testing`) as well as class-style names such as
    /// `TestingConfig` or `project.config.TestingConfig`.
    fn from_str(s: &str) -> Result<Self> {
        let last = s.rsplit('.').next().unwrap_or(s).trim().to_lowercase();
        let name = last.strip_suffix("config").unwrap_or(&last);

        match name {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "testing" | "test" => Ok(AppEnvironment::Testing),
            "production" | "prod" => Ok(AppEnvironment::Production),
            _ => Err(ServerError::Config(format!(
                "Unknown environment {:?} (expected development, testing or production)",
                s
            ))),
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = ServerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AppEnvironment> for String {
    fn from(env: AppEnvironment) -> Self {
        env.as_str().to_string()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"), std::env::vars().collect())
    }

    /// Load configuration from an optional TOML file and a set of variables.
    ///
    /// Precedence, lowest first: defaults, the file, `USERS__*` variables,
    /// then `APP_SETTINGS`, `DATABASE_URL` and `DATABASE_TEST_URL`.
    pub fn load_from(config_path: &Path, vars: HashMap<String, String>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(PathBuf::from(config_path)));
        }

        // Nested keys use a double underscore: USERS__SERVER__PORT=5001
        let prefixed: config::Map<String, String> = vars
            .iter()
            .filter(|(key, _)| key.starts_with("USERS__"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        settings = settings.add_source(
            config::Environment::with_prefix("USERS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(prefixed)),
        );

        settings = settings
            .set_override_option("environment", vars.get(APP_SETTINGS_VAR).cloned())
            .and_then(|s| {
                s.set_override_option("storage.database_url", vars.get(DATABASE_URL_VAR).cloned())
            })
            .and_then(|s| {
                s.set_override_option(
                    "storage.database_test_url",
                    vars.get(DATABASE_TEST_URL_VAR).cloned(),
                )
            })
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.active_database_url().trim().is_empty() {
            let var = if self.testing() {
                DATABASE_TEST_URL_VAR
            } else {
                DATABASE_URL_VAR
            };
            return Err(ServerError::Config(format!(
                "Database URL is required in {} (set {})",
                self.environment, var
            )));
        }

        if self.storage.max_connections == 0 {
            return Err(ServerError::Config(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection string for the selected environment
    pub fn active_database_url(&self) -> &str {
        match self.environment {
            AppEnvironment::Testing => &self.storage.database_test_url,
            AppEnvironment::Development | AppEnvironment::Production => {
                &self.storage.database_url
            }
        }
    }

    /// Verbose request tracing
    pub fn debug(&self) -> bool {
        self.environment == AppEnvironment::Development
    }

    pub fn testing(&self) -> bool {
        self.environment == AppEnvironment::Testing
    }

    /// Dropping the schema is refused in production unless forced
    pub fn ensure_recreate_allowed(&self, force: bool) -> Result<()> {
        if self.environment == AppEnvironment::Production && !force {
            return Err(ServerError::Config(
                "Refusing to recreate the production database without --force".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration for in-process test instances
    pub fn for_testing(database_url: impl Into<String>) -> Self {
        Self {
            environment: AppEnvironment::Testing,
            storage: StorageSettings {
                database_test_url: database_url.into(),
                ..default_storage()
            },
            ..Self::default()
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        database_test_url: default_database_test_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/users.db".to_string()
}

fn default_database_test_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::default(),
            server: default_server(),
            storage: default_storage(),
        }
    }
}
