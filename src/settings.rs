use std::str::FromStr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::{deserialize_bool_from_anything, deserialize_number_from_string};
use sqlx::sqlite::SqliteConnectOptions;

const IN_MEMORY: &str = ":memory:";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    /// Path to the sqlite file, or `:memory:`
    pub path: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub create_if_missing: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_owned(),
            create_if_missing: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&format!("sqlite:{}", self.path))?
            .create_if_missing(self.create_if_missing))
    }
}

/// Loads settings from defaults, an optional config file and `TRIVIA_*` env variables.
///
/// The file is `trivia.toml` (or any format `config` understands under that stem)
/// unless `TRIVIA_CONFIG` names another one.
pub fn load() -> Result<Settings, ConfigError> {
    let file = dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| "trivia".to_owned());
    let builder = Config::builder()
        .add_source(File::with_name(&file).required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__"),
        );
    from_builder(builder)
}

fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .set_default("database.create_if_missing", true)?
        .build()?
        .try_deserialize()
}
