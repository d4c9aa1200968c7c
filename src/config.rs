use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use sea_orm::sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxPostgresConnector};
use serde::Deserialize;
use tracing::{debug, info, trace};
use upsert::SyncSettings;
use validator::Validate;

/// How long a record waits for a connection before its write fails.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix of environment overrides, e.g. `MEMBERSYNC__DATABASE__HOST`.
pub const ENV_PREFIX: &str = "MEMBERSYNC";

fn default_identification_type() -> String {
    upsert::engine::DEFAULT_IDENTIFICATION_TYPE.to_string()
}

fn default_group_id() -> i32 {
    upsert::engine::DEFAULT_GROUP_ID
}

fn default_password_iterations() -> u32 {
    upsert::hasher::DEFAULT_ITERATIONS
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "database host must not be empty"))]
    pub host: String,
    #[validate(range(min = 1, message = "database port must be positive"))]
    pub port: u16,
    #[validate(length(min = 1, message = "database name must not be empty"))]
    pub dbname: String,
    #[validate(length(min = 1, message = "database user must not be empty"))]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub database: DatabaseConfig,
    pub file_path: PathBuf,
    #[validate(length(min = 1, message = "schema must not be empty"))]
    pub schema: String,
    #[serde(default = "default_identification_type")]
    #[validate(length(min = 1, max = 2, message = "identification type is a two character code"))]
    pub identification_type: String,
    #[serde(default = "default_group_id")]
    pub group_id: i32,
    #[serde(default = "default_password_iterations")]
    #[validate(range(min = 1, message = "password iterations must be positive"))]
    pub password_iterations: u32,
}

impl AppConfig {
    /// Loads the JSON file at `path`, applies `MEMBERSYNC__*` overrides and
    /// validates the result.
    pub fn load(path: &Path) -> Result<Self> {
        trace!("Loading configuration from {}", path.display());

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;

        debug!(
            "Configuration loaded: host={} port={} dbname={} schema={} file={}",
            config.database.host,
            config.database.port,
            config.database.dbname,
            config.schema,
            config.file_path.display()
        );
        Ok(config)
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            group_id: self.group_id,
            identification_type: self.identification_type.clone(),
        }
    }

    /// Builds the pool used for a whole run.
    ///
    /// With `database_url` set the `database` block is ignored; otherwise a
    /// PostgreSQL pool is built from it. Either way the configured schema is
    /// the search path. The pool connects lazily: an unreachable server shows
    /// up as a database error on each record, not here.
    pub async fn connect(&self, database_url: Option<&str>) -> Result<DatabaseConnection> {
        match database_url {
            Some(url) => {
                info!("Connecting to database from URL");
                let mut options = ConnectOptions::new(url.to_string());
                options
                    .set_schema_search_path(self.schema.clone())
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_lazy(true)
                    .sqlx_logging(false);
                Database::connect(options)
                    .await
                    .context("failed to connect to the database")
            }
            None => {
                let db = &self.database;
                info!(
                    "Connecting to PostgreSQL at {}:{} (database {}, schema {})",
                    db.host, db.port, db.dbname, self.schema
                );
                let options = PgConnectOptions::new()
                    .host(&db.host)
                    .port(db.port)
                    .database(&db.dbname)
                    .username(&db.user)
                    .password(&db.password)
                    .options([("search_path", self.schema.as_str())]);
                let pool = PgPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_lazy_with(options);
                Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
            }
        }
    }
}
