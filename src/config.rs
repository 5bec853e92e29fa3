use std::env;

/// Which persistence backend to construct at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Single JSON document file
    Json,
    /// Relational store via DATABASE_URL
    Sql,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub json_db_path: String,
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let backend_raw = env::var("STORE_BACKEND").unwrap_or_else(|_| "json".to_string());
        let store_backend = match backend_raw.as_str() {
            "json" => StoreBackend::Json,
            "sql" => StoreBackend::Sql,
            other => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let json_db_path = env::var("JSON_DB_PATH").unwrap_or_else(|_| "./db.json".to_string());

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Sql && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Config {
            store_backend,
            json_db_path,
            database_url,
            server_host,
            server_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown STORE_BACKEND '{0}' (expected 'json' or 'sql')")]
    UnknownBackend(String),

    #[error("DATABASE_URL environment variable not set (required when STORE_BACKEND=sql)")]
    MissingDatabaseUrl,

    #[error("Invalid port number")]
    InvalidPort,
}
