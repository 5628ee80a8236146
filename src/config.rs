// src/config.rs

use std::{env, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{MemStorage, PgStorage, Storage},
    services::{seed::seed_demo_data, AuthService, DashboardService, SchedulingService},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "postgres" | "pg" => Ok(StorageBackend::Postgres),
            other => Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub seed_demo_data: bool,
}

impl Config {
    /// Lê as variáveis de ambiente (e o `.env`, se existir).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `env` para os testes não dependerem do processo
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS", e.to_string()))?;

        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Memory,
        };

        let database_url = lookup("DATABASE_URL");
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidValue("DB_MAX_CONNECTIONS", e.to_string()))?,
            None => 5,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(value) => value
                .parse::<bool>()
                .map_err(|e| ConfigError::InvalidValue("SEED_DEMO_DATA", e.to_string()))?,
            None => false,
        };

        Ok(Self {
            bind_address,
            backend,
            database_url,
            max_connections,
            seed_demo_data,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub scheduling_service: SchedulingService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let storage: Arc<dyn Storage> = match config.backend {
            StorageBackend::Memory => {
                tracing::info!("✅ Using in-memory storage");
                Arc::new(MemStorage::new())
            }
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or(ConfigError::MissingVar("DATABASE_URL"))?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Database connection established");

                let pg = PgStorage::new(pool);
                pg.run_migrations().await?;
                tracing::info!("✅ Database migrations applied");

                Arc::new(pg)
            }
        };

        if config.seed_demo_data {
            seed_demo_data(storage.as_ref()).await?;
        }

        Ok(Self::from_storage(storage))
    }

    /// Monta o grafo de serviços em volta de qualquer backend.
    pub fn from_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            auth_service: AuthService::new(storage.clone()),
            dashboard_service: DashboardService::new(storage.clone()),
            scheduling_service: SchedulingService::new(storage.clone()),
            storage,
        }
    }
}
