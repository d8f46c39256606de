use std::path::PathBuf;
use std::sync::Arc;

use lms_cloud::{LocalObjectStore, ObjectStore, S3Config, S3ObjectStore};

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Whether 500 responses may carry the underlying error text.
    pub fn exposes_error_detail(self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Where uploaded media is written.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Files under a local directory, served by the API at `/static`.
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    S3(S3Config),
}

/// Object storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Leading key segment for every uploaded object.
    pub key_prefix: String,
}

impl StorageConfig {
    /// Construct the configured object store.
    pub async fn open_store(&self) -> Arc<dyn ObjectStore> {
        match &self.backend {
            StorageBackend::Local {
                root,
                public_base_url,
            } => Arc::new(LocalObjectStore::new(root.clone(), public_base_url.clone())),
            StorageBackend::S3(config) => Arc::new(S3ObjectStore::connect(config.clone()).await),
        }
    }

    /// Root directory to serve statically, if uploads stay on local disk.
    pub fn local_root(&self) -> Option<&PathBuf> {
        match &self.backend {
            StorageBackend::Local { root, .. } => Some(root),
            StorageBackend::S3(_) => None,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Upper bound on pooled database connections (default: `20`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub environment: Environment,
    /// Maximum request body size in bytes, uploads included.
    pub max_upload_bytes: usize,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                         |
    /// |----------------------------|---------------------------------|
    /// | `HOST`                     | `0.0.0.0`                       |
    /// | `PORT`                     | `3000`                          |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                            |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                            |
    /// | `APP_ENV`                  | `development`                   |
    /// | `MAX_UPLOAD_BYTES`         | `10485760`                      |
    /// | `STORAGE_BACKEND`          | `local`                         |
    /// | `STORAGE_LOCAL_ROOT`       | `storage`                       |
    /// | `STORAGE_BUCKET`           | required when backend is `s3`   |
    /// | `STORAGE_REGION`           | `ap-south-1`                    |
    /// | `STORAGE_ENDPOINT`         | unset                           |
    /// | `STORAGE_PUBLIC_BASE_URL`  | derived from the backend        |
    /// | `STORAGE_KEY_PREFIX`       | `lmscontent`                    |
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment: Environment = std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".into())
            .parse()
            .unwrap_or_else(|e| panic!("APP_ENV is invalid: {e}"));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let storage = storage_from_env(port);

        Self {
            host,
            port,
            database_max_connections,
            cors_origins,
            request_timeout_secs,
            environment,
            max_upload_bytes,
            storage,
        }
    }
}

fn storage_from_env(port: u16) -> StorageConfig {
    let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL").ok();
    let key_prefix = std::env::var("STORAGE_KEY_PREFIX").unwrap_or_else(|_| "lmscontent".into());

    let backend = match std::env::var("STORAGE_BACKEND")
        .unwrap_or_else(|_| "local".into())
        .to_ascii_lowercase()
        .as_str()
    {
        "local" => StorageBackend::Local {
            root: std::env::var("STORAGE_LOCAL_ROOT")
                .unwrap_or_else(|_| "storage".into())
                .into(),
            public_base_url: public_base_url
                .unwrap_or_else(|| format!("http://localhost:{port}/static")),
        },
        "s3" => {
            let bucket =
                std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set for s3 storage");
            let region = std::env::var("STORAGE_REGION").unwrap_or_else(|_| "ap-south-1".into());
            let public_base_url = public_base_url
                .unwrap_or_else(|| S3Config::default_public_base_url(&bucket, &region));
            StorageBackend::S3(S3Config {
                bucket,
                region,
                endpoint: std::env::var("STORAGE_ENDPOINT").ok(),
                public_base_url,
            })
        }
        other => panic!("STORAGE_BACKEND must be 'local' or 's3', got '{other}'"),
    };

    StorageConfig {
        backend,
        key_prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Dev ".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn only_development_exposes_detail() {
        assert!(Environment::Development.exposes_error_detail());
        assert!(!Environment::Production.exposes_error_detail());
    }
}
