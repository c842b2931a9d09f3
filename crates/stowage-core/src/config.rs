//! Configuration module
//!
//! Environment-backed configuration for the API and the storage facade.
//! Configuration is read once at startup; a missing storage endpoint is a
//! fatal construction error, not a call-time error.

use std::env;

use crate::storage_types::{CredentialProvider, StorageBackend};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_CONTAINER: &str = "samples";
const MAX_FILE_SIZE_MB: usize = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub storage_endpoint: Option<String>,
    pub storage_region: Option<String>,
    pub storage_container: String,
    pub credential_providers: Vec<CredentialProvider>,
    pub local_storage_path: Option<String>,
    // Upload limits
    pub max_file_size_bytes: usize,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3,
            "local" => StorageBackend::Local,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 's3' or 'local', got '{}'",
                    other
                ))
            }
        };

        let credential_providers = parse_credential_providers(
            &env::var("CREDENTIAL_PROVIDERS")
                .unwrap_or_else(|_| "profile,instance-metadata".to_string()),
        )?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            storage_backend,
            storage_endpoint: env::var("STORAGE_ENDPOINT").ok().filter(|s| !s.is_empty()),
            storage_region: env::var("STORAGE_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            storage_container: env::var("STORAGE_CONTAINER")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
            credential_providers,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.storage_endpoint.is_none() {
                    return Err(anyhow::anyhow!(
                        "STORAGE_ENDPOINT must be set when using the s3 storage backend"
                    ));
                }
                if self.storage_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "STORAGE_REGION or AWS_REGION must be set when using the s3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Parse the ordered `CREDENTIAL_PROVIDERS` list. An empty string yields an
/// empty list; that configuration is accepted here and rejected when the S3
/// facade is constructed, so the failure carries storage context.
fn parse_credential_providers(raw: &str) -> Result<Vec<CredentialProvider>, anyhow::Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            CredentialProvider::parse(s)
                .ok_or_else(|| anyhow::anyhow!("Unknown credential provider '{}'", s))
        })
        .collect()
}
