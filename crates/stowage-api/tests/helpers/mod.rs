//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p stowage-api --test files_test` or
//! `cargo test -p stowage-api`.

pub mod storage;

use axum_test::TestServer;
use std::sync::Arc;
use stowage_api::constants;
use stowage_api::setup::routes;
use stowage_api::state::AppState;
use stowage_core::{Config, CredentialProvider, StorageBackend};
use stowage_storage::{BlobStore, LocalBlobStore};

use storage::TestStorage;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus owned storage directory.
pub struct TestApp {
    pub server: TestServer,
    pub _storage: TestStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with an isolated local storage directory.
pub async fn setup_test_app() -> TestApp {
    let test_storage = TestStorage::new();

    let storage: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::new(test_storage.base_path.clone())
            .await
            .expect("Failed to create local storage"),
    );

    let config = create_test_config(&test_storage);

    let state = Arc::new(AppState {
        storage,
        config: config.clone(),
        is_production: false,
    });

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _storage: test_storage,
    }
}

fn create_test_config(test_storage: &TestStorage) -> Config {
    Config {
        server_port: 3000,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        storage_backend: StorageBackend::Local,
        storage_endpoint: None,
        storage_region: None,
        storage_container: "samples".to_string(),
        credential_providers: vec![
            CredentialProvider::Profile,
            CredentialProvider::InstanceMetadata,
        ],
        local_storage_path: Some(test_storage.base_path.to_string_lossy().to_string()),
        max_file_size_bytes: 10 * 1024 * 1024,
    }
}

