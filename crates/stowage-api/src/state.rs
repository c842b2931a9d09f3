//! Application state.
//!
//! One long-lived storage facade is constructed at startup from validated
//! configuration and injected into every handler through this state. The
//! facade resolves its credential chain once; handlers never build clients.

use std::sync::Arc;
use stowage_core::Config;
use stowage_storage::BlobStore;

/// Main application state shared across all requests.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn BlobStore>,
    pub config: Config,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
