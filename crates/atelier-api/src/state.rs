//! Application state.

use std::sync::Arc;

use atelier_core::Config;

use crate::auth::DynAuthenticator;
use crate::services::WorkService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: WorkService,
    pub authenticator: DynAuthenticator,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}

/// Convenience alias used by handlers.
pub type SharedState = Arc<AppState>;
