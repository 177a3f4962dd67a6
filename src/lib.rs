pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::Config;
use storage::Storage;

/// Shared application state passed to every request handler.
///
/// Constructed once in `main` (and per-test in the integration suites) so
/// the store handle is injected explicitly rather than living in a global.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub storage: Arc<Storage>,
}
