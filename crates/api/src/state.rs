use std::sync::Arc;

use festivo_dispatch::NotificationRouter;
use festivo_linking::LinkService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Collaborators are constructed once at process start and
/// injected here; there is no lazily built module-level state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: festivo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity resolution and account linking.
    pub link_service: Arc<LinkService>,
    /// Multi-channel notification dispatch.
    pub router: Arc<NotificationRouter>,
}
