use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared application state. The database handle is constructed once in
/// `main` and injected here; nothing in the crate reaches for a global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
