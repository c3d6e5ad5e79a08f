use std::sync::Arc;

use sea_orm::DatabaseConnection;
use storefront_common::storage::ImageStore;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: Arc<dyn ImageStore>,
    pub config: AppConfig,
}
