use std::sync::Arc;

use common::storage::PhotoStore;

use crate::config::AppConfig;
use crate::inventory::Inventory;

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, photos: Arc<dyn PhotoStore>) -> Self {
        Self {
            inventory: Arc::new(Inventory::new(photos, config.server.origin())),
            config,
        }
    }
}
