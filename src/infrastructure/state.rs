use std::sync::Arc;

use crate::infrastructure::{config::Config, store::DataStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DataStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<dyn DataStore>) -> Self {
        Self { config, store }
    }
}
