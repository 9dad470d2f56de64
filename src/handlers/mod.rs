pub mod common;
pub mod products;
pub mod submissions;

use crate::{
    config::AppConfig,
    db::DbPool,
    notifications::NotificationDispatcher,
    services::{catalog::CatalogService, submissions::SubmissionService},
};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub submissions: Arc<SubmissionService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig, notifier: NotificationDispatcher) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(db_pool.clone(), config.media.clone())),
            submissions: Arc::new(SubmissionService::new(db_pool, notifier)),
        }
    }
}
