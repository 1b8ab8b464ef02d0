//! Business logic services

pub mod catalog;
pub mod loans;

use std::sync::Arc;

use crate::{clock::Clock, config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(
                repository.clone(),
                catalog_config.recommendation_count,
            ),
            loans: loans::LoansService::new(repository, clock, catalog_config.loan_duration_days),
        }
    }
}
