//! Business logic services

pub mod catalog;
pub mod users;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        let users = users::UsersService::new(repository.clone(), auth_config);
        users.ensure_bootstrap_admin().await?;

        Ok(Self {
            catalog: catalog::CatalogService::new(repository),
            users,
        })
    }
}
