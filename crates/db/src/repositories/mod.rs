use async_trait::async_trait;
use thiserror::Error;

use menubot_core::domain::catalogue::{CatalogueId, CatalogueItem};
use menubot_core::domain::order::CustomerOrder;
use menubot_core::domain::user::{ProfileField, UserInfo};
use menubot_core::errors::ApplicationError;

pub mod catalogue;
pub mod memory;
pub mod order;
pub mod user;

pub use catalogue::SqlCatalogueRepository;
pub use memory::{InMemoryCatalogueRepository, InMemoryOrderRepository, InMemoryUserRepository};
pub use order::SqlOrderRepository;
pub use user::SqlUserRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        Self::Persistence(value.to_string())
    }
}

/// Result of looking a sender up by cell number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserLookup {
    pub user: UserInfo,
    /// `false` when this lookup created the user.
    pub existed: bool,
}

#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Items of one catalogue ordered by item number.
    async fn load_catalogue_items(
        &self,
        catalogue_id: &CatalogueId,
    ) -> Result<Vec<CatalogueItem>, RepositoryError>;

    async fn save_items(&self, items: Vec<CatalogueItem>) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// The newest order for `cell_number` that is neither paid nor closed.
    async fn load_current_order(
        &self,
        cell_number: &str,
    ) -> Result<Option<CustomerOrder>, RepositoryError>;

    /// Inserts the order when it has no id yet, otherwise updates it. Returns the
    /// stored order with its id assigned.
    async fn save_order(&self, order: CustomerOrder) -> Result<CustomerOrder, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_or_create(&self, cell_number: &str) -> Result<UserLookup, RepositoryError>;

    async fn update_field(
        &self,
        cell_number: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<UserInfo, RepositoryError>;
}
