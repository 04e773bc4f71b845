//! User Store
//!
//! The persistence seam for accounts. Components never touch a database
//! handle directly; they receive an `Arc<dyn UserStore>` and work against
//! this trait.
//!
//! - **`postgres`** - sqlx/Postgres implementation used in production
//! - **`memory`** - in-process implementation used by tests and when no
//!   database is configured

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::members::model::Account;
use crate::members::pagination::{OrderBy, Page};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Fully-resolved member listing query. Gender defaulting and page-size
/// clamping happen at the boundary; the store receives final values.
#[derive(Debug, Clone)]
pub struct MemberQuery {
    /// The calling member, excluded from results.
    pub exclude_username: String,
    pub gender: String,
    pub min_age: u8,
    pub max_age: u8,
    pub order_by: OrderBy,
    pub page_number: u32,
    pub page_size: u32,
}

/// Port for account persistence.
///
/// `save` is an upsert: the whole account, photos included, is persisted
/// in one call. A failed save must leave the previously persisted state
/// intact.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by its lower-cased username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Whether an account with this lower-cased username exists.
    async fn exists(&self, username: &str) -> Result<bool, AppError>;

    /// Persist the account and all of its photos.
    async fn save(&self, account: &Account) -> Result<(), AppError>;

    /// One page of members matching the query.
    async fn list_members(&self, query: &MemberQuery) -> Result<Page<Account>, AppError>;
}
