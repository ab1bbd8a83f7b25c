//! Drink catalog abstraction
//!
//! The pairing service only needs to read the full catalog; the listing routes
//! also look drinks up by id, type and free-text query. Implementations must keep
//! ids stable for the lifetime of the process.

use crate::{
    error::AppResult,
    models::{Drink, DrinkId},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;

/// Trait for drink catalog backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DrinkCatalog: Send + Sync {
    /// Every drink, ordered by ascending id
    async fn all_drinks(&self) -> AppResult<Vec<Drink>>;

    /// Single drink by id
    async fn get_drink(&self, id: DrinkId) -> AppResult<Option<Drink>>;

    /// Drinks of one type (case-insensitive)
    async fn drinks_by_type(&self, drink_type: &str) -> AppResult<Vec<Drink>>;

    /// Case-insensitive substring search over name, type, flavour notes and foods
    async fn search_drinks(&self, query: &str) -> AppResult<Vec<Drink>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Shared matcher so every backend answers searches identically
pub(crate) fn matches_query(drink: &Drink, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    [
        &drink.name,
        &drink.drink_type,
        &drink.flavour_notes,
        &drink.recommended_foods,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query.as_str()))
}
