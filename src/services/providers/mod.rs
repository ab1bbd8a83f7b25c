//! Generative pairing provider abstraction
//!
//! A provider receives the dish together with the request's frozen catalog
//! snapshot and returns a complete [`PairingResult`], or fails. Any failure is
//! recovered by the caller through the fallback engine, so providers are free
//! to be strict about what they accept from upstream.

use crate::{
    error::AppResult,
    models::{CatalogSnapshot, Dish, PairingResult},
};

pub mod cached;
pub mod openai;

pub use cached::CachedProvider;
pub use openai::OpenAiProvider;

pub use crate::models::MAX_PAIRINGS;

/// Trait for generative pairing recommenders
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PairingProvider: Send + Sync {
    /// Recommends drinks for a dish, referencing drinks by their catalog id
    async fn recommend(&self, dish: &Dish, snapshot: &CatalogSnapshot) -> AppResult<PairingResult>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
