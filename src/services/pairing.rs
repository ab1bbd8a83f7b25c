use crate::{
    error::AppResult,
    models::{CatalogSnapshot, Dish, PairingResult},
    services::{
        catalog::DrinkCatalog,
        engine::{FallbackEngine, JitterSource},
        providers::PairingProvider,
    },
};

/// Produces drink pairings for a dish.
///
/// The dish is validated before the catalog is touched. The catalog is read
/// once into a snapshot shared by the generative provider and the fallback
/// engine. Any provider failure falls through to the engine, so the only errors
/// surfaced are a blank dish, an empty catalog or a failing catalog backend.
pub async fn recommend_pairing(
    catalog: &dyn DrinkCatalog,
    recommender: Option<&dyn PairingProvider>,
    engine: &FallbackEngine,
    jitter: JitterSource,
    raw_dish: Option<&str>,
) -> AppResult<PairingResult> {
    let dish = Dish::parse(raw_dish)?;
    let snapshot = CatalogSnapshot::new(catalog.all_drinks().await?)?;

    if let Some(provider) = recommender {
        match provider.recommend(&dish, &snapshot).await {
            Ok(result) => {
                tracing::info!(
                    dish = %dish,
                    provider = provider.name(),
                    pairings = result.pairings.len(),
                    "Generative pairing served"
                );
                return Ok(result);
            }
            Err(e) => {
                tracing::warn!(
                    dish = %dish,
                    provider = provider.name(),
                    error = %e,
                    "Generative pairing failed, using fallback engine"
                );
            }
        }
    }

    let result = engine.recommend(&dish, &snapshot, &mut jitter.rng());
    tracing::info!(
        dish = %dish,
        catalog = catalog.name(),
        pairings = result.pairings.len(),
        "Fallback pairing served"
    );

    Ok(result)
}
