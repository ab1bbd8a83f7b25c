use crate::{
    db::seed::seed_drinks,
    error::AppResult,
    models::{Drink, DrinkId},
    services::catalog::{matches_query, DrinkCatalog},
};

/// Read-only catalog held in memory
///
/// Used when no database is configured, and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    drinks: Vec<Drink>,
}

impl InMemoryCatalog {
    /// Builds a catalog from explicit records, sorted by id
    pub fn new(mut drinks: Vec<Drink>) -> Self {
        drinks.sort_by_key(|d| d.id);
        Self { drinks }
    }

    /// The British seed set with ids 1..=n in seed order
    pub fn seeded() -> Self {
        let drinks = seed_drinks()
            .into_iter()
            .zip(1..)
            .map(|(new_drink, id)| new_drink.into_drink(id))
            .collect();
        Self::new(drinks)
    }
}

#[async_trait::async_trait]
impl DrinkCatalog for InMemoryCatalog {
    async fn all_drinks(&self) -> AppResult<Vec<Drink>> {
        Ok(self.drinks.clone())
    }

    async fn get_drink(&self, id: DrinkId) -> AppResult<Option<Drink>> {
        Ok(self.drinks.iter().find(|d| d.id == id).cloned())
    }

    async fn drinks_by_type(&self, drink_type: &str) -> AppResult<Vec<Drink>> {
        let drink_type = drink_type.trim();
        Ok(self
            .drinks
            .iter()
            .filter(|d| d.drink_type.eq_ignore_ascii_case(drink_type))
            .cloned()
            .collect())
    }

    async fn search_drinks(&self, query: &str) -> AppResult<Vec<Drink>> {
        Ok(self
            .drinks
            .iter()
            .filter(|d| matches_query(d, query))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_catalog_has_stable_ids() {
        let catalog = InMemoryCatalog::seeded();
        let first = catalog.all_drinks().await.unwrap();
        let second = catalog.all_drinks().await.unwrap();

        assert_eq!(first.len(), 22);
        assert_eq!(first, second);
        assert_eq!(first[0].id, 1);
        assert_eq!(first[21].id, 22);
    }

    #[tokio::test]
    async fn test_seeded_catalog_has_both_categories() {
        let drinks = InMemoryCatalog::seeded().all_drinks().await.unwrap();
        assert_eq!(drinks.iter().filter(|d| !d.is_alcoholic()).count(), 7);
        assert_eq!(drinks.iter().filter(|d| d.is_alcoholic()).count(), 15);
    }

    #[tokio::test]
    async fn test_get_drink() {
        let catalog = InMemoryCatalog::seeded();
        let drink = catalog.get_drink(2).await.unwrap().unwrap();
        assert_eq!(drink.name, "Fuller's London Pride");
        assert!(catalog.get_drink(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_drinks_by_type_is_case_insensitive() {
        let catalog = InMemoryCatalog::seeded();
        let gins = catalog.drinks_by_type("GIN").await.unwrap();
        assert_eq!(gins.len(), 3);
        assert!(gins.iter().all(|d| d.drink_type == "gin"));
    }

    #[tokio::test]
    async fn test_search_matches_foods_and_notes() {
        let catalog = InMemoryCatalog::seeded();

        let smoky = catalog.search_drinks("smoky").await.unwrap();
        assert!(smoky.iter().any(|d| d.name == "Laphroaig 10 Year Old"));

        let curry = catalog.search_drinks("Curr").await.unwrap();
        assert!(curry.iter().any(|d| d.name == "Pusser's British Navy Rum"));
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let catalog = InMemoryCatalog::seeded();
        assert!(catalog.search_drinks("_").await.unwrap().is_empty());
        assert!(catalog.search_drinks("%").await.unwrap().is_empty());
    }

    #[test]
    fn test_new_sorts_by_id() {
        let mut drinks: Vec<Drink> = seed_drinks()
            .into_iter()
            .take(3)
            .zip([30, 10, 20])
            .map(|(d, id)| d.into_drink(id))
            .collect();
        drinks.reverse();

        let catalog = InMemoryCatalog::new(drinks);
        let ids: Vec<_> = catalog.drinks.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
