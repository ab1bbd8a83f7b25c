use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Drink, DrinkId},
    services::catalog::DrinkCatalog,
};

const SELECT_DRINKS: &str = r#"
    SELECT id, name, type, flavour_notes, region, abv, recommended_foods,
           affiliate_link, description, image_url
    FROM drinks
"#;

/// Lowercased `LIKE` pattern matching `query` literally anywhere in a column
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::from("%");
    for c in query.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Catalog backed by the `drinks` table
#[derive(Clone)]
pub struct PostgresCatalog {
    db_pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait::async_trait]
impl DrinkCatalog for PostgresCatalog {
    async fn all_drinks(&self) -> AppResult<Vec<Drink>> {
        let drinks = sqlx::query_as::<_, Drink>(&format!("{} ORDER BY id", SELECT_DRINKS))
            .fetch_all(&self.db_pool)
            .await?;

        tracing::debug!(count = drinks.len(), "Loaded drink catalog");
        Ok(drinks)
    }

    async fn get_drink(&self, id: DrinkId) -> AppResult<Option<Drink>> {
        let drink = sqlx::query_as::<_, Drink>(&format!("{} WHERE id = $1", SELECT_DRINKS))
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(drink)
    }

    async fn drinks_by_type(&self, drink_type: &str) -> AppResult<Vec<Drink>> {
        let drinks = sqlx::query_as::<_, Drink>(&format!(
            "{} WHERE LOWER(type) = LOWER($1) ORDER BY id",
            SELECT_DRINKS
        ))
        .bind(drink_type.trim())
        .fetch_all(&self.db_pool)
        .await?;
        Ok(drinks)
    }

    async fn search_drinks(&self, query: &str) -> AppResult<Vec<Drink>> {
        let drinks = sqlx::query_as::<_, Drink>(&format!(
            r#"{} WHERE LOWER(name) LIKE $1 ESCAPE '\'
                  OR LOWER(type) LIKE $1 ESCAPE '\'
                  OR LOWER(flavour_notes) LIKE $1 ESCAPE '\'
                  OR LOWER(recommended_foods) LIKE $1 ESCAPE '\'
               ORDER BY id"#,
            SELECT_DRINKS
        ))
        .bind(contains_pattern(query))
        .fetch_all(&self.db_pool)
        .await?;
        Ok(drinks)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_lowercases_and_trims() {
        assert_eq!(contains_pattern("  Fuller "), "%fuller%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("_"), r"%\_%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
