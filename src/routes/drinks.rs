use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Drink, DrinkId},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DrinkFilter {
    #[serde(rename = "type")]
    drink_type: Option<String>,
    q: Option<String>,
}

/// Handler for the drink listing, optionally filtered by type and free text
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DrinkFilter>,
) -> AppResult<Json<Vec<Drink>>> {
    let drink_type = filter.drink_type.filter(|t| !t.trim().is_empty());
    let query = filter.q.filter(|q| !q.trim().is_empty());

    let drinks = match (drink_type, query) {
        (None, None) => state.catalog.all_drinks().await?,
        (Some(drink_type), None) => state.catalog.drinks_by_type(&drink_type).await?,
        (drink_type, Some(query)) => {
            let mut found = state.catalog.search_drinks(&query).await?;
            if let Some(drink_type) = drink_type {
                found.retain(|d| d.drink_type.eq_ignore_ascii_case(drink_type.trim()));
            }
            found
        }
    };

    Ok(Json(drinks))
}

/// Handler for a single drink by id
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Drink>> {
    let id: DrinkId = id
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid drink id: {}", id)))?;

    state
        .catalog
        .get_drink(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Drink {} not found", id)))
}
