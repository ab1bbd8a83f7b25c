use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

use super::{Drink, DrinkId, DrinkSummary};
use crate::error::{AppError, AppResult};

/// Most pairings returned for a single dish
pub const MAX_PAIRINGS: usize = 3;

/// Bounds on `DishAnalysis::key_characteristics`
pub const MIN_KEY_CHARACTERISTICS: usize = 3;
pub const MAX_KEY_CHARACTERISTICS: usize = 5;

/// A dish name submitted by the user, guaranteed non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    raw: String,
    lowered: String,
}

impl Dish {
    /// Validates user input. The original string is kept unmodified.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Ok(Self {
                raw: raw.to_string(),
                lowered: raw.trim().to_lowercase(),
            }),
            _ => Err(AppError::InvalidInput(
                "Dish parameter is required".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lowercased form used for keyword matching
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// First whitespace-delimited word of the lowered dish
    pub fn first_word(&self) -> &str {
        self.lowered.split_whitespace().next().unwrap_or_default()
    }
}

impl Display for Dish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Frozen, non-empty view of the catalog shared by every step of one request
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    drinks: Vec<Drink>,
}

impl CatalogSnapshot {
    pub fn new(drinks: Vec<Drink>) -> AppResult<Self> {
        if drinks.is_empty() {
            return Err(AppError::CatalogUnavailable(
                "No drinks available in database".to_string(),
            ));
        }
        Ok(Self { drinks })
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn get(&self, id: DrinkId) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }

    /// True when the catalog offers both alcoholic and non-alcoholic drinks
    pub fn has_both_categories(&self) -> bool {
        self.drinks.iter().any(Drink::is_alcoholic)
            && self.drinks.iter().any(|d| !d.is_alcoholic())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DishAnalysis {
    pub flavour_profile: String,
    pub key_characteristics: Vec<String>,
}

/// One recommended drink with its explanation and display score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub drink: DrinkSummary,
    pub explanation: String,
    /// Display score in 1..=100
    pub match_score: u8,
}

/// Response body of a pairing request, identical for both recommendation paths
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairingResult {
    pub dish: String,
    pub dish_analysis: DishAnalysis,
    pub pairings: Vec<Pairing>,
}

impl PairingResult {
    /// True when at least one alcoholic and one non-alcoholic drink were picked
    pub fn is_category_balanced(&self) -> bool {
        let non_alcoholic = |p: &Pairing| p.drink.abv.trim() == super::NON_ALCOHOLIC_ABV;
        self.pairings.iter().any(|p| non_alcoholic(p))
            && self.pairings.iter().any(|p| !non_alcoholic(p))
    }
}

// ============================================================================
// Generative Recommender API Types
// ============================================================================

/// JSON object the chat model is asked to produce
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativePairingResponse {
    pub dish_analysis: DishAnalysis,
    pub selected_drink_ids: Vec<DrinkId>,
    #[serde(default)]
    pub pairing_explanations: HashMap<String, GenerativeExplanation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeExplanation {
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub match_score: Option<i64>,
}
