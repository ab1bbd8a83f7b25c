use serde::{Deserialize, Serialize};

/// ABV literal that marks a drink as non-alcoholic
pub const NON_ALCOHOLIC_ABV: &str = "0%";

/// Stable catalog identity of a drink
pub type DrinkId = i32;

/// A single British drink in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    pub id: DrinkId,
    pub name: String,
    /// Categorical tag such as "ale", "cider", "tea" or "soft drink"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub drink_type: String,
    /// Comma-delimited flavour descriptors
    pub flavour_notes: String,
    pub region: String,
    pub abv: String,
    /// Comma-delimited foods this drink is known to go with
    pub recommended_foods: String,
    pub affiliate_link: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl Drink {
    pub fn is_alcoholic(&self) -> bool {
        self.abv.trim() != NON_ALCOHOLIC_ABV
    }

    /// First comma-delimited flavour descriptor, lowercased
    pub fn lead_flavour_note(&self) -> Option<String> {
        self.flavour_notes
            .split(',')
            .map(str::trim)
            .find(|note| !note.is_empty())
            .map(str::to_lowercase)
    }
}

/// Drink fields used when inserting seed data; the id is assigned by the catalog
#[derive(Debug, Clone)]
pub struct NewDrink {
    pub name: &'static str,
    pub drink_type: &'static str,
    pub flavour_notes: &'static str,
    pub region: &'static str,
    pub abv: &'static str,
    pub recommended_foods: &'static str,
    pub affiliate_link: &'static str,
    pub description: &'static str,
    pub image_url: Option<&'static str>,
}

impl NewDrink {
    pub fn into_drink(self, id: DrinkId) -> Drink {
        Drink {
            id,
            name: self.name.to_string(),
            drink_type: self.drink_type.to_string(),
            flavour_notes: self.flavour_notes.to_string(),
            region: self.region.to_string(),
            abv: self.abv.to_string(),
            recommended_foods: self.recommended_foods.to_string(),
            affiliate_link: self.affiliate_link.to_string(),
            description: self.description.to_string(),
            image_url: self.image_url.map(str::to_string),
        }
    }
}

/// Public subset of a drink returned inside a pairing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrinkSummary {
    pub id: DrinkId,
    pub name: String,
    #[serde(rename = "type")]
    pub drink_type: String,
    pub flavour_notes: String,
    pub region: String,
    pub abv: String,
    pub affiliate_link: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<&Drink> for DrinkSummary {
    fn from(drink: &Drink) -> Self {
        Self {
            id: drink.id,
            name: drink.name.clone(),
            drink_type: drink.drink_type.clone(),
            flavour_notes: drink.flavour_notes.clone(),
            region: drink.region.clone(),
            abv: drink.abv.clone(),
            affiliate_link: drink.affiliate_link.clone(),
            description: drink.description.clone(),
            image_url: drink.image_url.clone(),
        }
    }
}
