pub mod drink;
pub mod pairing;

pub use drink::{Drink, DrinkId, DrinkSummary, NewDrink, NON_ALCOHOLIC_ABV};
pub use pairing::{
    MAX_KEY_CHARACTERISTICS, MAX_PAIRINGS, MIN_KEY_CHARACTERISTICS,
    CatalogSnapshot, Dish, DishAnalysis, GenerativeExplanation, GenerativePairingResponse,
    Pairing, PairingResult,
};
