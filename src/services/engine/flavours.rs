use std::collections::BTreeSet;

use crate::models::Dish;

/// Dish keyword and the flavour descriptors expected to complement it
#[derive(Debug, Clone, PartialEq)]
pub struct FlavourEntry {
    pub keyword: String,
    pub descriptors: Vec<String>,
}

/// Static mapping from dish keywords to complementary flavour descriptors
///
/// Matching is substring containment against the lowercased dish, so one dish
/// can hit several entries ("beef curry" hits both "beef" and "curry").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlavourTable {
    entries: Vec<FlavourEntry>,
}

impl FlavourTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Keyword and descriptors are stored lowercased.
    pub fn with_entry(mut self, keyword: &str, descriptors: &[&str]) -> Self {
        self.entries.push(FlavourEntry {
            keyword: keyword.trim().to_lowercase(),
            descriptors: descriptors
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        });
        self
    }

    /// Standard table of British dish keywords
    pub fn british() -> Self {
        Self::new()
            .with_entry("beef", &["malt", "caramel", "rich", "roast", "oak", "robust"])
            .with_entry("steak", &["malt", "rich", "oak", "robust", "peat"])
            .with_entry("lamb", &["herb", "berry", "fruity", "oak", "juniper"])
            .with_entry("pork", &["apple", "crisp", "sweet", "honey"])
            .with_entry("sausage", &["malt", "apple", "biscuit", "hoppy"])
            .with_entry("banger", &["malt", "apple", "biscuit", "hoppy"])
            .with_entry("chicken", &["apple", "citrus", "floral", "light", "crisp"])
            .with_entry("fish", &["citrus", "crisp", "light", "lemon", "hoppy", "refreshing"])
            .with_entry("chips", &["crisp", "citrus", "refreshing"])
            .with_entry("seafood", &["citrus", "mineral", "crisp", "cucumber", "light"])
            .with_entry("salmon", &["smoky", "cucumber", "citrus", "peat"])
            .with_entry("oyster", &["mineral", "peat", "smoky", "brioche"])
            .with_entry("curry", &["ginger", "spice", "citrus", "refreshing", "sweet"])
            .with_entry("tikka", &["ginger", "spice", "citrus", "refreshing"])
            .with_entry("spicy", &["ginger", "refreshing", "sweet", "citrus"])
            .with_entry("cheese", &["apple", "crisp", "hoppy", "fruity", "oak"])
            .with_entry("rarebit", &["malt", "hoppy", "biscuit"])
            .with_entry("pie", &["malt", "biscuit", "rich", "hoppy"])
            .with_entry("pasty", &["malt", "biscuit", "crisp"])
            .with_entry("roast", &["malt", "rich", "biscuit", "robust"])
            .with_entry("breakfast", &["malt", "robust", "brisk", "bergamot"])
            .with_entry("game", &["fruitcake", "rich", "peat", "blackcurrant"])
            .with_entry("venison", &["fruitcake", "rich", "blackcurrant", "oak"])
            .with_entry("smoked", &["peat", "smoky", "oak"])
            .with_entry("salad", &["cucumber", "floral", "elderflower", "light", "crisp"])
            .with_entry("dessert", &["toffee", "vanilla", "butterscotch", "sweet", "honey"])
            .with_entry("pudding", &["toffee", "fruitcake", "butterscotch", "sweet"])
            .with_entry("chocolate", &["vanilla", "butterscotch", "molasses", "oak", "rich"])
            .with_entry("cake", &["bergamot", "floral", "sweet", "honey"])
            .with_entry("scone", &["bergamot", "floral", "brisk"])
    }

    pub fn entries(&self) -> &[FlavourEntry] {
        &self.entries
    }

    /// Union of the descriptors of every entry whose keyword occurs in the dish.
    /// An empty set is a normal outcome.
    pub fn relevant_flavours(&self, dish: &Dish) -> BTreeSet<String> {
        let dish = dish.lowered();
        self.entries
            .iter()
            .filter(|entry| !entry.keyword.is_empty() && dish.contains(entry.keyword.as_str()))
            .flat_map(|entry| entry.descriptors.iter().cloned())
            .collect()
    }
}
