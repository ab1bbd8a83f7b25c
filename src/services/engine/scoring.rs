use rand::Rng;
use std::collections::BTreeSet;

use crate::models::{Dish, Drink};

/// What a categorical rule checks on the drink side
#[derive(Debug, Clone, PartialEq)]
pub enum RuleTarget {
    /// Drink type equals one of these tags (case-insensitive)
    DrinkType(Vec<String>),
    /// Flavour notes contain this descriptor
    FlavourNote(String),
}

/// Dish keyword × drink attribute rule awarding a fixed bonus
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub dish_keyword: String,
    pub target: RuleTarget,
    pub bonus: f64,
}

impl CategoryRule {
    pub fn for_types(dish_keyword: &str, types: &[&str], bonus: f64) -> Self {
        Self {
            dish_keyword: dish_keyword.to_lowercase(),
            target: RuleTarget::DrinkType(types.iter().map(|t| t.to_lowercase()).collect()),
            bonus: bonus.max(0.0),
        }
    }

    pub fn for_flavour(dish_keyword: &str, note: &str, bonus: f64) -> Self {
        Self {
            dish_keyword: dish_keyword.to_lowercase(),
            target: RuleTarget::FlavourNote(note.to_lowercase()),
            bonus: bonus.max(0.0),
        }
    }

    fn applies(&self, dish: &str, drink_type: &str, flavour_notes: &str) -> bool {
        if !dish.contains(self.dish_keyword.as_str()) {
            return false;
        }
        match &self.target {
            RuleTarget::DrinkType(types) => types.iter().any(|t| t == drink_type),
            RuleTarget::FlavourNote(note) => flavour_notes.contains(note.as_str()),
        }
    }
}

/// Standard British dish × drink rules
pub fn british_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::for_types("fish", &["ale", "wine"], 20.0),
        CategoryRule::for_types("beef", &["ale", "whisky"], 20.0),
        CategoryRule::for_types("chicken", &["cider", "wine"], 20.0),
        CategoryRule::for_types("pork", &["cider"], 25.0),
        CategoryRule::for_types("curry", &["ale", "rum", "soft drink"], 20.0),
        CategoryRule::for_types("cheese", &["cider", "ale"], 20.0),
        CategoryRule::for_types("pie", &["ale"], 25.0),
        CategoryRule::for_types("roast", &["ale", "tea"], 25.0),
        CategoryRule::for_types("breakfast", &["tea"], 30.0),
        CategoryRule::for_types("spicy", &["soft drink"], 25.0),
        CategoryRule::for_types("salmon", &["gin", "whisky"], 15.0),
        CategoryRule::for_types("dessert", &["rum", "whisky", "cider"], 15.0),
        CategoryRule::for_types("scone", &["tea"], 25.0),
        CategoryRule::for_types("cake", &["tea"], 20.0),
        CategoryRule::for_flavour("curry", "ginger", 15.0),
        CategoryRule::for_flavour("spicy", "ginger", 15.0),
        CategoryRule::for_flavour("fish", "citrus", 10.0),
        CategoryRule::for_flavour("smoked", "peat", 15.0),
        CategoryRule::for_flavour("chocolate", "vanilla", 10.0),
    ]
}

/// Additive weights for the scoring rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Per matching recommended-food token
    pub food_match: f64,
    /// Per relevant flavour descriptor found in the drink's notes
    pub flavour_match: f64,
    /// Small/independent producer signal in the description
    pub producer_bonus: f64,
    /// Exclusive upper bound of the uniform tie-break jitter; 0 disables it
    pub jitter_max: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            food_match: 30.0,
            flavour_match: 10.0,
            producer_bonus: 5.0,
            jitter_max: 2.0,
        }
    }
}

pub const DEFAULT_PRODUCER_WORDS: [&str; 4] = ["micro", "craft", "independent", "family"];

/// Rule-based affinity scorer between a dish and a drink
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    pub(crate) weights: ScoringWeights,
    pub(crate) rules: Vec<CategoryRule>,
    pub(crate) producer_words: Vec<String>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            rules: british_rules(),
            producer_words: DEFAULT_PRODUCER_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Scorer {
    /// Scores a drink against a dish. Always returns a finite value >= 0.
    ///
    /// The randomness source is only drawn from when jitter is enabled.
    pub fn score<R: Rng>(
        &self,
        dish: &Dish,
        drink: &Drink,
        relevant_flavours: &BTreeSet<String>,
        rng: &mut R,
    ) -> f64 {
        let base = self.rule_score(dish, drink, relevant_flavours);
        if self.weights.jitter_max > 0.0 {
            base + rng.gen_range(0.0..self.weights.jitter_max)
        } else {
            base
        }
    }

    /// Deterministic part of the score
    pub fn rule_score(&self, dish: &Dish, drink: &Drink, relevant_flavours: &BTreeSet<String>) -> f64 {
        let dish_lower = dish.lowered();
        let first_word = dish.first_word();
        let flavour_notes = drink.flavour_notes.to_lowercase();
        let drink_type = drink.drink_type.trim().to_lowercase();

        let mut score = 0.0;

        // Recommended foods, either direction of containment
        for food in drink
            .recommended_foods
            .split(',')
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
        {
            if dish_lower.contains(food.as_str())
                || (!first_word.is_empty() && food.contains(first_word))
            {
                score += self.weights.food_match;
            }
        }

        for descriptor in relevant_flavours {
            if flavour_notes.contains(descriptor.as_str()) {
                score += self.weights.flavour_match;
            }
        }

        score += self
            .rules
            .iter()
            .filter(|rule| rule.applies(dish_lower, &drink_type, &flavour_notes))
            .map(|rule| rule.bonus)
            .sum::<f64>();

        let description = drink.description.to_lowercase();
        if self
            .producer_words
            .iter()
            .any(|word| description.contains(word.as_str()))
        {
            score += self.weights.producer_bonus;
        }

        score
    }
}
