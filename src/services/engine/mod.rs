//! Deterministic fallback pairing engine
//!
//! Maps a dish to a ranked, category-balanced set of drinks using keyword and
//! flavour heuristics. Runs whenever the generative recommender is missing,
//! fails or returns something unusable. Pure and synchronous: every call works
//! on the caller's catalog snapshot and allocates its own scratch state.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::{
    CatalogSnapshot, Dish, PairingResult, MAX_KEY_CHARACTERISTICS, MAX_PAIRINGS,
    MIN_KEY_CHARACTERISTICS,
};

pub mod assembler;
pub mod explanation;
pub mod flavours;
pub mod scoring;
pub mod selection;

pub use assembler::Assembler;
pub use flavours::FlavourTable;
pub use scoring::{CategoryRule, RuleTarget, Scorer, ScoringWeights};
pub use selection::{ScoredCandidate, SelectionPolicy};

/// Where the per-request jitter randomness comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JitterSource {
    /// Fresh OS entropy for every request
    #[default]
    Entropy,
    /// Same seed for every request, so identical input gives identical output
    Seeded(u64),
}

impl JitterSource {
    pub fn rng(&self) -> StdRng {
        match self {
            JitterSource::Entropy => StdRng::from_entropy(),
            JitterSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

impl From<Option<u64>> for JitterSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map(JitterSource::Seeded).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackEngine {
    flavours: FlavourTable,
    scorer: Scorer,
    policy: SelectionPolicy,
    assembler: Assembler,
}

impl Default for FallbackEngine {
    /// Standard British tables, rules and weights
    fn default() -> Self {
        Self {
            flavours: FlavourTable::british(),
            scorer: Scorer::default(),
            policy: SelectionPolicy::default(),
            assembler: Assembler::default(),
        }
    }
}

impl FallbackEngine {
    /// Starts from the default configuration
    pub fn builder() -> FallbackEngineBuilder {
        FallbackEngineBuilder {
            engine: Self::default(),
        }
    }

    /// Ranks drinks from the snapshot against the dish.
    ///
    /// Infallible: both preconditions (non-blank dish, non-empty catalog) are
    /// carried by the argument types, so the result always holds 1 to 3 pairings
    /// with the default policy.
    pub fn recommend<R: Rng>(
        &self,
        dish: &Dish,
        snapshot: &CatalogSnapshot,
        rng: &mut R,
    ) -> PairingResult {
        let relevant_flavours = self.flavours.relevant_flavours(dish);

        let candidates: Vec<ScoredCandidate<'_>> = snapshot
            .drinks()
            .iter()
            .map(|drink| ScoredCandidate {
                drink,
                score: self.scorer.score(dish, drink, &relevant_flavours, rng),
            })
            .collect();

        let ranked = self.policy.select(candidates);

        tracing::debug!(
            dish = %dish,
            relevant_flavours = relevant_flavours.len(),
            catalog_size = snapshot.len(),
            ranked = ?ranked
                .iter()
                .map(|c| (c.drink.id, c.score))
                .collect::<Vec<_>>(),
            "Fallback ranking computed"
        );

        self.assembler.assemble(dish, &ranked)
    }
}

/// Configures keyword tables, rules and weights of a [`FallbackEngine`]
#[derive(Debug, Clone)]
pub struct FallbackEngineBuilder {
    engine: FallbackEngine,
}

impl FallbackEngineBuilder {
    pub fn flavour_table(mut self, table: FlavourTable) -> Self {
        self.engine.flavours = table;
        self
    }

    pub fn rule(mut self, rule: CategoryRule) -> Self {
        self.engine.scorer.rules.push(rule);
        self
    }

    /// Replaces every categorical rule
    pub fn rules(mut self, rules: Vec<CategoryRule>) -> Self {
        self.engine.scorer.rules = rules;
        self
    }

    pub fn food_match_bonus(mut self, bonus: f64) -> Self {
        self.engine.scorer.weights.food_match = bonus.max(0.0);
        self
    }

    pub fn flavour_match_bonus(mut self, bonus: f64) -> Self {
        self.engine.scorer.weights.flavour_match = bonus.max(0.0);
        self
    }

    pub fn producer_bonus(mut self, bonus: f64) -> Self {
        self.engine.scorer.weights.producer_bonus = bonus.max(0.0);
        self
    }

    pub fn producer_words(mut self, words: &[&str]) -> Self {
        self.engine.scorer.producer_words = words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    /// Upper bound of the tie-break jitter. Zero turns it off.
    pub fn jitter_max(mut self, jitter_max: f64) -> Self {
        self.engine.scorer.weights.jitter_max = if jitter_max.is_finite() {
            jitter_max.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Picks per category. Each category needs at least one pick and the total
    /// may not exceed [`MAX_PAIRINGS`]; anything else keeps the current policy.
    pub fn picks(mut self, alcoholic: usize, non_alcoholic: usize) -> Self {
        if alcoholic == 0 || non_alcoholic == 0 || alcoholic + non_alcoholic > MAX_PAIRINGS {
            tracing::warn!(alcoholic, non_alcoholic, "Ignoring pick counts outside 1..={}", MAX_PAIRINGS);
            return self;
        }
        self.engine.policy = SelectionPolicy {
            alcoholic_picks: alcoholic,
            non_alcoholic_picks: non_alcoholic,
        };
        self
    }

    /// Top-rank score and per-rank decrement. Rejected unless every rank up to
    /// [`MAX_PAIRINGS`] gets a distinct score of at least 1.
    pub fn match_scores(mut self, base: u8, step: u8) -> Self {
        let lowest = (base as usize).checked_sub(step as usize * (MAX_PAIRINGS - 1));
        if base > 100 || step == 0 || !matches!(lowest, Some(l) if l >= 1) {
            tracing::warn!(base, step, "Ignoring match scores that would not strictly descend");
            return self;
        }
        self.engine.assembler.base_match_score = base;
        self.engine.assembler.match_score_step = step;
        self
    }

    /// Generic characteristics for the dish analysis, 3 to 5 non-blank entries
    pub fn key_characteristics(mut self, characteristics: &[&str]) -> Self {
        let cleaned: Vec<String> = characteristics
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if cleaned.len() != characteristics.len()
            || !(MIN_KEY_CHARACTERISTICS..=MAX_KEY_CHARACTERISTICS).contains(&cleaned.len())
        {
            tracing::warn!(count = characteristics.len(), "Ignoring key characteristics outside 3..=5 non-blank entries");
            return self;
        }
        self.engine.assembler.key_characteristics = cleaned;
        self
    }

    pub fn build(self) -> FallbackEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Drink;

    fn drink(id: i32, drink_type: &str, abv: &str, foods: &str) -> Drink {
        Drink {
            id,
            name: format!("Drink {}", id),
            drink_type: drink_type.to_string(),
            flavour_notes: "Smooth".to_string(),
            region: "Kent".to_string(),
            abv: abv.to_string(),
            recommended_foods: foods.to_string(),
            affiliate_link: "https://example.com".to_string(),
            description: "Test".to_string(),
            image_url: None,
        }
    }

    fn snapshot(drinks: Vec<Drink>) -> CatalogSnapshot {
        CatalogSnapshot::new(drinks).unwrap()
    }

    #[test]
    fn test_keyword_sensitivity() {
        let engine = FallbackEngine::builder().jitter_max(0.0).build();
        let catalog = snapshot(vec![
            drink(1, "wine", "12%", "Oysters, Canapés"),
            drink(2, "wine", "12%", "Curry, Rice dishes"),
        ]);
        let dish = Dish::parse(Some("chicken curry")).unwrap();

        let result = engine.recommend(&dish, &catalog, &mut JitterSource::Seeded(1).rng());
        assert_eq!(result.pairings[0].drink.id, 2);
    }

    #[test]
    fn test_single_record_gets_base_score() {
        let engine = FallbackEngine::default();
        let catalog = snapshot(vec![drink(4, "ale", "4%", "Pie")]);
        let dish = Dish::parse(Some("Anything")).unwrap();

        let result = engine.recommend(&dish, &catalog, &mut JitterSource::Entropy.rng());
        assert_eq!(result.pairings.len(), 1);
        assert_eq!(result.pairings[0].drink.id, 4);
        assert_eq!(result.pairings[0].match_score, 95);
    }

    #[test]
    fn test_builder_overrides_picks_and_scores() {
        let engine = FallbackEngine::builder()
            .jitter_max(0.0)
            .picks(1, 1)
            .match_scores(80, 10)
            .key_characteristics(&["crispy", "salty", "comforting", "golden"])
            .build();
        let catalog = snapshot(vec![
            drink(1, "ale", "4%", "Pie"),
            drink(2, "ale", "4%", "Pie"),
            drink(3, "tea", "0%", "Scones"),
        ]);
        let dish = Dish::parse(Some("Pie")).unwrap();

        let result = engine.recommend(&dish, &catalog, &mut JitterSource::Seeded(0).rng());
        let scores: Vec<u8> = result.pairings.iter().map(|p| p.match_score).collect();
        assert_eq!(result.pairings.len(), 2);
        assert_eq!(scores, vec![80, 70]);
        assert_eq!(result.dish_analysis.key_characteristics.len(), 4);
    }

    #[test]
    fn test_builder_rejects_out_of_range_picks() {
        let defaults = FallbackEngine::default();
        for (alcoholic, non_alcoholic) in [(0, 0), (0, 1), (1, 0), (5, 5), (3, 1)] {
            let engine = FallbackEngine::builder().picks(alcoholic, non_alcoholic).build();
            assert_eq!(engine.policy, defaults.policy);
        }

        let engine = FallbackEngine::builder().picks(1, 2).build();
        assert_eq!(engine.policy.non_alcoholic_picks, 2);
    }

    #[test]
    fn test_builder_rejects_collapsing_match_scores() {
        let defaults = FallbackEngine::default();
        for (base, step) in [(5, 5), (10, 5), (101, 1), (95, 0), (0, 1)] {
            let engine = FallbackEngine::builder().match_scores(base, step).build();
            assert_eq!(engine.assembler, defaults.assembler);
        }

        let engine = FallbackEngine::builder().match_scores(11, 5).build();
        assert_eq!(engine.assembler.match_score(2), 1);
    }

    #[test]
    fn test_builder_rejects_bad_key_characteristics() {
        let defaults = FallbackEngine::default();
        let too_many = ["a", "b", "c", "d", "e", "f"];
        for characteristics in [&[][..], &["one", "two"][..], &too_many[..], &["a", " ", "c"][..]] {
            let engine = FallbackEngine::builder().key_characteristics(characteristics).build();
            assert_eq!(engine.assembler, defaults.assembler);
        }
    }

    #[test]
    fn test_rejected_settings_keep_output_invariants() {
        let engine = FallbackEngine::builder()
            .picks(0, 0)
            .picks(5, 5)
            .match_scores(5, 5)
            .key_characteristics(&[])
            .build();
        let catalog = snapshot(vec![
            drink(1, "ale", "4%", "Pie"),
            drink(2, "ale", "4%", "Pie"),
            drink(3, "cider", "5%", "Pie"),
            drink(4, "tea", "0%", "Scones"),
            drink(5, "soft drink", "0%", "Scones"),
        ]);
        let dish = Dish::parse(Some("Pie")).unwrap();

        let result = engine.recommend(&dish, &catalog, &mut JitterSource::Seeded(3).rng());
        let scores: Vec<u8> = result.pairings.iter().map(|p| p.match_score).collect();
        assert_eq!(scores, vec![95, 90, 85]);
        assert_eq!(result.dish_analysis.key_characteristics.len(), 3);
    }

    #[test]
    fn test_builder_sanitises_jitter() {
        let engine = FallbackEngine::builder().jitter_max(f64::NAN).build();
        assert_eq!(engine.scorer.weights.jitter_max, 0.0);
        let engine = FallbackEngine::builder().jitter_max(-3.0).build();
        assert_eq!(engine.scorer.weights.jitter_max, 0.0);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let engine = FallbackEngine::default();
        let catalog = snapshot(vec![
            drink(1, "ale", "4%", "Steak pie"),
            drink(2, "ale", "4%", "Steak pie"),
            drink(3, "cider", "5%", "Steak pie"),
            drink(4, "tea", "0%", "Cake"),
            drink(5, "soft drink", "0%", "Cake"),
        ]);
        let dish = Dish::parse(Some("Steak pie")).unwrap();
        let source = JitterSource::from(Some(99));

        let first = engine.recommend(&dish, &catalog, &mut source.rng());
        let second = engine.recommend(&dish, &catalog, &mut source.rng());
        assert_eq!(first, second);
    }
}
