use super::{explanation::explain, selection::ScoredCandidate};
use crate::models::{Dish, DishAnalysis, DrinkSummary, Pairing, PairingResult};

pub const DEFAULT_KEY_CHARACTERISTICS: [&str; 3] = ["savoury", "hearty", "traditional"];

/// Packages ranked candidates into the public pairing result
///
/// Match scores come from rank position only; raw scores never leave the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembler {
    pub(crate) base_match_score: u8,
    pub(crate) match_score_step: u8,
    pub(crate) key_characteristics: Vec<String>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self {
            base_match_score: 95,
            match_score_step: 5,
            key_characteristics: DEFAULT_KEY_CHARACTERISTICS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Assembler {
    /// Display score for a 0-based rank, kept within 1..=100
    pub fn match_score(&self, rank: usize) -> u8 {
        let decrement = (self.match_score_step as usize).saturating_mul(rank);
        (self.base_match_score as usize)
            .saturating_sub(decrement)
            .clamp(1, 100) as u8
    }

    pub fn dish_analysis(&self, dish: &Dish) -> DishAnalysis {
        DishAnalysis {
            flavour_profile: format!(
                "{} is a delicious dish that pairs wonderfully with British drinks - both alcoholic and non-alcoholic options available.",
                dish.as_str().trim()
            ),
            key_characteristics: self.key_characteristics.clone(),
        }
    }

    pub fn assemble(&self, dish: &Dish, ranked: &[ScoredCandidate<'_>]) -> PairingResult {
        let pairings = ranked
            .iter()
            .enumerate()
            .map(|(rank, candidate)| Pairing {
                drink: DrinkSummary::from(candidate.drink),
                explanation: explain(candidate.drink, dish),
                match_score: self.match_score(rank),
            })
            .collect();

        PairingResult {
            dish: dish.as_str().to_string(),
            dish_analysis: self.dish_analysis(dish),
            pairings,
        }
    }
}
