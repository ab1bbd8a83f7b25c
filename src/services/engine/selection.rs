use std::cmp::Ordering;

use crate::models::Drink;

/// A drink with its per-request score. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub drink: &'a Drink,
    pub score: f64,
}

/// Descending score, then ascending id so equal scores rank reproducibly
fn by_rank(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.drink.id.cmp(&b.drink.id))
}

/// How many drinks to take from each alcohol category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub alcoholic_picks: usize,
    pub non_alcoholic_picks: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            alcoholic_picks: 2,
            non_alcoholic_picks: 1,
        }
    }
}

impl SelectionPolicy {
    /// Picks the top candidates of each category and returns them in final rank order.
    ///
    /// A category with fewer members than requested contributes what it has.
    pub fn select<'a>(&self, candidates: Vec<ScoredCandidate<'a>>) -> Vec<ScoredCandidate<'a>> {
        let (mut alcoholic, mut non_alcoholic): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|candidate| candidate.drink.is_alcoholic());

        alcoholic.sort_by(by_rank);
        non_alcoholic.sort_by(by_rank);

        alcoholic.truncate(self.alcoholic_picks);
        non_alcoholic.truncate(self.non_alcoholic_picks);

        let mut selected: Vec<_> = alcoholic.into_iter().chain(non_alcoholic).collect();
        selected.sort_by(by_rank);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drink(id: i32, abv: &str) -> Drink {
        Drink {
            id,
            name: format!("Drink {}", id),
            drink_type: if abv == "0%" { "tea" } else { "ale" }.to_string(),
            flavour_notes: "Malt".to_string(),
            region: "Yorkshire".to_string(),
            abv: abv.to_string(),
            recommended_foods: "Pie".to_string(),
            affiliate_link: "https://example.com".to_string(),
            description: "Test".to_string(),
            image_url: None,
        }
    }

    fn ids(selected: &[ScoredCandidate<'_>]) -> Vec<i32> {
        selected.iter().map(|c| c.drink.id).collect()
    }

    #[test]
    fn test_two_alcoholic_one_non_alcoholic() {
        let drinks = vec![
            drink(1, "4%"),
            drink(2, "5%"),
            drink(3, "6%"),
            drink(4, "0%"),
            drink(5, "0%"),
        ];
        let scores = [10.0, 50.0, 30.0, 5.0, 40.0];
        let candidates = drinks
            .iter()
            .zip(scores)
            .map(|(drink, score)| ScoredCandidate { drink, score })
            .collect();

        let selected = SelectionPolicy::default().select(candidates);
        assert_eq!(ids(&selected), vec![2, 5, 3]);
    }

    #[test]
    fn test_non_alcoholic_kept_even_when_outscored() {
        let drinks = vec![drink(1, "4%"), drink(2, "5%"), drink(3, "6%"), drink(4, "0%")];
        let scores = [90.0, 80.0, 70.0, 1.0];
        let candidates = drinks
            .iter()
            .zip(scores)
            .map(|(drink, score)| ScoredCandidate { drink, score })
            .collect();

        let selected = SelectionPolicy::default().select(candidates);
        assert_eq!(ids(&selected), vec![1, 2, 4]);
    }

    #[test]
    fn test_shortfall_without_non_alcoholic() {
        let drinks = vec![drink(1, "4%"), drink(2, "5%"), drink(3, "6%")];
        let candidates = drinks
            .iter()
            .map(|drink| ScoredCandidate { drink, score: 1.0 })
            .collect();

        let selected = SelectionPolicy::default().select(candidates);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|c| c.drink.is_alcoholic()));
    }

    #[test]
    fn test_shortfall_only_non_alcoholic() {
        let drinks = vec![drink(1, "0%"), drink(2, "0%")];
        let candidates = drinks
            .iter()
            .map(|drink| ScoredCandidate { drink, score: 1.0 })
            .collect();

        let selected = SelectionPolicy::default().select(candidates);
        assert_eq!(ids(&selected), vec![1]);
    }

    #[test]
    fn test_ties_broken_by_ascending_id() {
        let drinks = vec![drink(7, "4%"), drink(3, "4%"), drink(5, "4%"), drink(9, "0%")];
        let candidates = drinks
            .iter()
            .map(|drink| ScoredCandidate { drink, score: 12.0 })
            .collect();

        let selected = SelectionPolicy::default().select(candidates);
        assert_eq!(ids(&selected), vec![3, 5, 9]);
    }
}
