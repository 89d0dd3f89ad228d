use std::cmp::Ordering;

use crate::domain::prediction::{PredictionResult, ScoredMaterial};

/// Orders by final score, best first, and numbers the results from 1. The sort
/// is stable, so equal scores keep their incoming (catalog) order.
pub fn rank(mut scored: Vec<ScoredMaterial>) -> Vec<PredictionResult> {
    scored.sort_by(|left, right| {
        right
            .sustainability_score
            .partial_cmp(&left.sustainability_score)
            .unwrap_or(Ordering::Equal)
    });

    scored
        .into_iter()
        .zip(1u32..)
        .map(|(material, rank)| PredictionResult::from_scored(material, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::rank;
    use crate::domain::prediction::ScoredMaterial;

    fn scored(material: &str, score: f64) -> ScoredMaterial {
        ScoredMaterial {
            material: material.to_owned(),
            predicted_cost: 10.0,
            co2: 1.0,
            sustainability_score: score,
            biodegradability: 50.0,
            recyclability: 50.0,
            co2_performance: 90.0,
        }
    }

    #[test]
    fn ranks_descending_and_contiguous() {
        let ranked = rank(vec![scored("a", 70.0), scored("b", 91.5), scored("c", 80.25)]);

        let order: Vec<(&str, u32)> =
            ranked.iter().map(|result| (result.material.as_str(), result.rank)).collect();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank(vec![
            scored("first", 80.0),
            scored("top", 95.0),
            scored("second", 80.0),
            scored("third", 80.0),
        ]);

        let names: Vec<&str> = ranked.iter().map(|result| result.material.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second", "third"]);
        assert_eq!(ranked.iter().map(|result| result.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(rank(Vec::new()).is_empty());
    }
}
