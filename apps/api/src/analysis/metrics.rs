use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::review::Review;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingMetrics {
    pub average_rating: f64,
    /// Counts for every star value 1–5, zeros included.
    pub rating_distribution: BTreeMap<u8, usize>,
}

/// Average rating and the per-star histogram. An empty slice averages to 0.0.
pub fn compute_metrics(reviews: &[Review]) -> RatingMetrics {
    let mut rating_distribution: BTreeMap<u8, usize> = (1..=5).map(|star| (star, 0)).collect();
    for review in reviews {
        if let Some(count) = rating_distribution.get_mut(&review.rating) {
            *count += 1;
        }
    }

    let average_rating = if reviews.is_empty() {
        0.0
    } else {
        reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64
    };

    RatingMetrics {
        average_rating,
        rating_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_ratings(ratings: &[u8]) -> Vec<Review> {
        ratings
            .iter()
            .zip(1u32..)
            .map(|(rating, id)| Review {
                recall_id: id,
                rating: *rating,
                title: String::new(),
                text: String::new(),
                created_at: None,
            })
            .collect()
    }

    #[test]
    fn test_average_and_distribution() {
        let metrics = compute_metrics(&with_ratings(&[1, 1, 2, 5]));
        assert!((metrics.average_rating - 2.25).abs() < f64::EPSILON);
        assert_eq!(metrics.rating_distribution[&1], 2);
        assert_eq!(metrics.rating_distribution[&2], 1);
        assert_eq!(metrics.rating_distribution[&3], 0);
        assert_eq!(metrics.rating_distribution[&5], 1);
    }

    #[test]
    fn test_empty_reviews_average_zero() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.average_rating, 0.0);
        assert_eq!(metrics.rating_distribution.values().sum::<usize>(), 0);
        assert_eq!(metrics.rating_distribution.len(), 5);
    }

    #[test]
    fn test_distribution_serializes_with_string_keys() {
        let metrics = compute_metrics(&with_ratings(&[4]));
        let value = serde_json::to_value(&metrics.rating_distribution).unwrap();
        assert_eq!(value, json!({"1": 0, "2": 0, "3": 0, "4": 1, "5": 0}));
    }
}
