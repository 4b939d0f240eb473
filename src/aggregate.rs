//! Reduce a restaurant's visits to its single best score for a category.

use log::trace;

use crate::model::Restaurant;
use crate::ratings::{NestedRatings, PIZZA_OVERALL_KEY};

/// A restaurant's best score for one category and the visit it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRating {
    /// Highest score seen across all qualifying visits.
    pub rating: f64,
    /// Date of the visit that produced it.
    pub visit_date: String,
}

/// Round to two decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use pizzaboard::aggregate::round_to_hundredths;
///
/// assert_eq!(round_to_hundredths(4.125), 4.13);
/// assert_eq!(round_to_hundredths(-4.125), -4.13);
/// assert_eq!(round_to_hundredths(4.0 / 3.0), 1.33);
/// ```
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The pizza-overall score of one nested visit.
///
/// An explicit `pizzaOverall` wins. Otherwise the score is the mean of the
/// visit's pizza ratings, rounded with [`round_to_hundredths`]. Returns
/// `None` when neither is available.
pub fn pizza_overall_for_visit(ratings: &NestedRatings) -> Option<f64> {
    if let Some(explicit) = ratings.pizza_overall.filter(|v| v.is_finite()) {
        return Some(explicit);
    }

    let scores: Vec<f64> = ratings
        .pizzas
        .iter()
        .map(|p| p.rating)
        .filter(|r| r.is_finite())
        .collect();
    if scores.is_empty() {
        return None;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    Some(round_to_hundredths(mean))
}

/// Best score for `category_key` across all of `restaurant`'s visits.
///
/// Flat-schema visits and visits without the category are skipped. When
/// several visits share the maximum, the earliest one is reported. Returns
/// `None` if no visit qualified; the restaurant then has no entry at all.
///
/// # Examples
///
/// ```
/// use pizzaboard::{Restaurant, aggregate::best_category_rating};
/// use serde_json::json;
///
/// let restaurant: Restaurant = serde_json::from_value(json!({
///     "id": "a", "name": "A",
///     "visits": [
///         { "date": "2024-01-01", "ratings": { "overall": 4.5 } },
///         { "date": "2024-06-01", "ratings": { "overall": 4.9 } }
///     ]
/// })).unwrap();
///
/// let best = best_category_rating(&restaurant, "overall").unwrap();
/// assert_eq!(best.rating, 4.9);
/// assert_eq!(best.visit_date, "2024-06-01");
/// assert!(best_category_rating(&restaurant, "crust").is_none());
/// ```
pub fn best_category_rating(restaurant: &Restaurant, category_key: &str) -> Option<BestRating> {
    best_by(restaurant, category_key, |nested| {
        nested.category_value(category_key)
    })
}

/// Best pizza-overall score across all of `restaurant`'s visits, deriving
/// it per visit with [`pizza_overall_for_visit`].
pub fn best_pizza_overall(restaurant: &Restaurant) -> Option<BestRating> {
    best_by(restaurant, PIZZA_OVERALL_KEY, pizza_overall_for_visit)
}

fn best_by<F>(restaurant: &Restaurant, category_key: &str, score: F) -> Option<BestRating>
where
    F: Fn(&NestedRatings) -> Option<f64>,
{
    let mut best: Option<BestRating> = None;

    for visit in &restaurant.visits {
        let Some(nested) = visit.ratings.as_nested() else {
            trace!(
                "skipping flat-schema visit {} of {} for {category_key}",
                visit.date, restaurant.id
            );
            continue;
        };
        let Some(rating) = score(nested).filter(|r| r.is_finite()) else {
            continue;
        };

        // Strictly greater: ties keep the earlier visit.
        if best.as_ref().is_none_or(|b| rating > b.rating) {
            best = Some(BestRating {
                rating,
                visit_date: visit.date.clone(),
            });
        }
    }

    best
}
