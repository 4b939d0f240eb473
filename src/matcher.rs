//! Matching the same pizza across different restaurants.
//!
//! Each restaurant contributes at most one candidate per comparison key (its
//! best-rated occurrence). Candidates are then grouped by key across the
//! whole dataset and groups with too few restaurants are dropped.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;

use crate::model::{EntryLabel, LeaderboardEntry, Restaurant};
use crate::normalize::{NormalizedName, normalize_pizza_name_with};
use crate::options::LeaderboardOptions;
use crate::sort::prefer_entry;

/// Restaurants that ordered the same pizza, one best entry each.
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaGroup {
    /// Canonical comparison key shared by every entry.
    pub comparison_key: String,
    /// One entry per restaurant, in no particular order. Each entry's label
    /// is [`EntryLabel::Pizza`] with that restaurant's own display name.
    pub entries: Vec<LeaderboardEntry>,
}

impl PizzaGroup {
    /// Number of distinct restaurants in the group.
    pub fn participant_count(&self) -> usize {
        self.entries.len()
    }
}

/// Best occurrence of one pizza at one restaurant.
struct Candidate {
    display_name: String,
    rating: f64,
    visit_date: String,
}

/// Group every pizza ordered in `restaurants` by comparison key.
///
/// Steps:
///
/// 1. For each restaurant, keep its highest-rated occurrence per comparison
///    key. Equal ratings keep the earlier occurrence. Pizzas whose rating is
///    not a finite number, or whose key is empty, are ignored. A score of
///    zero is still a score.
///    Flat-schema visits carry no pizzas and contribute nothing.
/// 2. Group those bests by comparison key across all restaurants. Records
///    sharing a restaurant id count as one restaurant.
/// 3. Drop groups with fewer than
///    [`LeaderboardOptions::effective_min_participants`] restaurants.
///
/// Returns a map keyed by comparison key, so iteration order is stable.
///
/// # Examples
///
/// ```
/// use pizzaboard::{LeaderboardOptions, Restaurant, match_same_named_pizzas};
/// use serde_json::json;
///
/// let restaurants: Vec<Restaurant> = serde_json::from_value(json!([
///     { "id": "a", "name": "A", "visits": [{ "date": "d1", "ratings": {
///         "overall": 4.0, "pizzas": [{ "order": "18\" Cheese", "rating": 4.0 }] } }] },
///     { "id": "b", "name": "B", "visits": [{ "date": "d2", "ratings": {
///         "overall": 4.0, "pizzas": [{ "order": "Large cheese", "rating": 3.5 },
///                                    { "order": "Veggie", "rating": 4.5 }] } }] }
/// ])).unwrap();
///
/// let groups = match_same_named_pizzas(&restaurants, &LeaderboardOptions::default());
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups["cheese"].participant_count(), 2);
/// ```
pub fn match_same_named_pizzas(
    restaurants: &[Restaurant],
    options: &LeaderboardOptions,
) -> BTreeMap<String, PizzaGroup> {
    // comparison key -> restaurant id -> entry
    let mut by_key: BTreeMap<String, BTreeMap<String, LeaderboardEntry>> = BTreeMap::new();

    for restaurant in restaurants {
        for (key, candidate) in best_pizzas(restaurant, options.keep_diacritics) {
            let entry = LeaderboardEntry::for_restaurant(
                restaurant,
                candidate.rating,
                EntryLabel::Pizza(candidate.display_name),
                candidate.visit_date,
            );
            let slot = by_key.entry(key).or_default();
            let replace = slot
                .get(&restaurant.id)
                .is_none_or(|existing| prefer_entry(&entry, existing) == Ordering::Less);
            if replace {
                slot.insert(restaurant.id.clone(), entry);
            }
        }
    }

    let min_participants = options.effective_min_participants();
    by_key
        .into_iter()
        .filter_map(|(comparison_key, entries)| {
            if entries.len() < min_participants {
                debug!(
                    "dropping pizza group {comparison_key:?}: {} of {min_participants} restaurants",
                    entries.len()
                );
                return None;
            }
            let group = PizzaGroup {
                comparison_key: comparison_key.clone(),
                entries: entries.into_values().collect(),
            };
            Some((comparison_key, group))
        })
        .collect()
}

/// A single restaurant's best occurrence of each pizza it ever ordered.
fn best_pizzas(restaurant: &Restaurant, keep_diacritics: bool) -> BTreeMap<String, Candidate> {
    let mut best: BTreeMap<String, Candidate> = BTreeMap::new();

    let nested_visits = restaurant
        .visits
        .iter()
        .filter_map(|visit| visit.ratings.as_nested().map(|nested| (visit, nested)));

    for (visit, nested) in nested_visits {
        for pizza in &nested.pizzas {
            if !pizza.rating.is_finite() {
                continue;
            }
            let NormalizedName {
                display_name,
                comparison_key,
            } = normalize_pizza_name_with(&pizza.order, keep_diacritics);
            if comparison_key.is_empty() {
                continue;
            }

            let replace = best
                .get(&comparison_key)
                .is_none_or(|existing| pizza.rating > existing.rating);
            if replace {
                best.insert(
                    comparison_key,
                    Candidate {
                        display_name,
                        rating: pizza.rating,
                        visit_date: visit.date.clone(),
                    },
                );
            }
        }
    }

    best
}
