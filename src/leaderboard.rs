//! Building named leaderboards and discovering which categories exist.
//!
//! Every function here is a pure transformation of the borrowed restaurant
//! slice into freshly built [`LeaderboardData`]. Nothing is cached; callers
//! that want caching own the invalidation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::aggregate::{BestRating, best_category_rating, best_pizza_overall};
use crate::matcher::match_same_named_pizzas;
use crate::model::{EntryLabel, LeaderboardData, LeaderboardEntry, Restaurant};
use crate::options::LeaderboardOptions;
use crate::ratings::{OVERALL_KEY, PIZZA_OVERALL_KEY};
use crate::sort::{prefer_entry, rank_entries};

/// A rating category to build a leaderboard for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDescriptor {
    /// Category key as it appears in the ratings.
    pub key: String,
    /// Title for the leaderboard.
    pub label: String,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryDescriptor {
    /// Create a descriptor with an explicit label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Create a descriptor whose label is derived from the key with
    /// [`humanize_key`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pizzaboard::CategoryDescriptor;
    ///
    /// assert_eq!(CategoryDescriptor::from_key("waitstaff").label, "Waitstaff");
    /// assert_eq!(CategoryDescriptor::from_key("pizzaCrust").label, "Pizza crust");
    /// ```
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = humanize_key(&key);
        Self {
            key,
            label,
            description: None,
        }
    }

    /// Attach a subtitle.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Turn a raw category key into a sentence-case label.
///
/// Words are split on `_`, `-`, spaces and lower-to-upper camelCase
/// boundaries; the first word is capitalized, the rest lowercased.
///
/// # Examples
///
/// ```
/// use pizzaboard::leaderboard::humanize_key;
///
/// assert_eq!(humanize_key("pizza_crust"), "Pizza crust");
/// assert_eq!(humanize_key("bakeQuality"), "Bake quality");
/// assert_eq!(humanize_key(""), "");
/// ```
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut label = words.join(" ");
    if let Some(first) = label.chars().next() {
        let upper: String = first.to_uppercase().collect();
        label.replace_range(..first.len_utf8(), &upper);
    }
    label
}

/// Sub-categories actually present in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCategories {
    /// Keys found under pizza components, sorted.
    pub pizza_components: Vec<String>,
    /// Keys found under other stuff, sorted.
    pub other_stuff: Vec<String>,
}

impl AvailableCategories {
    /// Descriptors for every discovered pizza-component key.
    pub fn pizza_component_descriptors(&self) -> Vec<CategoryDescriptor> {
        self.pizza_components
            .iter()
            .map(CategoryDescriptor::from_key)
            .collect()
    }

    /// Descriptors for every discovered other-stuff key.
    pub fn other_stuff_descriptors(&self) -> Vec<CategoryDescriptor> {
        self.other_stuff
            .iter()
            .map(CategoryDescriptor::from_key)
            .collect()
    }
}

/// Every leaderboard a dataset supports, built in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboards {
    /// Best overall score per restaurant.
    pub overall: LeaderboardData,
    /// Best pizza-overall score per restaurant.
    pub pizza_overall: LeaderboardData,
    /// One non-empty board per discovered pizza component.
    pub pizza_components: Vec<LeaderboardData>,
    /// One non-empty board per discovered other-stuff category.
    pub other_stuff: Vec<LeaderboardData>,
    /// One board per pizza ordered at enough restaurants.
    pub same_named_pizzas: Vec<LeaderboardData>,
    /// The categories the boards above were built from.
    pub categories: AvailableCategories,
}

/// Build one ranked leaderboard for `category_key`.
///
/// Each restaurant contributes its best score across all visits (see
/// [`best_category_rating`]); for `pizzaOverall` the per-visit score falls
/// back to the rounded mean of that visit's pizzas. Restaurants without a
/// qualifying visit, and scores of zero or less, are left out entirely, so
/// the result may have no entries. Restaurant records sharing an id produce
/// one entry.
///
/// # Examples
///
/// ```
/// use pizzaboard::{Restaurant, build_leaderboard};
/// use serde_json::json;
///
/// let restaurants: Vec<Restaurant> = serde_json::from_value(json!([
///     { "id": "a", "name": "A", "visits": [
///         { "date": "d1", "ratings": { "overall": 4.5 } },
///         { "date": "d2", "ratings": { "overall": 4.9 } }
///     ] },
///     { "id": "b", "name": "B", "visits": [
///         { "date": "d3", "ratings": { "overall": 4.9 } }
///     ] }
/// ])).unwrap();
///
/// let board = build_leaderboard(&restaurants, "overall", "Overall", None);
/// assert_eq!(board.entries.len(), 2);
/// assert!(board.entries.iter().all(|e| e.rank == 1 && e.is_tied && e.entry.rating == 4.9));
/// ```
pub fn build_leaderboard(
    restaurants: &[Restaurant],
    category_key: &str,
    title: &str,
    description: Option<&str>,
) -> LeaderboardData {
    let mut best: BTreeMap<&str, LeaderboardEntry> = BTreeMap::new();

    for restaurant in restaurants {
        let found = if category_key == PIZZA_OVERALL_KEY {
            best_pizza_overall(restaurant)
        } else {
            best_category_rating(restaurant, category_key)
        };
        let Some(BestRating { rating, visit_date }) = found else {
            continue;
        };
        if rating <= 0.0 {
            continue;
        }

        let entry = LeaderboardEntry::for_restaurant(
            restaurant,
            rating,
            EntryLabel::Category(category_key.to_owned()),
            visit_date,
        );
        let replace = best
            .get(restaurant.id.as_str())
            .is_none_or(|existing| prefer_entry(&entry, existing) == Ordering::Less);
        if replace {
            best.insert(restaurant.id.as_str(), entry);
        }
    }

    let entries = rank_entries(best.into_values().collect());
    debug!("built {category_key} leaderboard with {} entries", entries.len());

    LeaderboardData {
        title: title.to_owned(),
        description: description.map(str::to_owned),
        category_key: category_key.to_owned(),
        entries,
    }
}

/// Build one leaderboard per pizza-component descriptor, dropping empty ones.
pub fn build_pizza_component_leaderboards(
    restaurants: &[Restaurant],
    categories: &[CategoryDescriptor],
) -> Vec<LeaderboardData> {
    build_non_empty(restaurants, categories)
}

/// Build one leaderboard per other-stuff descriptor, dropping empty ones.
pub fn build_other_stuff_leaderboards(
    restaurants: &[Restaurant],
    categories: &[CategoryDescriptor],
) -> Vec<LeaderboardData> {
    build_non_empty(restaurants, categories)
}

fn build_non_empty(
    restaurants: &[Restaurant],
    categories: &[CategoryDescriptor],
) -> Vec<LeaderboardData> {
    categories
        .iter()
        .map(|category| {
            build_leaderboard(
                restaurants,
                &category.key,
                &category.label,
                category.description.as_deref(),
            )
        })
        .filter(|board| !board.is_empty())
        .collect()
}

/// Build one leaderboard per pizza ordered at two or more restaurants.
///
/// Groups come from [`match_same_named_pizzas`](crate::match_same_named_pizzas).
/// Each board is titled with the display name of its top-ranked entry and
/// keyed by the comparison key. Boards are ordered by participant count
/// (descending), then title, then key.
pub fn build_same_named_pizza_leaderboards(
    restaurants: &[Restaurant],
    options: &LeaderboardOptions,
) -> Vec<LeaderboardData> {
    let mut boards: Vec<LeaderboardData> = match_same_named_pizzas(restaurants, options)
        .into_values()
        .map(|group| {
            let entries = rank_entries(group.entries);
            let title = entries
                .first()
                .map(|top| top.entry.label.as_str().to_owned())
                .unwrap_or_else(|| group.comparison_key.clone());
            LeaderboardData {
                title,
                description: Some(format!("Ordered at {} restaurants", entries.len())),
                category_key: group.comparison_key,
                entries,
            }
        })
        .collect();

    boards.sort_by(|a, b| {
        b.participant_count()
            .cmp(&a.participant_count())
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.category_key.cmp(&b.category_key))
    });
    debug!("built {} same-named pizza leaderboards", boards.len());

    boards
}

/// Collect every key present under pizza components and other stuff across
/// all nested visits. Flat visits contribute nothing.
///
/// # Examples
///
/// ```
/// use pizzaboard::{Restaurant, discover_available_categories};
/// use serde_json::json;
///
/// let restaurants: Vec<Restaurant> = serde_json::from_value(json!([
///     { "id": "a", "name": "A", "visits": [{ "date": "d1", "ratings": {
///         "pizzaComponents": { "sauce": 4.0, "crust": 3.0 },
///         "otherStuff": { "waitstaff": 5.0 } } }] },
///     { "id": "b", "name": "B", "visits": [{ "date": "d2", "ratings": {
///         "pizzaComponents": { "crust": 4.0, "bake": 4.5 } } }] }
/// ])).unwrap();
///
/// let found = discover_available_categories(&restaurants);
/// assert_eq!(found.pizza_components, vec!["bake", "crust", "sauce"]);
/// assert_eq!(found.other_stuff, vec!["waitstaff"]);
/// ```
pub fn discover_available_categories(restaurants: &[Restaurant]) -> AvailableCategories {
    let mut pizza_components: BTreeSet<&str> = BTreeSet::new();
    let mut other_stuff: BTreeSet<&str> = BTreeSet::new();

    let nested = restaurants
        .iter()
        .flat_map(|r| &r.visits)
        .filter_map(|v| v.ratings.as_nested());
    for ratings in nested {
        pizza_components.extend(ratings.pizza_components.keys().map(String::as_str));
        other_stuff.extend(ratings.other_stuff.keys().map(String::as_str));
    }

    debug!(
        "discovered {} pizza component and {} other-stuff categories",
        pizza_components.len(),
        other_stuff.len()
    );

    AvailableCategories {
        pizza_components: pizza_components.into_iter().map(str::to_owned).collect(),
        other_stuff: other_stuff.into_iter().map(str::to_owned).collect(),
    }
}

/// Discover categories and build every leaderboard the dataset supports.
pub fn build_all_leaderboards(
    restaurants: &[Restaurant],
    options: &LeaderboardOptions,
) -> Leaderboards {
    let categories = discover_available_categories(restaurants);

    Leaderboards {
        overall: build_leaderboard(
            restaurants,
            OVERALL_KEY,
            "Overall",
            Some("Best overall score from any visit"),
        ),
        pizza_overall: build_leaderboard(
            restaurants,
            PIZZA_OVERALL_KEY,
            "Pizza Overall",
            Some("Best pizza score from any visit"),
        ),
        pizza_components: build_pizza_component_leaderboards(
            restaurants,
            &categories.pizza_component_descriptors(),
        ),
        other_stuff: build_other_stuff_leaderboards(
            restaurants,
            &categories.other_stuff_descriptors(),
        ),
        same_named_pizzas: build_same_named_pizza_leaderboards(restaurants, options),
        categories,
    }
}
