//! Input records (restaurants and their visits) and leaderboard output types.
//!
//! Input types are supplied by the caller and only ever borrowed. Output
//! types are built fresh on every call; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ratings::Ratings;

/// A restaurant and every recorded visit to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Stable identifier.
    pub id: String,
    /// Display name. Also the tiebreaker for equal scores.
    pub name: String,
    /// URL slug, if the restaurant has a page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Visits in the order they were recorded.
    #[serde(default)]
    pub visits: Vec<Visit>,
}

/// One club visit to a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Visit date as supplied upstream (typically `YYYY-MM-DD`).
    pub date: String,
    /// Identifiers of the members who attended.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Scores recorded on the visit, in either schema.
    #[serde(default)]
    pub ratings: Ratings,
}

/// What a leaderboard entry was scored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum EntryLabel {
    /// A rating category key such as `overall` or `crust`.
    Category(String),
    /// The display name of a pizza matched across restaurants.
    Pizza(String),
}

impl EntryLabel {
    /// The label text, regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            EntryLabel::Category(key) | EntryLabel::Pizza(key) => key,
        }
    }
}

/// A restaurant's single best qualifying score on one leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Id of the scored restaurant.
    pub restaurant_id: String,
    /// Name of the scored restaurant.
    pub restaurant_name: String,
    /// Slug of the scored restaurant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_slug: Option<String>,
    /// The best score.
    pub rating: f64,
    /// Category key or pizza display name the score belongs to.
    pub label: EntryLabel,
    /// Date of the visit the score came from.
    pub visit_date: String,
}

impl LeaderboardEntry {
    /// Start an entry for `restaurant`, copying its identity fields.
    pub fn for_restaurant(
        restaurant: &Restaurant,
        rating: f64,
        label: EntryLabel,
        visit_date: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.name.clone(),
            restaurant_slug: restaurant.slug.clone(),
            rating,
            label,
            visit_date: visit_date.into(),
        }
    }
}

/// A [`LeaderboardEntry`] with its competition rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// The ranked entry.
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    /// 1-based competition rank ("1-2-2-4").
    pub rank: usize,
    /// `true` if a neighbour in sorted order has the identical rating.
    pub is_tied: bool,
}

/// A titled, ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardData {
    /// Human-facing title.
    pub title: String,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category key, or the comparison key for same-named pizza boards.
    pub category_key: String,
    /// Entries in ranked order.
    pub entries: Vec<RankedEntry>,
}

impl LeaderboardData {
    /// Number of restaurants on the board.
    pub fn participant_count(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no restaurant qualified yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read a JSON array of restaurant records.
///
/// # Examples
///
/// ```
/// let restaurants = pizzaboard::parse_restaurants(r#"[
///     { "id": "r1", "name": "Vito's", "visits": [
///         { "date": "2024-05-01", "ratings": { "overall": 4.5 } }
///     ] }
/// ]"#).unwrap();
///
/// assert_eq!(restaurants.len(), 1);
/// assert!(restaurants[0].visits[0].ratings.is_nested());
/// ```
pub fn parse_restaurants(json: &str) -> Result<Vec<Restaurant>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn restaurant_defaults() {
        let r: Restaurant = serde_json::from_value(json!({ "id": "a", "name": "A" })).unwrap();
        assert_eq!(r.slug, None);
        assert!(r.visits.is_empty());
    }

    #[test]
    fn visit_without_ratings_is_flat_and_empty() {
        let v: Visit = serde_json::from_value(json!({ "date": "2024-01-01" })).unwrap();
        assert!(v.attendees.is_empty());
        assert!(!v.ratings.is_nested());
    }

    #[test]
    fn parse_rejects_non_array() {
        let err = parse_restaurants(r#"{ "id": "a" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid restaurant dataset"));
    }

    #[test]
    fn ranked_entry_serializes_camel_case_and_flat() {
        let ranked = RankedEntry {
            entry: LeaderboardEntry {
                restaurant_id: "a".to_owned(),
                restaurant_name: "A".to_owned(),
                restaurant_slug: None,
                rating: 4.5,
                label: EntryLabel::Category("overall".to_owned()),
                visit_date: "2024-01-01".to_owned(),
            },
            rank: 1,
            is_tied: false,
        };
        let value = serde_json::to_value(&ranked).unwrap();

        assert_eq!(value["restaurantId"], json!("a"));
        assert_eq!(value["visitDate"], json!("2024-01-01"));
        assert_eq!(value["isTied"], json!(false));
        assert_eq!(value["label"], json!({ "kind": "category", "value": "overall" }));
        assert!(value.get("restaurantSlug").is_none());
    }

    #[test]
    fn label_text() {
        assert_eq!(EntryLabel::Pizza("Cheese".to_owned()).as_str(), "Cheese");
        assert_eq!(EntryLabel::Category("crust".to_owned()).as_str(), "crust");
    }
}
