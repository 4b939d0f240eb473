#![warn(missing_docs)]

//! Rating aggregation and leaderboards for a pizza review club.
//!
//! `pizzaboard` turns a dataset of restaurants and their rated visits into
//! tie-aware, deterministically ordered leaderboards: one per rating
//! category, plus one per pizza that was ordered at several restaurants.
//! Ratings may use a legacy flat schema or a nested one; the shape is
//! decided once when a record is read.

/// Visit ratings, schema detection, and per-visit category lookup.
pub mod ratings;

/// Restaurant input records and leaderboard output types.
pub mod model;

/// Best-score-per-restaurant reduction.
pub mod aggregate;

/// Pizza order name canonicalization.
pub mod normalize;

/// Cross-restaurant matching of the same pizza.
pub mod matcher;

/// Entry ordering and competition ranking.
pub mod sort;

/// Leaderboard assembly and category discovery.
pub mod leaderboard;

/// Configuration options for leaderboard building.
pub mod options;

/// Error type for reading datasets.
pub mod error;

// Re-export primary public API types and functions at the crate root.
pub use error::{Error, Result};
pub use leaderboard::{
    AvailableCategories, CategoryDescriptor, Leaderboards, build_all_leaderboards,
    build_leaderboard, build_other_stuff_leaderboards, build_pizza_component_leaderboards,
    build_same_named_pizza_leaderboards, discover_available_categories,
};
pub use matcher::{PizzaGroup, match_same_named_pizzas};
pub use model::{
    EntryLabel, LeaderboardData, LeaderboardEntry, RankedEntry, Restaurant, Visit,
    parse_restaurants,
};
pub use normalize::{NormalizedName, normalize_pizza_name, normalize_pizza_name_with};
pub use options::LeaderboardOptions;
pub use ratings::{NestedRatings, PizzaRating, Ratings};
pub use sort::{compare_entries, rank_entries};
