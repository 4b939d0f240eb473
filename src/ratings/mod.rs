//! Rating records and the category lookup rules that run over them.
//!
//! A visit's ratings arrive untagged: either a flat `category -> score` map
//! (the legacy shape) or a nested record with parent groups. [`Ratings`]
//! makes that distinction explicit. The shape is decided exactly once, by
//! [`is_nested_shape`], when the record is read; everything downstream
//! matches on the enum instead of probing properties.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Top-level key holding the visit's overall score.
pub const OVERALL_KEY: &str = "overall";
/// Top-level key holding the explicit pizza-overall score.
pub const PIZZA_OVERALL_KEY: &str = "pizzaOverall";
/// Top-level key holding the list of individually rated pizzas.
pub const PIZZAS_KEY: &str = "pizzas";
/// Parent group for pizza components (crust, sauce, bake, ...).
pub const PIZZA_COMPONENTS_KEY: &str = "pizzaComponents";
/// Parent group for everything that is not pizza (waitstaff, atmosphere, ...).
pub const OTHER_STUFF_KEY: &str = "otherStuff";

const PARENT_KEYS: [&str; 5] = [
    OVERALL_KEY,
    PIZZA_OVERALL_KEY,
    PIZZAS_KEY,
    PIZZA_COMPONENTS_KEY,
    OTHER_STUFF_KEY,
];

/// One pizza ordered on a visit, with the score it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaRating {
    /// Free-text order description, e.g. `18" Pepperoni - Toppings: Pepperoni`.
    pub order: String,
    /// Score for this pizza.
    pub rating: f64,
}

impl PizzaRating {
    /// Create a pizza rating.
    pub fn new(order: impl Into<String>, rating: f64) -> Self {
        Self {
            order: order.into(),
            rating,
        }
    }
}

/// A visit's ratings in the nested schema.
///
/// Every field is optional in the source data; missing child maps are empty
/// and missing scores are `None`. Child maps only ever hold finite numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedRatings {
    /// Overall score for the visit.
    pub overall: Option<f64>,
    /// Explicit pizza-overall score. When absent it is derived from `pizzas`.
    pub pizza_overall: Option<f64>,
    /// Pizzas ordered on the visit, in the order they were recorded.
    pub pizzas: Vec<PizzaRating>,
    /// Child scores under the pizza-components group.
    pub pizza_components: BTreeMap<String, f64>,
    /// Child scores under the other-stuff group.
    pub other_stuff: BTreeMap<String, f64>,
    /// Other top-level numeric members not yet assigned to a parent group.
    pub extra: BTreeMap<String, f64>,
}

impl NestedRatings {
    /// Look up a single category's score.
    ///
    /// Lookup order, first finite hit wins:
    ///
    /// 1. `overall` / `pizzaOverall` as top-level fields
    /// 2. the pizza-components group
    /// 3. the other-stuff group
    /// 4. any other top-level numeric member
    ///
    /// Returns `None` when the category was never scored. A missing score is
    /// never reported as `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pizzaboard::NestedRatings;
    ///
    /// let mut ratings = NestedRatings::default();
    /// ratings.other_stuff.insert("waitstaff".to_owned(), 4.0);
    ///
    /// assert_eq!(ratings.category_value("waitstaff"), Some(4.0));
    /// assert_eq!(ratings.category_value("atmosphere"), None);
    /// ```
    pub fn category_value(&self, key: &str) -> Option<f64> {
        let top_level = match key {
            OVERALL_KEY => self.overall,
            PIZZA_OVERALL_KEY => self.pizza_overall,
            _ => None,
        };

        top_level
            .filter(|v| v.is_finite())
            .or_else(|| finite_entry(&self.pizza_components, key))
            .or_else(|| finite_entry(&self.other_stuff, key))
            .or_else(|| finite_entry(&self.extra, key))
    }

    /// Read a nested record out of a JSON object, dropping anything that is
    /// not a finite number where a score is expected.
    fn from_map(map: &Map<String, Value>) -> Self {
        let mut nested = NestedRatings {
            overall: map.get(OVERALL_KEY).and_then(finite_number),
            pizza_overall: map.get(PIZZA_OVERALL_KEY).and_then(finite_number),
            pizzas: map.get(PIZZAS_KEY).map(pizzas_from_value).unwrap_or_default(),
            pizza_components: map
                .get(PIZZA_COMPONENTS_KEY)
                .and_then(Value::as_object)
                .map(numeric_members)
                .unwrap_or_default(),
            other_stuff: map
                .get(OTHER_STUFF_KEY)
                .and_then(Value::as_object)
                .map(numeric_members)
                .unwrap_or_default(),
            extra: BTreeMap::new(),
        };

        for (key, value) in map {
            if PARENT_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let Some(v) = finite_number(value) {
                nested.extra.insert(key.clone(), v);
            }
        }

        nested
    }
}

/// A visit's ratings in either supported schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Ratings {
    /// Legacy single-level `category -> score` map.
    Flat(BTreeMap<String, f64>),
    /// Record with explicit parent groups.
    Nested(NestedRatings),
}

impl Default for Ratings {
    fn default() -> Self {
        Ratings::Flat(BTreeMap::new())
    }
}

impl Ratings {
    /// Build a [`Ratings`] value from an untagged JSON object, deciding its
    /// shape with [`is_nested_shape`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pizzaboard::Ratings;
    /// use serde_json::json;
    ///
    /// let nested = json!({ "overall": 4.5, "otherStuff": { "waitstaff": 4.0 } });
    /// let flat = json!({ "crust": 4.0, "sauce": 3.5 });
    ///
    /// assert!(Ratings::from_map(nested.as_object().unwrap()).is_nested());
    /// assert!(!Ratings::from_map(flat.as_object().unwrap()).is_nested());
    /// ```
    pub fn from_map(map: &Map<String, Value>) -> Self {
        if is_nested_shape(map) {
            Ratings::Nested(NestedRatings::from_map(map))
        } else {
            Ratings::Flat(numeric_members(map))
        }
    }

    /// Returns `true` when these ratings use the nested schema.
    pub fn is_nested(&self) -> bool {
        matches!(self, Ratings::Nested(_))
    }

    /// Borrow the nested record, or `None` for flat ratings.
    pub fn as_nested(&self) -> Option<&NestedRatings> {
        match self {
            Ratings::Nested(nested) => Some(nested),
            Ratings::Flat(_) => None,
        }
    }

    /// Look up a category's score. Flat ratings never qualify and always
    /// return `None`; see [`NestedRatings::category_value`] for the nested
    /// lookup order.
    pub fn category_value(&self, key: &str) -> Option<f64> {
        self.as_nested()?.category_value(key)
    }
}

/// Decide whether an untagged ratings object uses the nested schema.
///
/// Nested iff a parent group key (`pizzaComponents`, `otherStuff`) holds an
/// object (arrays do not count), or `overall` holds a number. Anything else
/// is flat.
///
/// # Examples
///
/// ```
/// use pizzaboard::ratings::is_nested_shape;
/// use serde_json::json;
///
/// let nested = json!({ "pizzaComponents": { "crust": 4.0 } });
/// assert!(is_nested_shape(nested.as_object().unwrap()));
///
/// let not_nested = json!({ "pizzaComponents": [4.0], "crust": 4.0 });
/// assert!(!is_nested_shape(not_nested.as_object().unwrap()));
/// ```
pub fn is_nested_shape(map: &Map<String, Value>) -> bool {
    let has_group = [PIZZA_COMPONENTS_KEY, OTHER_STUFF_KEY]
        .iter()
        .any(|key| map.get(*key).is_some_and(Value::is_object));

    has_group || map.get(OVERALL_KEY).is_some_and(Value::is_number)
}

fn finite_entry(map: &BTreeMap<String, f64>, key: &str) -> Option<f64> {
    map.get(key).copied().filter(|v| v.is_finite())
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn numeric_members(map: &Map<String, Value>) -> BTreeMap<String, f64> {
    map.iter()
        .filter_map(|(key, value)| finite_number(value).map(|v| (key.clone(), v)))
        .collect()
}

fn pizzas_from_value(value: &Value) -> Vec<PizzaRating> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let order = item.get("order")?.as_str()?;
            let rating = item.get("rating").and_then(finite_number)?;
            Some(PizzaRating::new(order, rating))
        })
        .collect()
}

impl<'de> Deserialize<'de> for Ratings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything that is not an object reads as an empty flat map.
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_object()
            .map(Ratings::from_map)
            .unwrap_or_default())
    }
}

impl Serialize for Ratings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Ratings::Flat(scores) => scores.serialize(serializer),
            Ratings::Nested(nested) => {
                let mut map = serializer.serialize_map(None)?;
                if let Some(overall) = nested.overall {
                    map.serialize_entry(OVERALL_KEY, &overall)?;
                }
                if let Some(pizza_overall) = nested.pizza_overall {
                    map.serialize_entry(PIZZA_OVERALL_KEY, &pizza_overall)?;
                }
                if !nested.pizzas.is_empty() {
                    map.serialize_entry(PIZZAS_KEY, &nested.pizzas)?;
                }
                // Both groups are always written so the record reads back
                // as nested even without an overall score.
                map.serialize_entry(PIZZA_COMPONENTS_KEY, &nested.pizza_components)?;
                map.serialize_entry(OTHER_STUFF_KEY, &nested.other_stuff)?;
                for (key, value) in &nested.extra {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
