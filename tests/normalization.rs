//! Integration tests for pizza order normalization.
//!
//! Covers the display/comparison split: display names keep the member's
//! casing, comparison keys match the same pizza however it was written.

use pizzaboard::{normalize_pizza_name, normalize_pizza_name_with};

// ---------------------------------------------------------------------------
// Comparison key equivalence
// ---------------------------------------------------------------------------

/// Size token and ingredient order do not affect the comparison key.
#[test]
fn sized_and_reordered_orders_match() {
    let a = normalize_pizza_name("18\" Sausage, Green Pepper");
    let b = normalize_pizza_name("Large Green Pepper and Sausage");
    assert_eq!(a.comparison_key, b.comparison_key);
}

/// Casing alone never separates two orders.
#[test]
fn case_insensitive_match() {
    assert_eq!(
        normalize_pizza_name("Cheese").comparison_key,
        normalize_pizza_name("cheese").comparison_key
    );
}

/// Every separator style collapses to the same key.
#[test]
fn separator_styles_match() {
    let forms = [
        "Pepperoni, Mushroom",
        "Mushroom & Pepperoni",
        "mushroom and pepperoni",
        "16' Pepperoni and Mushroom - Toppings: Pepperoni, Mushroom",
        "Medium   Mushroom ,Pepperoni",
    ];
    for form in forms {
        assert_eq!(
            normalize_pizza_name(form).comparison_key,
            "mushroom, pepperoni",
            "form {form:?}"
        );
    }
}

/// Different pizzas stay different.
#[test]
fn distinct_pizzas_do_not_match() {
    assert_ne!(
        normalize_pizza_name("Pepperoni").comparison_key,
        normalize_pizza_name("Pepperoni, Sausage").comparison_key
    );
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

/// The display name drops size and toppings list but keeps casing.
#[test]
fn display_name_keeps_casing() {
    let n = normalize_pizza_name("18\" BBQ Chicken - Toppings: Chicken, Onion");
    assert_eq!(n.display_name, "BBQ Chicken");
    assert_eq!(n.comparison_key, "bbq chicken");
}

/// Ingredient lists keep their written order in the display name.
#[test]
fn display_name_keeps_ingredient_order() {
    let n = normalize_pizza_name("Large Sausage and Green Pepper");
    assert_eq!(n.display_name, "Sausage and Green Pepper");
    assert_eq!(n.comparison_key, "green pepper, sausage");
}

/// Diacritics stay in the display name even when folded in the key.
#[test]
fn diacritics_only_folded_in_key() {
    let folded = normalize_pizza_name("Jalape\u{00f1}o");
    assert_eq!(folded.display_name, "Jalape\u{00f1}o");
    assert_eq!(folded.comparison_key, "jalapeno");

    let kept = normalize_pizza_name_with("Jalape\u{00f1}o", true);
    assert_eq!(kept.comparison_key, "jalape\u{00f1}o");
}
