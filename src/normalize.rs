//! Canonicalization of free-text pizza order descriptions.
//!
//! Orders are typed by hand and vary wildly: `18" Pepperoni, Sausage -
//! Toppings: Pepperoni, Sausage`, `Large Sausage & Pepperoni`, `pepperoni
//! and sausage`. [`normalize_pizza_name`] turns one into two strings:
//!
//! - a **display name** for people: size and toppings suffix removed,
//!   whitespace collapsed, original casing kept;
//! - a **comparison key** for matching: lowercased, and when the name lists
//!   several ingredients, the ingredients sorted so that their order does not
//!   matter.
//!
//! The two are kept separate on purpose: labels keep the way a member wrote
//! the order while matching runs on the canonical form.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Marker introducing the redundant toppings list some orders carry.
const TOPPINGS_MARKER: &[u8] = b"toppings:";

/// Leading size words, checked case-insensitively. Multi-word forms come
/// before their single-word prefixes.
const SIZE_WORDS: [&str; 8] = [
    "extra-large",
    "extra large",
    "x-large",
    "personal",
    "medium",
    "family",
    "small",
    "large",
];

/// Unit words that may follow a leading number.
const INCH_WORDS: [&str; 2] = ["inches", "inch"];

/// Quote-like marks that may follow a leading number (`18"`, `16'`, `12″`).
const INCH_MARKS: [char; 5] = ['"', '\'', '\u{2033}', '\u{201D}', '\u{2019}'];

/// The two faces of a normalized order description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    /// Human-facing name with original casing.
    pub display_name: String,
    /// Canonical key used to match the same pizza across restaurants.
    pub comparison_key: String,
}

/// Normalize an order description, stripping diacritics from the key.
///
/// Equivalent to `normalize_pizza_name_with(raw, false)`.
///
/// # Examples
///
/// ```
/// use pizzaboard::normalize_pizza_name;
///
/// let a = normalize_pizza_name("18\" Sausage, Green Pepper");
/// let b = normalize_pizza_name("Large Green Pepper and Sausage");
///
/// assert_eq!(a.display_name, "Sausage, Green Pepper");
/// assert_eq!(b.display_name, "Green Pepper and Sausage");
/// assert_eq!(a.comparison_key, "green pepper, sausage");
/// assert_eq!(a.comparison_key, b.comparison_key);
/// ```
pub fn normalize_pizza_name(raw: &str) -> NormalizedName {
    normalize_pizza_name_with(raw, false)
}

/// Normalize an order description.
///
/// Pipeline:
///
/// 1. Drop a trailing ` - Toppings: ...` list.
/// 2. Drop leading size tokens: a number with an inch marker (`18"`, `16'`,
///    `12″`, `12 inch`) or a size word (small, medium, large, x-large,
///    personal, family). What remains, whitespace collapsed, is the display
///    name. If nothing remains, the unstripped name is used instead.
/// 3. Build the comparison key from the display name with
///    [`comparison_key`].
///
/// # Arguments
///
/// * `raw` - The order description as typed
/// * `keep_diacritics` - If `false`, diacritics are stripped from the key
pub fn normalize_pizza_name_with(raw: &str, keep_diacritics: bool) -> NormalizedName {
    let collapsed = collapse_whitespace(strip_toppings_suffix(raw));
    let stripped = strip_size_tokens(&collapsed);

    let display_name = if stripped.is_empty() {
        collapsed.clone()
    } else {
        stripped.to_owned()
    };
    let comparison_key = comparison_key(&display_name, keep_diacritics);

    NormalizedName {
        display_name,
        comparison_key,
    }
}

/// Build the order-insensitive comparison key for a display name.
///
/// The name is lowercased and its whitespace collapsed. If it contains a
/// comma, an ampersand, or the standalone word `and`, it is split on those
/// into ingredients, empty pieces are dropped, and the rest are sorted and
/// joined with `", "`. Single-ingredient names pass through lowercased.
///
/// # Examples
///
/// ```
/// use pizzaboard::normalize::comparison_key;
///
/// assert_eq!(comparison_key("Sausage & Pepperoni", true), "pepperoni, sausage");
/// assert_eq!(comparison_key("  Margherita ", true), "margherita");
/// assert_eq!(comparison_key("Sandy's Special", true), "sandy's special");
/// ```
pub fn comparison_key(display_name: &str, keep_diacritics: bool) -> String {
    let prepared = fold_diacritics(display_name, keep_diacritics);
    let lower = collapse_whitespace(&prepared.to_lowercase());

    if !has_ingredient_separator(&lower) {
        return lower;
    }

    let mut tokens = split_ingredients(&lower);
    tokens.sort_unstable();
    tokens.join(", ")
}

/// Strip diacritics unless `keep_diacritics` is set.
///
/// Applies NFD decomposition and drops combining marks. Returns
/// [`Cow::Borrowed`] whenever nothing had to change.
///
/// # Examples
///
/// ```
/// use pizzaboard::normalize::fold_diacritics;
///
/// assert_eq!(fold_diacritics("jalape\u{00f1}o", false), "jalapeno");
/// assert_eq!(fold_diacritics("jalape\u{00f1}o", true), "jalape\u{00f1}o");
/// ```
pub fn fold_diacritics(s: &str, keep_diacritics: bool) -> Cow<'_, str> {
    if keep_diacritics || s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// Collapse every run of whitespace to a single space and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut a trailing `- Toppings: ...` list, matched case-insensitively with
/// any spacing around the dash. The cut happens at the first `toppings:`
/// preceded by a dash; occurrences without the dash are left alone.
fn strip_toppings_suffix(s: &str) -> &str {
    // ASCII lowercasing keeps byte offsets identical to `s`.
    let lower = s.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    for marker in memchr::memmem::find_iter(bytes, TOPPINGS_MARKER) {
        let before = &bytes[..marker];
        let Some(dash) = before.iter().rposition(|b| !b.is_ascii_whitespace()) else {
            continue;
        };
        if before[dash] == b'-' {
            return s[..dash].trim_end();
        }
    }

    s
}

/// Repeatedly remove leading size tokens (`Large 16" Cheese` -> `Cheese`).
fn strip_size_tokens(s: &str) -> &str {
    let mut rest = s.trim_start();
    while let Some(next) = strip_leading_size(rest) {
        rest = next.trim_start();
    }
    rest.trim_end()
}

/// Remove one leading size token, returning the remainder.
fn strip_leading_size(s: &str) -> Option<&str> {
    strip_inch_marker(s).or_else(|| {
        SIZE_WORDS
            .iter()
            .find_map(|word| strip_prefix_ignore_case(s, word))
            .filter(|rest| at_word_boundary(rest))
    })
}

/// Remove a leading `18"`, `16'`, `12″`, `12 inch` or `12-inch`.
fn strip_inch_marker(s: &str) -> Option<&str> {
    let digits = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(s.len(), |(i, _)| i);
    if digits == 0 || !s.as_bytes()[0].is_ascii_digit() {
        return None;
    }

    let after_number = &s[digits..];
    let unit = after_number.trim_start();
    let unit = unit.strip_prefix('-').unwrap_or(unit);

    if let Some(rest) = unit.strip_prefix(INCH_MARKS) {
        return Some(rest);
    }

    INCH_WORDS
        .iter()
        .find_map(|word| strip_prefix_ignore_case(unit, word))
        .filter(|rest| at_word_boundary(rest))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// `true` if `rest` is empty or continues with something other than a
/// letter or digit, i.e. the stripped token was a whole word.
fn at_word_boundary(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| !c.is_alphanumeric())
}

fn has_ingredient_separator(lower: &str) -> bool {
    memchr::memchr2(b',', b'&', lower.as_bytes()).is_some()
        || lower.split(' ').any(|word| word == "and")
}

/// Split a lowercased, whitespace-collapsed name on `,`, `&` and the word
/// `and`, discarding empty pieces.
fn split_ingredients(lower: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for piece in lower.split([',', '&']) {
        let mut current: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if word == "and" {
                if !current.is_empty() {
                    tokens.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            tokens.push(current.join(" "));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- strip_toppings_suffix ---

    #[test]
    fn toppings_suffix_removed() {
        assert_eq!(
            strip_toppings_suffix("18\" Pepperoni, Sausage - Toppings: Pepperoni, Sausage"),
            "18\" Pepperoni, Sausage"
        );
    }

    #[test]
    fn toppings_suffix_case_and_spacing() {
        assert_eq!(strip_toppings_suffix("Cheese -TOPPINGS: none"), "Cheese");
        assert_eq!(strip_toppings_suffix("Cheese-toppings:"), "Cheese");
    }

    #[test]
    fn first_dashed_toppings_marker_wins() {
        assert_eq!(
            strip_toppings_suffix("18\" Supreme - Toppings: Pepperoni, Extra toppings: olives"),
            "18\" Supreme"
        );
        assert_eq!(
            strip_toppings_suffix("Extra Toppings: Special - Toppings: Onion"),
            "Extra Toppings: Special"
        );

        let n = normalize_pizza_name("18\" Supreme - Toppings: Pepperoni, Extra toppings: olives");
        assert_eq!(n.display_name, "Supreme");
        assert_eq!(n.comparison_key, "supreme");
    }

    #[test]
    fn toppings_without_dash_kept() {
        assert_eq!(strip_toppings_suffix("Extra Toppings: yes"), "Extra Toppings: yes");
    }

    #[test]
    fn no_toppings_marker() {
        assert_eq!(strip_toppings_suffix("Margherita"), "Margherita");
    }

    // --- strip_size_tokens ---

    #[test]
    fn inch_markers() {
        assert_eq!(strip_size_tokens("18\" Pepperoni"), "Pepperoni");
        assert_eq!(strip_size_tokens("16' Pepperoni"), "Pepperoni");
        assert_eq!(strip_size_tokens("12\u{2033} Pepperoni"), "Pepperoni");
        assert_eq!(strip_size_tokens("12 inch Pepperoni"), "Pepperoni");
        assert_eq!(strip_size_tokens("12-Inch Pepperoni"), "Pepperoni");
        assert_eq!(strip_size_tokens("14 inches Pepperoni"), "Pepperoni");
    }

    #[test]
    fn size_words() {
        assert_eq!(strip_size_tokens("Small Cheese"), "Cheese");
        assert_eq!(strip_size_tokens("MEDIUM Cheese"), "Cheese");
        assert_eq!(strip_size_tokens("x-large Cheese"), "Cheese");
        assert_eq!(strip_size_tokens("Personal Cheese"), "Cheese");
        assert_eq!(strip_size_tokens("family Cheese"), "Cheese");
    }

    #[test]
    fn stacked_size_tokens() {
        assert_eq!(strip_size_tokens("Large 16\" Cheese"), "Cheese");
    }

    #[test]
    fn size_word_must_be_whole_word() {
        assert_eq!(strip_size_tokens("Largesse Special"), "Largesse Special");
        assert_eq!(strip_size_tokens("Smalls Pie"), "Smalls Pie");
    }

    #[test]
    fn bare_number_is_kept() {
        assert_eq!(strip_size_tokens("4 Cheese"), "4 Cheese");
        assert_eq!(strip_size_tokens("12 Inchworm"), "12 Inchworm");
    }

    // --- normalize_pizza_name ---

    #[test]
    fn display_name_keeps_case_and_collapses_whitespace() {
        let n = normalize_pizza_name("  18\"   Meat   Lovers  ");
        assert_eq!(n.display_name, "Meat Lovers");
        assert_eq!(n.comparison_key, "meat lovers");
    }

    #[test]
    fn size_only_order_keeps_its_text() {
        let n = normalize_pizza_name("Large");
        assert_eq!(n.display_name, "Large");
        assert_eq!(n.comparison_key, "large");
    }

    #[test]
    fn full_pipeline() {
        let n = normalize_pizza_name("18\" Pepperoni, Sausage - Toppings: Pepperoni, Sausage");
        assert_eq!(n.display_name, "Pepperoni, Sausage");
        assert_eq!(n.comparison_key, "pepperoni, sausage");
    }

    // --- comparison_key ---

    #[test]
    fn ingredient_order_is_irrelevant() {
        assert_eq!(
            comparison_key("Sausage, Green Pepper", false),
            comparison_key("Green Pepper and Sausage", false)
        );
        assert_eq!(
            comparison_key("Mushroom & Onion", false),
            comparison_key("onion, mushroom", false)
        );
    }

    #[test]
    fn empty_tokens_dropped() {
        assert_eq!(comparison_key("Sausage,, & Onion,", false), "onion, sausage");
    }

    #[test]
    fn and_inside_word_is_not_a_separator() {
        assert_eq!(comparison_key("Brandy Sandwich", false), "brandy sandwich");
    }

    #[test]
    fn diacritics_folded_unless_kept() {
        assert_eq!(comparison_key("Jalape\u{00f1}o", false), "jalapeno");
        assert_eq!(comparison_key("Jalape\u{00f1}o", true), "jalape\u{00f1}o");
    }

    #[test]
    fn fold_diacritics_borrows_ascii() {
        assert!(matches!(fold_diacritics("cheese", false), Cow::Borrowed(_)));
        assert!(matches!(fold_diacritics("caf\u{00e9}", false), Cow::Owned(_)));
    }
}
