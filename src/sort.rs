//! Ordering and competition ranking of leaderboard entries.
//!
//! Entries are sorted by a three-level comparator: rating (descending),
//! restaurant name (ascending), then restaurant id (ascending). Ranks follow
//! standard competition ranking ("1-2-2-4"): tied entries share the rank of
//! the first entry in their block, and the next distinct rating resumes at
//! its 1-based position in the full list.

use std::cmp::Ordering;

use crate::model::{LeaderboardEntry, RankedEntry};

/// Three-level comparator for leaderboard entries.
///
/// 1. **Higher rating first**, compared with [`f64::total_cmp`] so the order
///    is total even for unexpected values.
/// 2. **Restaurant name**, ascending byte-wise.
/// 3. **Restaurant id**, ascending, so equal names still order the same way
///    on every call.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use pizzaboard::{EntryLabel, LeaderboardEntry, compare_entries};
///
/// let entry = |name: &str, rating: f64| LeaderboardEntry {
///     restaurant_id: name.to_lowercase(),
///     restaurant_name: name.to_owned(),
///     restaurant_slug: None,
///     rating,
///     label: EntryLabel::Category("overall".to_owned()),
///     visit_date: "2024-01-01".to_owned(),
/// };
///
/// assert_eq!(compare_entries(&entry("B", 4.8), &entry("A", 4.5)), Ordering::Less);
/// assert_eq!(compare_entries(&entry("A", 4.8), &entry("B", 4.8)), Ordering::Less);
/// ```
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.restaurant_name.cmp(&b.restaurant_name))
        .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
}

/// Pick between two entries for the same restaurant: [`compare_entries`]
/// first, then the earlier visit date, then the label. `Less` means `a` is
/// kept. Only fully identical entries compare `Equal`.
pub(crate) fn prefer_entry(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    compare_entries(a, b)
        .then_with(|| a.visit_date.cmp(&b.visit_date))
        .then_with(|| a.label.as_str().cmp(b.label.as_str()))
}

/// Sort entries with [`compare_entries`] and assign competition ranks.
///
/// An entry is `is_tied` when its immediate predecessor or successor has
/// the identical rating. The output is in ranked order; input order never
/// affects the result.
///
/// # Examples
///
/// ```
/// use pizzaboard::{EntryLabel, LeaderboardEntry, rank_entries};
///
/// let entries: Vec<LeaderboardEntry> = [("A", 4.8), ("B", 4.8), ("C", 4.5), ("D", 4.2)]
///     .into_iter()
///     .map(|(name, rating)| LeaderboardEntry {
///         restaurant_id: name.to_owned(),
///         restaurant_name: name.to_owned(),
///         restaurant_slug: None,
///         rating,
///         label: EntryLabel::Category("overall".to_owned()),
///         visit_date: "2024-01-01".to_owned(),
///     })
///     .collect();
///
/// let ranked = rank_entries(entries);
/// let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
/// assert_eq!(ranks, vec![1, 1, 3, 4]);
/// ```
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    entries.sort_by(compare_entries);

    // Tie flags depend on neighbours, so compute them before moving entries.
    let ties: Vec<bool> = (0..entries.len())
        .map(|i| {
            let rating = entries[i].rating;
            let prev = i > 0 && entries[i - 1].rating == rating;
            let next = entries.get(i + 1).is_some_and(|e| e.rating == rating);
            prev || next
        })
        .collect();

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (position, (entry, is_tied)) in entries.into_iter().zip(ties).enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.entry.rating == entry.rating => prev.rank,
            _ => position + 1,
        };
        ranked.push(RankedEntry {
            entry,
            rank,
            is_tied,
        });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryLabel;

    /// Helper to build an entry with only the fields relevant to ranking.
    fn make_entry(name: &str, rating: f64) -> LeaderboardEntry {
        make_entry_with_id(name, name, rating)
    }

    fn make_entry_with_id(id: &str, name: &str, rating: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            restaurant_id: id.to_owned(),
            restaurant_name: name.to_owned(),
            restaurant_slug: None,
            rating,
            label: EntryLabel::Category("overall".to_owned()),
            visit_date: "2024-01-01".to_owned(),
        }
    }

    fn ranks(ranked: &[RankedEntry]) -> Vec<usize> {
        ranked.iter().map(|r| r.rank).collect()
    }

    fn ties(ranked: &[RankedEntry]) -> Vec<bool> {
        ranked.iter().map(|r| r.is_tied).collect()
    }

    fn names(ranked: &[RankedEntry]) -> Vec<&str> {
        ranked
            .iter()
            .map(|r| r.entry.restaurant_name.as_str())
            .collect()
    }

    // --- compare_entries ---

    #[test]
    fn higher_rating_first() {
        assert_eq!(
            compare_entries(&make_entry("Z", 5.0), &make_entry("A", 1.0)),
            Ordering::Less
        );
    }

    #[test]
    fn equal_rating_sorts_by_name() {
        assert_eq!(
            compare_entries(&make_entry("Apple", 3.0), &make_entry("Banana", 3.0)),
            Ordering::Less
        );
    }

    #[test]
    fn equal_name_sorts_by_id() {
        let a = make_entry_with_id("a-2", "Same", 3.0);
        let b = make_entry_with_id("a-1", "Same", 3.0);
        assert_eq!(compare_entries(&a, &b), Ordering::Greater);
    }

    // --- prefer_entry ---

    #[test]
    fn prefer_breaks_full_ties_by_date_then_label() {
        let mut early = make_entry("Same", 4.0);
        early.visit_date = "2023-01-01".to_owned();
        let late = make_entry("Same", 4.0);
        assert_eq!(prefer_entry(&early, &late), Ordering::Less);
        assert_eq!(prefer_entry(&late, &early), Ordering::Greater);

        let mut other_label = make_entry("Same", 4.0);
        other_label.label = EntryLabel::Category("crust".to_owned());
        assert_eq!(prefer_entry(&other_label, &late), Ordering::Less);
    }

    #[test]
    fn prefer_follows_rating_first() {
        let mut early = make_entry("Same", 3.0);
        early.visit_date = "2023-01-01".to_owned();
        assert_eq!(prefer_entry(&make_entry("Same", 4.0), &early), Ordering::Less);
    }

    // --- rank_entries ---

    #[test]
    fn empty_input() {
        assert!(rank_entries(Vec::new()).is_empty());
    }

    #[test]
    fn single_entry_is_rank_one_untied() {
        let ranked = rank_entries(vec![make_entry("A", 4.0)]);
        assert_eq!(ranks(&ranked), vec![1]);
        assert_eq!(ties(&ranked), vec![false]);
    }

    #[test]
    fn competition_ranking_leaves_gaps() {
        let ranked = rank_entries(vec![
            make_entry("D", 4.2),
            make_entry("C", 4.5),
            make_entry("B", 4.8),
            make_entry("A", 4.8),
        ]);
        assert_eq!(names(&ranked), vec!["A", "B", "C", "D"]);
        assert_eq!(ranks(&ranked), vec![1, 1, 3, 4]);
        assert_eq!(ties(&ranked), vec![true, true, false, false]);
    }

    #[test]
    fn tie_block_in_the_middle() {
        let ranked = rank_entries(vec![
            make_entry("A", 5.0),
            make_entry("B", 4.0),
            make_entry("C", 4.0),
            make_entry("D", 4.0),
            make_entry("E", 3.0),
        ]);
        assert_eq!(ranks(&ranked), vec![1, 2, 2, 2, 5]);
        assert_eq!(ties(&ranked), vec![false, true, true, true, false]);
    }

    #[test]
    fn everyone_tied() {
        let ranked = rank_entries(vec![make_entry("B", 3.0), make_entry("A", 3.0)]);
        assert_eq!(ranks(&ranked), vec![1, 1]);
        assert_eq!(ties(&ranked), vec![true, true]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = rank_entries(vec![
            make_entry("A", 4.0),
            make_entry("B", 4.5),
            make_entry("C", 4.0),
        ]);
        let backward = rank_entries(vec![
            make_entry("C", 4.0),
            make_entry("B", 4.5),
            make_entry("A", 4.0),
        ]);
        assert_eq!(forward, backward);
    }
}
