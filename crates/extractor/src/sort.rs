// crates/extractor/src/sort.rs
//! Episode ordering

use crate::fields::parse_date;
use crate::value::Record;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Compares two episodes for display order
///
/// 1. Explicit `order` values ascending. An episode without an order sorts
///    before one that has it.
/// 2. `pubDate` descending (newest first). A parseable date sorts before a
///    missing or unparseable one.
/// 3. `title` descending. A title sorts before a missing one.
///
/// Only fields that were extracted take part; with none of them present
/// every pair compares equal.
pub fn compare_episodes(a: &Record, b: &Record) -> Ordering {
    compare_order(order_of(a), order_of(b))
        .then_with(|| newest_first(date_of(a), date_of(b)))
        .then_with(|| newest_first(a.text("title"), b.text("title")))
}

/// Sorts episodes in place; ties keep document order
pub fn sort_episodes(episodes: &mut [Record]) {
    episodes.sort_by(compare_episodes);
}

fn order_of(record: &Record) -> Option<f64> {
    record.get("order").and_then(|value| value.as_f64())
}

fn date_of(record: &Record) -> Option<DateTime<Utc>> {
    record.text("pubDate").and_then(parse_date)
}

fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn newest_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
