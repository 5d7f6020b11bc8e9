//! Auxiliary-source selection, deduplication and keyed lookup.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{
    Condition, ConfidenceIntervalRow, DescriptiveRow, Direction, JoinKey,
};

/// A row that can be joined on (Timeframe, Threshold) and ranked by N.
pub trait Keyed {
    fn key(&self) -> JoinKey;
    fn n(&self) -> Option<f64>;
}

impl Keyed for ConfidenceIntervalRow {
    fn key(&self) -> JoinKey {
        ConfidenceIntervalRow::key(self)
    }

    fn n(&self) -> Option<f64> {
        self.n
    }
}

impl Keyed for DescriptiveRow {
    fn key(&self) -> JoinKey {
        DescriptiveRow::key(self)
    }

    fn n(&self) -> Option<f64> {
        self.n
    }
}

impl<T: Keyed> Keyed for &T {
    fn key(&self) -> JoinKey {
        (**self).key()
    }

    fn n(&self) -> Option<f64> {
        (**self).n()
    }
}

/// Larger N first; null (or NaN) N last.
fn by_n_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep one row per join key: the one with the largest N.
///
/// Rows are stably sorted by (key, N descending, null N last), so ties keep
/// their input order. The output is sorted by key and applying the function
/// again returns it unchanged.
pub fn dedup_by_key<R: Keyed>(mut rows: Vec<R>) -> Vec<R> {
    let mut keyed: Vec<(JoinKey, R)> = rows.drain(..).map(|r| (r.key(), r)).collect();
    keyed.sort_by(|(ka, a), (kb, b)| ka.cmp(kb).then_with(|| by_n_desc(a.n(), b.n())));

    let mut out: Vec<R> = Vec::with_capacity(keyed.len());
    let mut last: Option<JoinKey> = None;
    for (key, row) in keyed {
        if last.as_ref() == Some(&key) {
            continue;
        }
        last = Some(key);
        out.push(row);
    }
    out
}

/// Confidence-interval rows whose Side matches `condition`, ignoring case.
pub fn select_ci(rows: &[ConfidenceIntervalRow], condition: Condition) -> Vec<&ConfidenceIntervalRow> {
    rows.iter()
        .filter(|r| condition.matches_side(&r.side))
        .collect()
}

/// Descriptive rows whose Direction and Condition equal the canonical
/// spellings exactly.
pub fn select_descriptive(
    rows: &[DescriptiveRow],
    direction: Direction,
    condition: Condition,
) -> Vec<&DescriptiveRow> {
    rows.iter()
        .filter(|r| r.direction == direction.as_str() && r.condition == condition.as_str())
        .collect()
}

/// Deduplicated rows indexed by join key.
pub fn index_by_key<R: Keyed>(rows: Vec<R>) -> HashMap<JoinKey, R> {
    dedup_by_key(rows).into_iter().map(|r| (r.key(), r)).collect()
}
