use std::collections::BTreeMap;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to two decimal places, breaking exact ties to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Sums `value` per `key` in one pass. The map iterates in key order.
pub fn group_sum<R, K: Ord>(
    rows: &[R],
    key: impl Fn(&R) -> K,
    value: impl Fn(&R) -> u64,
) -> BTreeMap<K, u64> {
    let mut sums = BTreeMap::new();
    for row in rows {
        *sums.entry(key(row)).or_insert(0) += value(row);
    }
    sums
}

/// A summary row keyed by a value from a small fixed domain.
pub trait KeyedRow {
    type Key: Ord + Copy;

    fn key(&self) -> Self::Key;

    /// The row reported for a key with no input.
    fn empty(key: Self::Key) -> Self;
}

/// Adds an empty row for every domain key missing from `rows`.
///
/// `rows` must already be sorted by key; the result is too.
pub fn zero_fill<R: KeyedRow>(rows: Vec<R>, domain: impl IntoIterator<Item = R::Key>) -> Vec<R> {
    let mut filled: BTreeMap<R::Key, R> = rows.into_iter().map(|r| (r.key(), r)).collect();
    for key in domain {
        filled.entry(key).or_insert_with(|| R::empty(key));
    }
    filled.into_values().collect()
}
