//! One-dimensional array exercises.

use serde::{Deserialize, Serialize};

use crate::error::{KataError, KataResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Best contiguous range found by [`max_subarray`]; `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubarraySum {
    pub sum: i64,
    pub start: usize,
    pub end: usize,
}

/// A single buy followed by a later sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trade {
    pub buy_day: usize,
    pub sell_day: usize,
    pub profit: i64,
}

/// Closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

// ---------------------------------------------------------------------------
// Pascal's triangle
// ---------------------------------------------------------------------------

pub fn pascal_triangle(rows: usize) -> KataResult<Vec<Vec<u64>>> {
    let mut triangle: Vec<Vec<u64>> = Vec::new();
    for i in 0..rows {
        let mut row = Vec::with_capacity(i + 1);
        row.push(1);
        if let Some(prev) = triangle.last() {
            for pair in prev.windows(2) {
                let v = pair[0].checked_add(pair[1]).ok_or_else(|| {
                    KataError::Overflow(format!("row {i} of Pascal's triangle"))
                })?;
                row.push(v);
            }
            row.push(1);
        }
        triangle.push(row);
    }
    Ok(triangle)
}

// ---------------------------------------------------------------------------
// Maximum subarray (Kadane)
// ---------------------------------------------------------------------------

/// Largest sum over all non-empty contiguous ranges. The earliest range wins
/// ties.
pub fn max_subarray(items: &[i64]) -> KataResult<SubarraySum> {
    let Some(&first) = items.first() else {
        return Err(KataError::InvalidInput("empty sequence has no subarray".into()));
    };

    let mut best = SubarraySum {
        sum: first,
        start: 0,
        end: 0,
    };
    let mut current = first;
    let mut current_start = 0;

    for (i, &x) in items.iter().enumerate().skip(1) {
        if current < 0 {
            current = x;
            current_start = i;
        } else {
            current = current
                .checked_add(x)
                .ok_or_else(|| KataError::Overflow("subarray sum".into()))?;
        }
        if current > best.sum {
            best = SubarraySum {
                sum: current,
                start: current_start,
                end: i,
            };
        }
    }
    Ok(best)
}

// ---------------------------------------------------------------------------
// Dutch national flag
// ---------------------------------------------------------------------------

/// Sorts a sequence of 0s, 1s and 2s in one pass. The slice is left
/// untouched if any other value is present.
pub fn sort_colors(items: &mut [i64]) -> KataResult<()> {
    if let Some(bad) = items.iter().find(|v| !(0..=2).contains(*v)) {
        return Err(KataError::InvalidInput(format!(
            "{bad} is not a color (expected 0, 1 or 2)"
        )));
    }

    let (mut low, mut mid, mut high) = (0, 0, items.len());
    while mid < high {
        match items[mid] {
            0 => {
                items.swap(low, mid);
                low += 1;
                mid += 1;
            }
            1 => mid += 1,
            _ => {
                high -= 1;
                items.swap(mid, high);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stock profit
// ---------------------------------------------------------------------------

/// Best single buy/sell over daily `prices`. `None` when no trade makes a
/// profit.
pub fn max_profit(prices: &[i64]) -> KataResult<Option<Trade>> {
    let mut best: Option<Trade> = None;
    let mut min_day = 0;

    for (day, &price) in prices.iter().enumerate().skip(1) {
        if price < prices[min_day] {
            min_day = day;
            continue;
        }
        let profit = price
            .checked_sub(prices[min_day])
            .ok_or_else(|| KataError::Overflow("price difference".into()))?;
        if profit > 0 && best.map_or(true, |t| profit > t.profit) {
            best = Some(Trade {
                buy_day: min_day,
                sell_day: day,
                profit,
            });
        }
    }
    Ok(best)
}

// ---------------------------------------------------------------------------
// Interval merging
// ---------------------------------------------------------------------------

/// Merges overlapping or touching intervals. Output is sorted by start.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> KataResult<Vec<Interval>> {
    if let Some(bad) = intervals.iter().find(|iv| iv.start > iv.end) {
        return Err(KataError::InvalidInput(format!(
            "interval [{}, {}] ends before it starts",
            bad.start, bad.end
        )));
    }

    intervals.sort_by_key(|iv| iv.start);
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        match merged.last_mut() {
            Some(last) if iv.start <= last.end => last.end = last.end.max(iv.end),
            _ => merged.push(iv),
        }
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Majority element
// ---------------------------------------------------------------------------

/// Element occurring more than `n / 2` times (Boyer-Moore vote, then a
/// verification pass).
pub fn majority_element(items: &[i64]) -> Option<i64> {
    let mut candidate = *items.first()?;
    let mut votes = 0usize;
    for &x in items {
        if votes == 0 {
            candidate = x;
        }
        if x == candidate {
            votes += 1;
        } else {
            votes -= 1;
        }
    }

    let occurrences = items.iter().filter(|&&x| x == candidate).count();
    (occurrences * 2 > items.len()).then_some(candidate)
}

// ---------------------------------------------------------------------------
// Duplicate / missing number
// ---------------------------------------------------------------------------

/// Finds the repeated value among `n + 1` values drawn from `1..=n` using
/// Floyd's cycle detection over `i -> items[i]`.
pub fn find_duplicate(items: &[i64]) -> KataResult<i64> {
    if items.len() < 2 {
        return Err(KataError::InvalidInput(
            "need at least two values to contain a duplicate".into(),
        ));
    }
    let n = (items.len() - 1) as i64;
    if let Some(bad) = items.iter().find(|v| !(1..=n).contains(*v)) {
        return Err(KataError::InvalidInput(format!(
            "{bad} is outside 1..={n}"
        )));
    }

    let next = |i: usize| items[i] as usize;
    let mut slow = next(0);
    let mut fast = next(next(0));
    while slow != fast {
        slow = next(slow);
        fast = next(next(fast));
    }
    slow = 0;
    while slow != fast {
        slow = next(slow);
        fast = next(fast);
    }
    Ok(slow as i64)
}

/// For `n` values over `1..=n` where exactly one value appears twice and one
/// is absent, returns `(repeated, missing)`.
pub fn find_repeating_and_missing(items: &[i64]) -> KataResult<(i64, i64)> {
    let n = items.len();
    let mut seen = vec![0u32; n + 1];
    for &v in items {
        if v < 1 || v as usize > n {
            return Err(KataError::InvalidInput(format!("{v} is outside 1..={n}")));
        }
        seen[v as usize] += 1;
    }

    let mut repeated = None;
    let mut missing = None;
    for (value, &count) in seen.iter().enumerate().skip(1) {
        match count {
            0 if missing.is_none() => missing = Some(value as i64),
            1 => {}
            2 if repeated.is_none() => repeated = Some(value as i64),
            _ => {
                return Err(KataError::InvalidInput(
                    "expected exactly one repeated and one missing value".into(),
                ))
            }
        }
    }

    match (repeated, missing) {
        (Some(r), Some(m)) => Ok((r, m)),
        _ => Err(KataError::InvalidInput(
            "expected exactly one repeated and one missing value".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_triangle() {
        let t = pascal_triangle(5).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], vec![1]);
        assert_eq!(t[1], vec![1, 1]);
        assert_eq!(t[4], vec![1, 4, 6, 4, 1]);
        assert!(pascal_triangle(0).unwrap().is_empty());
    }

    #[test]
    fn test_pascal_triangle_overflow() {
        assert!(pascal_triangle(68).is_ok());
        assert!(matches!(pascal_triangle(70), Err(KataError::Overflow(_))));
    }

    #[test]
    fn test_max_subarray_classic() {
        let best = max_subarray(&[-2, 1, -3, 4, -1, 2, 1, -5, 4]).unwrap();
        assert_eq!(
            best,
            SubarraySum {
                sum: 6,
                start: 3,
                end: 6
            }
        );
    }

    #[test]
    fn test_max_subarray_all_negative() {
        let best = max_subarray(&[-3, -1, -2]).unwrap();
        assert_eq!(best.sum, -1);
        assert_eq!((best.start, best.end), (1, 1));
    }

    #[test]
    fn test_max_subarray_empty() {
        assert!(matches!(max_subarray(&[]), Err(KataError::InvalidInput(_))));
    }

    #[test]
    fn test_sort_colors() {
        let mut v = vec![2, 0, 2, 1, 1, 0];
        sort_colors(&mut v).unwrap();
        assert_eq!(v, vec![0, 0, 1, 1, 2, 2]);

        let mut empty: Vec<i64> = vec![];
        sort_colors(&mut empty).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sort_colors_rejects_other_values() {
        let mut v = vec![2, 3, 0];
        assert!(matches!(sort_colors(&mut v), Err(KataError::InvalidInput(_))));
        assert_eq!(v, vec![2, 3, 0]);
    }

    #[test]
    fn test_max_profit() {
        let trade = max_profit(&[7, 1, 5, 3, 6, 4]).unwrap().unwrap();
        assert_eq!(
            trade,
            Trade {
                buy_day: 1,
                sell_day: 4,
                profit: 5
            }
        );
    }

    #[test]
    fn test_max_profit_none() {
        assert_eq!(max_profit(&[7, 6, 4, 3, 1]).unwrap(), None);
        assert_eq!(max_profit(&[5]).unwrap(), None);
        assert_eq!(max_profit(&[]).unwrap(), None);
    }

    #[test]
    fn test_merge_intervals() {
        let merged = merge_intervals(vec![
            Interval::new(8, 10),
            Interval::new(1, 3),
            Interval::new(2, 6),
            Interval::new(15, 18),
        ])
        .unwrap();
        assert_eq!(
            merged,
            vec![
                Interval::new(1, 6),
                Interval::new(8, 10),
                Interval::new(15, 18)
            ]
        );
    }

    #[test]
    fn test_merge_touching_and_nested() {
        let merged =
            merge_intervals(vec![Interval::new(1, 4), Interval::new(4, 5), Interval::new(2, 3)])
                .unwrap();
        assert_eq!(merged, vec![Interval::new(1, 5)]);
    }

    #[test]
    fn test_merge_rejects_reversed() {
        let result = merge_intervals(vec![Interval::new(5, 1)]);
        assert!(matches!(result, Err(KataError::InvalidInput(_))));
    }

    #[test]
    fn test_majority_element() {
        assert_eq!(majority_element(&[2, 2, 1, 1, 1, 2, 2]), Some(2));
        assert_eq!(majority_element(&[3]), Some(3));
        assert_eq!(majority_element(&[1, 2, 3]), None);
        assert_eq!(majority_element(&[1, 1, 2, 2]), None);
        assert_eq!(majority_element(&[]), None);
    }

    #[test]
    fn test_find_duplicate() {
        assert_eq!(find_duplicate(&[1, 3, 4, 2, 2]).unwrap(), 2);
        assert_eq!(find_duplicate(&[3, 1, 3, 4, 2]).unwrap(), 3);
        assert_eq!(find_duplicate(&[1, 1]).unwrap(), 1);
    }

    #[test]
    fn test_find_duplicate_out_of_range() {
        assert!(matches!(
            find_duplicate(&[1, 5, 2]),
            Err(KataError::InvalidInput(_))
        ));
        assert!(matches!(find_duplicate(&[1]), Err(KataError::InvalidInput(_))));
    }

    #[test]
    fn test_find_repeating_and_missing() {
        assert_eq!(find_repeating_and_missing(&[3, 1, 2, 5, 3]).unwrap(), (3, 4));
        assert_eq!(find_repeating_and_missing(&[1, 1]).unwrap(), (1, 2));
    }

    #[test]
    fn test_find_repeating_and_missing_invalid() {
        // no repeat at all
        assert!(find_repeating_and_missing(&[1, 2, 3]).is_err());
        // two values missing
        assert!(find_repeating_and_missing(&[1, 1, 1]).is_err());
        assert!(find_repeating_and_missing(&[0, 1]).is_err());
    }
}
