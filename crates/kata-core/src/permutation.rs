//! Permutation rank engine.
//!
//! Every query is answered over the *distinct* arrangements of a multiset:
//! equal elements collapse, so `{1, 1, 2}` has three arrangements, not six.
//! Past the greatest arrangement the successor wraps to the ascending one.
//!
//! Two strategies compute the successor:
//! - [`Engine::Pivot`]: pivot / successor swap / suffix reversal, `O(n)`.
//! - [`Engine::Table`]: materializes the full sorted [`PermutationTable`]
//!   by unranking every row through multinomial block sizes, then looks the
//!   input up. `O(N * n)` in time and space, bounded by a length guard.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combinatorics::multinomial;
use crate::error::{KataError, KataResult};

/// Longest input the table engine accepts unless a caller raises the limit.
pub const DEFAULT_MAX_TABLE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Pivot,
    Table,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pivot => write!(f, "pivot"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pivot" => Ok(Self::Pivot),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid engine: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Successor
// ---------------------------------------------------------------------------

/// Rearranges `items` into their lexicographic successor in place.
///
/// Returns `false` when `items` was the greatest arrangement; it is then
/// left in ascending order.
pub fn advance<T: Ord>(items: &mut [T]) -> bool {
    match items.windows(2).rposition(|w| w[0] < w[1]) {
        Some(i) => {
            // suffix after the pivot is non-increasing
            let j = match items[i + 1..].iter().rposition(|x| *x > items[i]) {
                Some(offset) => i + 1 + offset,
                None => i + 1,
            };
            items.swap(i, j);
            items[i + 1..].reverse();
            true
        }
        None => {
            items.reverse();
            false
        }
    }
}

/// Returns the arrangement following `items`, wrapping to the smallest.
pub fn next_permutation<T: Ord + Clone>(items: &[T]) -> KataResult<Vec<T>> {
    next_permutation_with(items, Engine::Pivot, DEFAULT_MAX_TABLE_LEN)
}

/// [`next_permutation`] with an explicit strategy. `max_table_len` only
/// applies to [`Engine::Table`].
pub fn next_permutation_with<T: Ord + Clone>(
    items: &[T],
    engine: Engine,
    max_table_len: usize,
) -> KataResult<Vec<T>> {
    ensure_non_empty(items)?;
    match engine {
        Engine::Pivot => {
            let mut next = items.to_vec();
            advance(&mut next);
            Ok(next)
        }
        Engine::Table => {
            let table = PermutationTable::build_with_limit(items, max_table_len)?;
            let position = table.position(items);
            debug_assert!(
                position.is_some(),
                "permutation table does not contain its own input"
            );
            let Some(index) = position else {
                return Err(KataError::Logic(
                    "permutation table does not contain its own input".into(),
                ));
            };
            Ok(table.rows[(index + 1) % table.len()].clone())
        }
    }
}

// ---------------------------------------------------------------------------
// Counting and ranking
// ---------------------------------------------------------------------------

/// Number of distinct arrangements of the multiset held by `items`.
pub fn distinct_permutation_count<T: Ord + Clone>(items: &[T]) -> KataResult<u64> {
    ensure_non_empty(items)?;
    let (_, counts) = multiplicities(items);
    multinomial(&counts)
}

/// 0-based position of `items` among the sorted distinct arrangements of
/// its own multiset.
pub fn rank<T: Ord + Clone>(items: &[T]) -> KataResult<u64> {
    ensure_non_empty(items)?;
    let (values, mut remaining) = multiplicities(items);
    let mut acc = 0u64;
    for item in items {
        let pos = values
            .binary_search(item)
            .map_err(|_| KataError::Logic("element missing from its own multiset".into()))?;
        for k in 0..pos {
            if remaining[k] == 0 {
                continue;
            }
            remaining[k] -= 1;
            let block = multinomial(&remaining)?;
            acc = acc
                .checked_add(block)
                .ok_or_else(|| KataError::Overflow("rank does not fit in 64 bits".into()))?;
            remaining[k] += 1;
        }
        remaining[pos] -= 1;
    }
    Ok(acc)
}

/// Arrangement of the multiset held by `items` at position `rank`.
pub fn unrank<T: Ord + Clone>(items: &[T], rank: u64) -> KataResult<Vec<T>> {
    ensure_non_empty(items)?;
    let (values, counts) = multiplicities(items);
    arrangement_at(&values, &counts, rank)
}

/// Places one element per column: at each column every remaining distinct
/// value owns a block of `multinomial(remaining - value)` consecutive ranks,
/// in ascending value order.
fn arrangement_at<T: Clone>(
    values: &[T],
    counts: &[usize],
    mut rank: u64,
) -> KataResult<Vec<T>> {
    let len: usize = counts.iter().sum();
    let mut remaining = counts.to_vec();
    let mut row = Vec::with_capacity(len);

    for column in 0..len {
        let mut placed = false;
        for (k, value) in values.iter().enumerate() {
            if remaining[k] == 0 {
                continue;
            }
            remaining[k] -= 1;
            let block = multinomial(&remaining)?;
            if rank < block {
                row.push(value.clone());
                placed = true;
                break;
            }
            rank -= block;
            remaining[k] += 1;
        }
        if !placed {
            return Err(KataError::NotFound(format!(
                "rank out of range at column {column}"
            )));
        }
    }
    Ok(row)
}

/// Sorted distinct values and their multiplicities.
fn multiplicities<T: Ord + Clone>(items: &[T]) -> (Vec<T>, Vec<usize>) {
    let mut sorted = items.to_vec();
    sorted.sort();

    let mut values: Vec<T> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for item in sorted {
        match values.last() {
            Some(last) if last.cmp(&item) == Ordering::Equal => {
                if let Some(c) = counts.last_mut() {
                    *c += 1;
                }
            }
            _ => {
                values.push(item);
                counts.push(1);
            }
        }
    }
    (values, counts)
}

fn ensure_non_empty<T>(items: &[T]) -> KataResult<()> {
    if items.is_empty() {
        return Err(KataError::InvalidInput(
            "cannot permute an empty sequence".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PermutationTable
// ---------------------------------------------------------------------------

/// Every distinct arrangement of a multiset, in ascending lexicographic order.
#[derive(Debug, Clone)]
pub struct PermutationTable<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Ord + Clone> PermutationTable<T> {
    pub fn build(items: &[T]) -> KataResult<Self> {
        Self::build_with_limit(items, DEFAULT_MAX_TABLE_LEN)
    }

    pub fn build_with_limit(items: &[T], max_len: usize) -> KataResult<Self> {
        ensure_non_empty(items)?;
        if items.len() > max_len {
            return Err(KataError::TooLarge {
                len: items.len(),
                max: max_len,
            });
        }

        let (values, counts) = multiplicities(items);
        let total = multinomial(&counts)?;
        let rows = (0..total)
            .map(|r| arrangement_at(&values, &counts, r))
            .collect::<KataResult<Vec<_>>>()?;

        debug!(len = items.len(), rows = rows.len(), "built permutation table");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Linear scan for `query`.
    pub fn position(&self, query: &[T]) -> Option<usize> {
        self.rows.iter().position(|row| row.as_slice() == query)
    }

    /// Row after `query`, wrapping from the last row to the first.
    pub fn successor_of(&self, query: &[T]) -> KataResult<&[T]> {
        let index = self.position(query).ok_or_else(|| {
            KataError::NotFound("arrangement is not a row of this table".into())
        })?;
        Ok(&self.rows[(index + 1) % self.rows.len()])
    }
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

/// Iterates each distinct arrangement exactly once, starting from the
/// ascending one.
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    current: Vec<T>,
    remaining: usize,
}

impl<T: Ord + Clone> Permutations<T> {
    pub fn new(items: &[T]) -> KataResult<Self> {
        let count = distinct_permutation_count(items)?;
        let remaining = usize::try_from(count)
            .map_err(|_| KataError::Overflow(format!("{count} arrangements")))?;
        let mut current = items.to_vec();
        current.sort();
        Ok(Self { current, remaining })
    }
}

impl<T: Ord + Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let out = self.current.clone();
        advance(&mut self.current);
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Ord + Clone> ExactSizeIterator for Permutations<T> {}

/// All `n!` positional arrangements produced by swap recursion. Equal
/// elements are not collapsed.
pub fn permutations_by_swapping<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut work = items.to_vec();
    let mut out = Vec::new();
    swap_recurse(&mut work, 0, &mut out);
    out
}

fn swap_recurse<T: Clone>(data: &mut [T], start: usize, out: &mut Vec<Vec<T>>) {
    if start + 1 >= data.len() {
        out.push(data.to_vec());
        return;
    }
    for idx in start..data.len() {
        data.swap(start, idx);
        swap_recurse(data, start + 1, out);
        data.swap(start, idx);
    }
}
