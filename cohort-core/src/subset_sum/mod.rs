//! Subset-sum solvers used to choose which groups to tag.
//!
//! Two variants ship here. [`exact_subset`] is a pseudo-polynomial
//! reachability DP that finds the achievable sum closest to the target
//! within a tolerance window, or reports that none exists. Its table is
//! O(items × range) in both time and space, where `range` spans every
//! achievable sum; it is polynomial in the magnitude of the weights, not
//! in the item count, and degrades badly when weights are large. That is
//! a documented limitation, not a bug. [`approximate_subset`] is a
//! first-fit-decreasing greedy pass: a bounded-time substitute for the
//! exact solver when the tolerance is effectively unbounded (for which
//! the DP table would be unbounded in size).
//!
//! Weights are signed; the solvers are agnostic to sign even though group
//! sizes in this crate are always non-negative.

use std::cmp::Reverse;

/// An item with an integer weight, as consumed by the solvers.
///
/// Implemented for `i64` itself so plain weight slices can be solved
/// directly.
///
/// # Examples
/// ```
/// use cohort_core::{Countable, approximate_subset};
///
/// struct Squad(Vec<u8>);
///
/// impl Countable for Squad {
///     fn size(&self) -> i64 {
///         self.0.len() as i64
///     }
/// }
///
/// let squads = vec![Squad(vec![1, 2, 3]), Squad(vec![4])];
/// assert_eq!(approximate_subset(&squads, 3), vec![0]);
/// ```
pub trait Countable {
    /// Returns the integer weight of this item.
    fn size(&self) -> i64;
}

impl Countable for i64 {
    fn size(&self) -> i64 {
        *self
    }
}

/// Finds a subset of `items` whose weights sum to within `tolerance` of
/// `target`, or `None` when no such subset exists.
///
/// Returns the positions of the chosen items in ascending order. Among the
/// achievable sums in `[target - tolerance, target + tolerance]` the one
/// closest to `target` wins; between two equally close sums the one above
/// the target is preferred. Both rules are deterministic and part of the
/// contract.
///
/// The empty subset is never proposed: an empty `items` slice yields
/// `None` regardless of the window.
///
/// # Examples
/// ```
/// use cohort_core::exact_subset;
///
/// let chosen = exact_subset(&[7i64, 0, 4, 1, 0, 1], 12, 0);
/// assert_eq!(chosen, Some(vec![0, 2, 3]));
/// ```
#[must_use]
pub fn exact_subset<T: Countable>(items: &[T], target: i64, tolerance: u64) -> Option<Vec<usize>> {
    let sizes: Vec<i64> = items.iter().map(Countable::size).collect();
    exact_subset_sizes(&sizes, target, tolerance)
}

/// Slice-level form of [`exact_subset`] operating on raw weights.
#[must_use]
pub fn exact_subset_sizes(sizes: &[i64], target: i64, tolerance: u64) -> Option<Vec<usize>> {
    if sizes.is_empty() {
        return None;
    }
    let tolerance = i64::try_from(tolerance).unwrap_or(i64::MAX);
    let ceiling = target.saturating_add(tolerance);
    let floor = target.saturating_sub(tolerance);

    let sum_neg: i64 = sizes.iter().copied().filter(|&v| v < 0).sum();
    let mut sum_pos: i64 = sizes.iter().copied().filter(|&v| v > 0).sum();
    // Without negative weights no partial sum ever comes back down, so
    // sums beyond the window's upper edge are dead ends and the table can
    // stop at it. With negative weights they are stepping stones and the
    // full range is needed.
    if sum_neg == 0 && sum_pos > ceiling {
        sum_pos = ceiling;
    }
    if sum_pos < floor {
        return None;
    }

    let width = usize::try_from(sum_pos.checked_sub(sum_neg)?.checked_add(1)?).ok()?;
    if width == 0 {
        return None;
    }

    let table = reachability_table(sizes, sum_neg, width);
    let start = scan_window(table.last()?, target, tolerance, sum_neg, sum_pos)?;
    Some(backtrack(sizes, &table, sum_neg, start))
}

/// Builds the reachability table: row `i`, column `j` is true when some
/// subset of `sizes[..=i]` sums to `j + sum_neg`.
fn reachability_table(sizes: &[i64], sum_neg: i64, width: usize) -> Vec<Vec<bool>> {
    let mut table: Vec<Vec<bool>> = Vec::with_capacity(sizes.len());
    for &value in sizes {
        let mut row = vec![false; width];
        let previous = table.last();
        for (column, cell) in row.iter_mut().enumerate() {
            let sum = sum_neg + column as i64;
            *cell = value == sum
                || previous.is_some_and(|prior| prior[column])
                || previous.is_some_and(|prior| {
                    let shifted = column as i64 - value;
                    (0..width as i64).contains(&shifted) && prior[shifted as usize]
                });
        }
        table.push(row);
    }
    table
}

/// Scans outward from the target for the closest reachable sum inside the
/// tolerance window, trying `target + offset` before `target - offset`.
fn scan_window(
    last_row: &[bool],
    target: i64,
    tolerance: i64,
    sum_neg: i64,
    sum_pos: i64,
) -> Option<usize> {
    let reachable = |sum: i64| -> Option<usize> {
        let column = usize::try_from(sum.checked_sub(sum_neg)?).ok()?;
        last_row.get(column).copied().unwrap_or(false).then_some(column)
    };
    for offset in 0..=tolerance {
        let above = target.saturating_add(offset);
        let below = target.saturating_sub(offset);
        if let Some(column) = reachable(above) {
            return Some(column);
        }
        if offset > 0 {
            if let Some(column) = reachable(below) {
                return Some(column);
            }
        }
        if above > sum_pos && below < sum_neg {
            break;
        }
    }
    None
}

/// Recovers one subset that reaches the sum at `start`.
///
/// Walks the rows last to first. A row whose cell is already reachable one
/// row up contributes nothing; otherwise the row's item is part of the
/// subset and its weight is peeled off the remaining sum. A zero-weight
/// item is never forced in: it can only appear required when the remaining
/// sum is already zero, which terminates the walk first.
fn backtrack(sizes: &[i64], table: &[Vec<bool>], sum_neg: i64, start: usize) -> Vec<usize> {
    let mut chosen = Vec::new();
    let mut remaining = start as i64 + sum_neg;
    for row in (0..sizes.len()).rev() {
        if remaining == 0 {
            break;
        }
        let column = (remaining - sum_neg) as usize;
        if row > 0 && table[row - 1][column] {
            continue;
        }
        if sizes[row] == 0 {
            continue;
        }
        chosen.push(row);
        remaining -= sizes[row];
    }
    debug_assert_eq!(remaining, 0, "backtrack must account for the selected sum");
    chosen.reverse();
    chosen
}

/// Greedily picks items whose weights fit under `target`, largest first.
///
/// Returns the positions of the chosen items in the order they were taken
/// (descending weight, original order among equal weights). The returned
/// sum never exceeds `target` when all weights are non-negative, but it is
/// not guaranteed to be maximal or closest.
///
/// # Examples
/// ```
/// use cohort_core::approximate_subset;
///
/// assert_eq!(approximate_subset(&[5i64, 4, 3], 8), vec![0, 2]);
/// assert!(approximate_subset(&[7i64, 6], 5).is_empty());
/// ```
#[must_use]
pub fn approximate_subset<T: Countable>(items: &[T], target: i64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&index| Reverse(items[index].size()));

    let mut chosen = Vec::new();
    let mut sum = 0i64;
    for index in order {
        let next = sum.saturating_add(items[index].size());
        if next <= target {
            chosen.push(index);
            sum = next;
        }
    }
    chosen
}

#[cfg(test)]
mod property;
