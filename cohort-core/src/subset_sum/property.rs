//! Property-based checks comparing the solvers against brute force.
//!
//! Inputs stay small (at most ten weights) so exhaustive bitmask
//! enumeration of every non-empty subset remains affordable as an oracle.

use proptest::prelude::*;

use super::{approximate_subset, exact_subset_sizes};

/// Sum of the weights at the given positions.
fn subset_total(sizes: &[i64], indices: &[usize]) -> i64 {
    indices.iter().map(|&index| sizes[index]).sum()
}

/// Sums of every non-empty subset, by bitmask enumeration.
fn achievable_sums(sizes: &[i64]) -> Vec<i64> {
    let mut sums = Vec::new();
    for mask in 1u32..(1u32 << sizes.len()) {
        let sum = sizes
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, &weight)| weight)
            .sum();
        sums.push(sum);
    }
    sums
}

proptest! {
    #[test]
    fn exact_solver_agrees_with_brute_force(
        sizes in prop::collection::vec(-12i64..=12, 1..=10),
        target in -20i64..=30,
        tolerance in 0u64..=4,
    ) {
        let in_window = |sum: i64| (sum - target).unsigned_abs() <= tolerance;
        let closest = achievable_sums(&sizes)
            .into_iter()
            .filter(|&sum| in_window(sum))
            .map(|sum| (sum - target).unsigned_abs())
            .min();

        match exact_subset_sizes(&sizes, target, tolerance) {
            Some(chosen) => {
                prop_assert!(chosen.iter().all(|&index| index < sizes.len()));
                prop_assert!(
                    chosen.windows(2).all(|pair| pair[0] < pair[1]),
                    "indices must ascend without repeats",
                );
                let sum = subset_total(&sizes, &chosen);
                prop_assert!(in_window(sum), "sum {} escapes the window", sum);
                prop_assert_eq!(
                    Some((sum - target).unsigned_abs()),
                    closest,
                    "a closer achievable sum exists",
                );
            }
            None => prop_assert_eq!(closest, None, "solver missed an achievable sum"),
        }
    }

    #[test]
    fn approximate_solver_stays_at_or_below_the_target(
        sizes in prop::collection::vec(0i64..=12, 0..=12),
        target in 0i64..=40,
    ) {
        let chosen = approximate_subset(&sizes, target);
        prop_assert!(chosen.iter().all(|&index| index < sizes.len()));

        let mut deduplicated = chosen.clone();
        deduplicated.sort_unstable();
        deduplicated.dedup();
        prop_assert_eq!(deduplicated.len(), chosen.len(), "an item was taken twice");

        prop_assert!(subset_total(&sizes, &chosen) <= target);
    }
}
