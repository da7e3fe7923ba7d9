//! Group-preferring tag selection.
//!
//! Both entry points try to tag whole groups only, so that everyone who is
//! connected shares the same label state. The approximate selector may, as
//! a last resort, partially tag one group to land exactly on the target;
//! the exact selector never does.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::{group::GroupId, selection::Selection, subset_sum};

use super::Roster;

impl Roster {
    /// Tags approximately `selection.target()` people, preferring whole
    /// groups.
    ///
    /// Greedy passes tag whole groups while they fit under the remaining
    /// target; passes repeat over the shrinking remainder until one adds
    /// nothing. If the groups are then exhausted, or the tagged count is
    /// within tolerance of the target, that count is returned. Otherwise
    /// the single largest remaining group (smallest identity on a size
    /// tie) is partially tagged to land exactly on the target; this is the
    /// only path that leaves a group with mixed label state. The result falls
    /// short of `target - tolerance` only when the whole roster holds
    /// fewer people than the target.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{Roster, Selection};
    ///
    /// let mut roster = Roster::new();
    /// let coach = roster.create_person("ada");
    /// let pupil = roster.create_person("brin");
    /// roster.add_edge(coach, pupil)?;
    /// roster.create_person("ceil");
    ///
    /// let tagged = roster.select_approx(&Selection::new("flu", 3));
    /// assert_eq!(tagged, 3);
    /// # Ok::<(), cohort_core::RosterError>(())
    /// ```
    #[instrument(
        name = "roster.select_approx",
        skip(self, selection),
        fields(
            label = %selection.label(),
            target = selection.target(),
            tolerance = selection.tolerance(),
        ),
    )]
    pub fn select_approx(&mut self, selection: &Selection) -> usize {
        let mut remaining = self.groups();
        let mut tagged: i64 = 0;

        // First-fit-decreasing is not globally optimal, so re-running it
        // over the leftovers with the shrunken target may still fill gaps.
        loop {
            let sizes = self.group_sizes(&remaining);
            let chosen =
                subset_sum::approximate_subset(&sizes, selection.target().saturating_sub(tagged));
            if chosen.is_empty() {
                break;
            }
            for &index in &chosen {
                self.tag_whole_group(remaining[index], selection.label());
                tagged += sizes[index];
            }
            debug!(groups = chosen.len(), tagged, "greedy pass tagged whole groups");
            let picked: HashSet<usize> = chosen.into_iter().collect();
            let mut index = 0;
            remaining.retain(|_| {
                let keep = !picked.contains(&index);
                index += 1;
                keep
            });
        }

        let deviation = tagged.saturating_sub(selection.target()).unsigned_abs();
        if remaining.is_empty() || deviation <= selection.tolerance() {
            return usize::try_from(tagged).unwrap_or(0);
        }

        // Every remaining group is bigger than the shortfall, otherwise the
        // greedy passes would have taken it, so one partial tag suffices.
        let shortfall = usize::try_from(selection.target() - tagged).unwrap_or(0);
        if shortfall == 0 {
            return usize::try_from(tagged).unwrap_or(0);
        }
        let largest = self.largest_group(&remaining);
        warn!(
            group = %largest,
            shortfall,
            "breaking group homogeneity to reach the target"
        );
        self.tag_up_to(largest, selection.label(), shortfall)
            .expect("enumerated group id must resolve");
        usize::try_from(selection.target()).unwrap_or(0)
    }

    /// Tags exactly-within-tolerance `selection.target()` people without
    /// splitting any group, or fails.
    ///
    /// Runs the exact subset-sum solver over the current groups. `None`
    /// means no combination of whole groups lands inside the tolerance
    /// window; in that case nothing is mutated. On success every chosen
    /// group is tagged in full and the total tagged count is returned.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{Roster, Selection};
    ///
    /// let mut roster = Roster::new();
    /// let coach = roster.create_person("ada");
    /// let pupil = roster.create_person("brin");
    /// roster.add_edge(coach, pupil)?;
    ///
    /// assert_eq!(roster.select_exact(&Selection::new("flu", 1)), None);
    /// assert_eq!(roster.count_with_tag("flu"), 0);
    /// assert_eq!(roster.select_exact(&Selection::new("flu", 2)), Some(2));
    /// # Ok::<(), cohort_core::RosterError>(())
    /// ```
    #[instrument(
        name = "roster.select_exact",
        skip(self, selection),
        fields(
            label = %selection.label(),
            target = selection.target(),
            tolerance = selection.tolerance(),
        ),
    )]
    pub fn select_exact(&mut self, selection: &Selection) -> Option<usize> {
        let groups = self.groups();
        let sizes = self.group_sizes(&groups);
        let chosen =
            subset_sum::exact_subset_sizes(&sizes, selection.target(), selection.tolerance())?;

        let mut tagged: i64 = 0;
        for index in chosen {
            self.tag_whole_group(groups[index], selection.label());
            tagged += sizes[index];
        }
        debug!(tagged, "exact selection tagged whole groups");
        Some(usize::try_from(tagged).unwrap_or(0))
    }

    fn group_sizes(&self, groups: &[GroupId]) -> Vec<i64> {
        groups
            .iter()
            .map(|id| self.groups.get(id).map_or(0, |group| group.len() as i64))
            .collect()
    }

    fn tag_whole_group(&mut self, group: GroupId, label: &str) {
        self.tag_group(group, label)
            .expect("enumerated group id must resolve");
    }

    /// Largest group in `candidates`; ties go to the smallest identity so
    /// the choice is stable.
    fn largest_group(&self, candidates: &[GroupId]) -> GroupId {
        candidates
            .iter()
            .copied()
            .min_by_key(|id| {
                (
                    std::cmp::Reverse(self.groups.get(id).map_or(0, |group| group.len())),
                    *id,
                )
            })
            .expect("candidate list must be non-empty")
    }
}
