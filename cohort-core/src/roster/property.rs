//! Property-based partition checks driven by random edit sequences.
//!
//! Every edit is mirrored into a plain node/edge model; after each step
//! the roster's groups must equal the components the brute-force oracle
//! recomputes from scratch. This is the partition invariant: groups are
//! exactly the connected components of the undirected edge graph at all
//! times, regardless of the path taken to reach it.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use test_strategy::Arbitrary;

use cohort_test_support::graph::components;

use crate::{Roster, person::PersonId};

const POPULATION: u64 = 8;

/// One random mutation against a small fixed population.
///
/// Endpoints are drawn blindly, so edits regularly collide with earlier
/// removals or duplicate edges; the roster must refuse those without
/// disturbing the partition.
#[derive(Debug, Clone, Copy, Arbitrary)]
enum Edit {
    /// Add a coach/pupil edge.
    Link(#[strategy(0..POPULATION)] u64, #[strategy(0..POPULATION)] u64),
    /// Remove a coach/pupil edge.
    Unlink(#[strategy(0..POPULATION)] u64, #[strategy(0..POPULATION)] u64),
    /// Remove a person outright.
    Retire(#[strategy(0..POPULATION)] u64),
}

/// Plain mirror of the roster: live node labels and directed edges.
struct Mirror {
    alive: BTreeSet<u64>,
    edges: HashSet<(u64, u64)>,
}

impl Mirror {
    fn new() -> Self {
        Self {
            alive: (0..POPULATION).collect(),
            edges: HashSet::new(),
        }
    }

    fn expected_partition(&self) -> BTreeSet<BTreeSet<u64>> {
        let nodes: Vec<u64> = self.alive.iter().copied().collect();
        let undirected: Vec<(u64, u64)> = self.edges.iter().copied().collect();
        components(&nodes, &undirected)
    }
}

fn actual_partition(roster: &Roster) -> BTreeSet<BTreeSet<u64>> {
    roster
        .groups()
        .into_iter()
        .map(|group| {
            roster
                .group(group)
                .expect("enumerated group is live")
                .members()
                .map(PersonId::get)
                .collect()
        })
        .collect()
}

fn apply(roster: &mut Roster, mirror: &mut Mirror, ids: &[PersonId], edit: Edit) {
    match edit {
        Edit::Link(coach, pupil) => {
            if roster.add_edge(ids[coach as usize], ids[pupil as usize]).is_ok() {
                mirror.edges.insert((coach, pupil));
            }
        }
        Edit::Unlink(coach, pupil) => {
            if roster.remove_edge(ids[coach as usize], ids[pupil as usize]).is_ok() {
                mirror.edges.remove(&(coach, pupil));
            }
        }
        Edit::Retire(label) => {
            if roster.remove_person(ids[label as usize]).is_ok() {
                mirror.alive.remove(&label);
                mirror
                    .edges
                    .retain(|&(coach, pupil)| coach != label && pupil != label);
            }
        }
    }
}

proptest! {
    #[test]
    fn groups_always_equal_the_undirected_components(
        edits in prop::collection::vec(any::<Edit>(), 0..40),
    ) {
        let mut roster = Roster::new();
        let ids: Vec<PersonId> = (0..POPULATION)
            .map(|label| roster.create_person(format!("p{label}")))
            .collect();
        let mut mirror = Mirror::new();

        for (step, edit) in edits.into_iter().enumerate() {
            apply(&mut roster, &mut mirror, &ids, edit);
            prop_assert_eq!(
                actual_partition(&roster),
                mirror.expected_partition(),
                "partition diverged after step {} ({:?})",
                step,
                edit,
            );
            prop_assert_eq!(roster.person_count(), mirror.alive.len());
        }
    }
}
