//! Cohort core library.
//!
//! Models a social graph of people connected by directed coach/pupil
//! edges, maintains an incremental partition of that graph into connected
//! groups, and tags a target number of people while preferring to keep
//! whole groups homogeneous. Edge insertion merges groups; edge or person
//! removal re-partitions only the affected group. Group selection runs a
//! tolerance-bounded subset-sum solver (exact or greedy-approximate) over
//! the current group sizes.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod group;
mod person;
mod roster;
mod selection;
mod subset_sum;

pub use crate::{
    error::{Result, RosterError, RosterErrorCode},
    group::{Group, GroupId},
    person::{Person, PersonId},
    roster::Roster,
    selection::Selection,
    subset_sum::{Countable, approximate_subset, exact_subset, exact_subset_sizes},
};
