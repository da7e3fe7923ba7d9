//! People: graph vertices carrying edges, tags, and a group handle.

use std::collections::HashSet;
use std::fmt;

use crate::group::GroupId;

/// Identifier assigned to a person when they join a [`crate::Roster`].
///
/// Identifiers are allocated from a per-roster monotonic counter and are
/// never reused, even after the person is removed.
///
/// # Examples
/// ```
/// use cohort_core::Roster;
///
/// let mut roster = Roster::new();
/// let first = roster.create_person("ada");
/// let second = roster.create_person("brin");
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(u64);

impl PersonId {
    #[rustfmt::skip]
    pub(crate) fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member of the social graph.
///
/// Holds the display name, the opaque tag set, the directed coach/pupil
/// edges, and a non-owning handle to the current group. Edge direction has
/// meaning for the coach/pupil relation only; connectivity treats every edge
/// as undirected. The group handle is refreshed by the roster on every merge
/// and split, so a live person always resolves to exactly one group.
#[derive(Debug, Clone)]
pub struct Person {
    pub(crate) id: PersonId,
    pub(crate) name: String,
    pub(crate) tags: HashSet<String>,
    pub(crate) coaches: HashSet<PersonId>,
    pub(crate) pupils: HashSet<PersonId>,
    pub(crate) group: GroupId,
}

impl Person {
    pub(crate) fn new(id: PersonId, name: String, group: GroupId) -> Self {
        Self {
            id,
            name,
            tags: HashSet::new(),
            coaches: HashSet::new(),
            pupils: HashSet::new(),
            group,
        }
    }

    /// Returns this person's identifier.
    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identity of the group this person currently belongs to.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::Roster;
    ///
    /// let mut roster = Roster::new();
    /// let coach = roster.create_person("ada");
    /// let pupil = roster.create_person("brin");
    /// roster.add_edge(coach, pupil)?;
    /// let a = roster.person(coach).expect("registered").group();
    /// let b = roster.person(pupil).expect("registered").group();
    /// assert_eq!(a, b);
    /// # Ok::<(), cohort_core::RosterError>(())
    /// ```
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Reports whether this person carries the given tag.
    #[must_use]
    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.contains(label)
    }

    /// Iterates over the tags attached to this person, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Iterates over the people coaching this person.
    pub fn coaches(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.coaches.iter().copied()
    }

    /// Iterates over the people this person coaches.
    pub fn pupils(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.pupils.iter().copied()
    }
}
