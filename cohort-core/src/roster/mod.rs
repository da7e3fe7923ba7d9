//! The roster: one registry owning every person and the group partition.
//!
//! A [`Roster`] is an ordinary owned value with an explicit lifecycle, so
//! independent rosters can coexist and tests stay deterministic. It owns
//! the people, the side table resolving [`GroupId`] handles to group
//! membership, and both identifier counters. All mutation goes through
//! `&mut self`, which is what makes the merge/split bookkeeping safe: no
//! caller can observe a half-updated partition.

mod partition;
#[cfg(test)]
mod property;
mod select;

use std::collections::{HashMap, HashSet};

use crate::{
    error::{Result, RosterError},
    group::{Group, GroupId},
    person::{Person, PersonId},
};

/// Registry of people, their coach/pupil edges, and the group partition.
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
/// let tagged = roster.select_exact(&Selection::new("flu", 2));
/// assert_eq!(tagged, Some(2));
/// assert_eq!(roster.count_with_tag("flu"), 2);
/// # Ok::<(), cohort_core::RosterError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: HashMap<PersonId, Person>,
    groups: HashMap<GroupId, Group>,
    next_person: u64,
    next_group: u64,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new person under the given display name.
    ///
    /// The person starts alone in a fresh singleton group.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::Roster;
    ///
    /// let mut roster = Roster::new();
    /// let id = roster.create_person("ada");
    /// assert_eq!(roster.person(id).expect("registered").name(), "ada");
    /// assert_eq!(roster.groups().len(), 1);
    /// ```
    pub fn create_person(&mut self, name: impl Into<String>) -> PersonId {
        let id = PersonId::new(self.next_person);
        self.next_person += 1;
        let group = self.fresh_group_id();
        self.groups.insert(group, Group::singleton(group, id));
        self.people.insert(id, Person::new(id, name.into(), group));
        id
    }

    /// Looks up a person by identifier.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Returns the number of live people.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Replaces a person's display name.
    pub fn rename_person(&mut self, id: PersonId, name: impl Into<String>) -> Result<()> {
        let person = self
            .people
            .get_mut(&id)
            .ok_or(RosterError::UnknownPerson { id })?;
        person.name = name.into();
        Ok(())
    }

    /// Adds a tag to one person, returning whether the tag set changed.
    pub fn tag_person(&mut self, id: PersonId, label: &str) -> Result<bool> {
        let person = self
            .people
            .get_mut(&id)
            .ok_or(RosterError::UnknownPerson { id })?;
        Ok(person.tags.insert(label.to_owned()))
    }

    /// Removes a tag from one person, returning whether the tag set changed.
    pub fn untag_person(&mut self, id: PersonId, label: &str) -> Result<bool> {
        let person = self
            .people
            .get_mut(&id)
            .ok_or(RosterError::UnknownPerson { id })?;
        Ok(person.tags.remove(label))
    }

    /// Looks up a group by identifier.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Collects the distinct group identities, by scanning every live
    /// person's group handle.
    ///
    /// The order is unspecified.
    #[must_use]
    pub fn groups(&self) -> Vec<GroupId> {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for person in self.people.values() {
            if seen.insert(person.group) {
                distinct.push(person.group);
            }
        }
        distinct
    }

    /// Adds `label` to every current member of the group.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::Roster;
    ///
    /// let mut roster = Roster::new();
    /// let coach = roster.create_person("ada");
    /// let pupil = roster.create_person("brin");
    /// roster.add_edge(coach, pupil)?;
    ///
    /// let group = roster.person(coach).expect("registered").group();
    /// roster.tag_group(group, "flu")?;
    /// assert_eq!(roster.count_with_tag("flu"), 2);
    /// # Ok::<(), cohort_core::RosterError>(())
    /// ```
    pub fn tag_group(&mut self, group: GroupId, label: &str) -> Result<()> {
        let members = self.require_members(group)?;
        for member in members {
            self.person_mut(member).tags.insert(label.to_owned());
        }
        Ok(())
    }

    /// Removes `label` from every current member of the group.
    pub fn untag_group(&mut self, group: GroupId, label: &str) -> Result<()> {
        let members = self.require_members(group)?;
        for member in members {
            self.person_mut(member).tags.remove(label);
        }
        Ok(())
    }

    /// Adds `label` to up to `limit` members of the group, in whatever
    /// order the membership set iterates.
    ///
    /// The choice of members is arbitrary but deterministic within one run;
    /// no fairness policy applies. Returns how many members were visited.
    pub fn tag_up_to(&mut self, group: GroupId, label: &str, limit: usize) -> Result<usize> {
        let members = self.require_members(group)?;
        let mut visited = 0;
        for member in members.into_iter().take(limit) {
            self.person_mut(member).tags.insert(label.to_owned());
            visited += 1;
        }
        Ok(visited)
    }

    /// Counts the live people carrying `label`, by full scan.
    #[must_use]
    pub fn count_with_tag(&self, label: &str) -> usize {
        self.people
            .values()
            .filter(|person| person.tags.contains(label))
            .count()
    }

    /// Reports whether the group is homogeneous for `label`: either every
    /// member carries it or none does.
    ///
    /// This is a derived property intended for verification; the selection
    /// algorithms never consult it.
    pub fn group_consistent(&self, group: GroupId, label: &str) -> Result<bool> {
        let live = self
            .groups
            .get(&group)
            .ok_or(RosterError::UnknownGroup { id: group })?;
        let tagged = live
            .members()
            .filter(|member| self.person_ref(*member).tags.contains(label))
            .count();
        Ok(tagged == 0 || tagged == live.len())
    }

    fn fresh_group_id(&mut self) -> GroupId {
        let id = GroupId::new(self.next_group);
        self.next_group += 1;
        id
    }

    fn require_person(&self, id: PersonId) -> Result<&Person> {
        self.people.get(&id).ok_or(RosterError::UnknownPerson { id })
    }

    fn require_members(&self, group: GroupId) -> Result<Vec<PersonId>> {
        self.groups
            .get(&group)
            .map(|g| g.members().collect())
            .ok_or(RosterError::UnknownGroup { id: group })
    }

    /// Resolves a person known to be live. Ids handed out by this roster
    /// stay valid until the person is removed, so a miss is a partition
    /// bookkeeping bug.
    fn person_ref(&self, id: PersonId) -> &Person {
        self.people.get(&id).expect("live person id must resolve")
    }

    fn person_mut(&mut self, id: PersonId) -> &mut Person {
        self.people
            .get_mut(&id)
            .expect("live person id must resolve")
    }

    fn group_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups.get_mut(&id).expect("live group id must resolve")
    }
}
