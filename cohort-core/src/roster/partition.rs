//! Incremental partition maintenance.
//!
//! Edge insertion can only merge two groups; edge or person removal can
//! split one group into several. Merges are cheap (proportional to the
//! absorbed group). Splits recompute reachability over the affected
//! group's members only, never the whole roster, and only when the
//! removed connection might actually have been a bridge.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::{Result, RosterError},
    group::{Group, GroupId},
    person::PersonId,
};

use super::Roster;

impl Roster {
    /// Records a directed coach/pupil edge and merges the endpoints'
    /// groups.
    ///
    /// Fails without mutating when either person is unknown, when the edge
    /// would be a self-loop, or when the edge already exists in this
    /// direction. The reverse edge between the same pair is distinct and
    /// legal, so two people may coach each other.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{Roster, RosterError};
    ///
    /// let mut roster = Roster::new();
    /// let coach = roster.create_person("ada");
    /// let pupil = roster.create_person("brin");
    /// roster.add_edge(coach, pupil)?;
    /// assert_eq!(
    ///     roster.add_edge(coach, pupil),
    ///     Err(RosterError::DuplicateEdge { coach, pupil }),
    /// );
    /// roster.add_edge(pupil, coach)?;
    /// # Ok::<(), cohort_core::RosterError>(())
    /// ```
    pub fn add_edge(&mut self, coach: PersonId, pupil: PersonId) -> Result<()> {
        self.require_person(coach)?;
        self.require_person(pupil)?;
        if coach == pupil {
            return Err(RosterError::SelfLoop { id: coach });
        }
        if self.person_ref(coach).pupils.contains(&pupil) {
            return Err(RosterError::DuplicateEdge { coach, pupil });
        }

        self.person_mut(coach).pupils.insert(pupil);
        self.person_mut(pupil).coaches.insert(coach);

        let into = self.person_ref(coach).group;
        self.absorb(into, pupil);
        Ok(())
    }

    /// Removes a directed coach/pupil edge and re-partitions the group it
    /// connected.
    ///
    /// Fails without mutating when either person is unknown or the edge
    /// does not exist in this direction. The removed edge may have been
    /// the sole connector for part of the group, so reachability is
    /// recomputed from the coach's side; if nothing was disconnected the
    /// group is left structurally untouched.
    pub fn remove_edge(&mut self, coach: PersonId, pupil: PersonId) -> Result<()> {
        self.require_person(coach)?;
        self.require_person(pupil)?;
        if !self.person_ref(coach).pupils.contains(&pupil) {
            return Err(RosterError::MissingEdge { coach, pupil });
        }

        self.person_mut(coach).pupils.remove(&pupil);
        self.person_mut(pupil).coaches.remove(&coach);

        self.repartition(coach);
        Ok(())
    }

    /// Removes a person along with every incident edge.
    ///
    /// The person's group shrinks by one member; if that empties the group
    /// it is discarded, otherwise reachability is recomputed from an
    /// arbitrary remaining member, since removing a vertex can disconnect
    /// its former group just like removing an edge can.
    pub fn remove_person(&mut self, id: PersonId) -> Result<()> {
        let person = self
            .people
            .remove(&id)
            .ok_or(RosterError::UnknownPerson { id })?;
        for pupil in &person.pupils {
            self.person_mut(*pupil).coaches.remove(&id);
        }
        for coach in &person.coaches {
            self.person_mut(*coach).pupils.remove(&id);
        }

        let group = person.group;
        let survivor = {
            let members = &mut self.group_mut(group).members;
            members.remove(&id);
            members.iter().next().copied()
        };
        match survivor {
            None => {
                self.groups.remove(&group);
            }
            Some(root) => self.repartition(root),
        }
        debug_assert!(self.partition_coherent(), "partition invariant violated");
        Ok(())
    }

    /// Moves every member of `person`'s group into `into`, discarding the
    /// absorbed group. No-op when the person is already there.
    fn absorb(&mut self, into: GroupId, person: PersonId) {
        let from = self.person_ref(person).group;
        if from == into {
            return;
        }
        let absorbed = self
            .groups
            .remove(&from)
            .expect("live group id must resolve");
        debug!(
            from = %from,
            into = %into,
            absorbed = absorbed.members.len(),
            "merging groups"
        );
        for member in &absorbed.members {
            self.person_mut(*member).group = into;
        }
        self.group_mut(into).members.extend(absorbed.members);
        debug_assert!(self.partition_coherent(), "partition invariant violated");
    }

    /// Re-partitions the group containing `root` after a disconnection may
    /// have occurred.
    ///
    /// Computes the set reachable from `root` within the group. When every
    /// member is still reachable the group keeps its identity and nothing
    /// changes. Otherwise the old group is discarded and each maximal
    /// connected fragment (the reachable set first, then each component
    /// of the remainder) becomes its own fresh group.
    fn repartition(&mut self, root: PersonId) {
        let group = self.person_ref(root).group;
        let members = self
            .groups
            .get(&group)
            .expect("live group id must resolve")
            .members
            .clone();
        let reached = self.reachable_within(root, &members);
        if reached.len() == members.len() {
            return;
        }

        self.groups.remove(&group);
        let mut remainder: HashSet<PersonId> = members.difference(&reached).copied().collect();
        let mut fragments = 1;
        self.adopt(reached);
        while let Some(&seed) = remainder.iter().next() {
            let component = self.reachable_within(seed, &remainder);
            remainder.retain(|person| !component.contains(person));
            fragments += 1;
            self.adopt(component);
        }
        debug!(
            group = %group,
            members = members.len(),
            fragments,
            "group lost cohesion, split into fragments"
        );
        debug_assert!(self.partition_coherent(), "partition invariant violated");
    }

    /// Collects everyone reachable from `root` through the undirected view
    /// of the coach/pupil edges, restricted to `allowed`.
    ///
    /// Iterative on purpose: the traversal stack lives on the heap so deep
    /// graphs cannot exhaust the call stack.
    fn reachable_within(&self, root: PersonId, allowed: &HashSet<PersonId>) -> HashSet<PersonId> {
        let mut reached = HashSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if !allowed.contains(&current) || !reached.insert(current) {
                continue;
            }
            let person = self.person_ref(current);
            stack.extend(person.coaches.iter().chain(person.pupils.iter()).copied());
        }
        reached
    }

    /// Installs a fresh group over the given members.
    fn adopt(&mut self, members: HashSet<PersonId>) {
        let id = self.fresh_group_id();
        for member in &members {
            self.person_mut(*member).group = id;
        }
        self.groups.insert(id, Group::with_members(id, members));
    }

    /// Exhaustive back-reference check, used only behind `debug_assert!`.
    fn partition_coherent(&self) -> bool {
        let people_consistent = self.people.iter().all(|(id, person)| {
            self.groups
                .get(&person.group)
                .is_some_and(|group| group.contains(*id))
        });
        let groups_consistent = self.groups.iter().all(|(id, group)| {
            !group.is_empty()
                && group
                    .members()
                    .all(|member| self.people.get(&member).is_some_and(|p| p.group == *id))
        });
        people_consistent && groups_consistent
    }
}
