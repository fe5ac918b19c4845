//! Deduplicating set of sessions.

use std::collections::{BTreeSet, HashSet};

use crate::session::Session;

/// Sessions keyed by full value equality.
///
/// Keeps a vector for ordered views and a hash index for membership, so
/// inserting a document's worth of lines stays linear.
#[derive(Debug, Clone, Default)]
pub struct SessionSet {
    items: Vec<Session>,
    index: HashSet<Session>,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `session` unless an equal one is already present.
    ///
    /// Returns `true` when the set changed.
    pub fn insert(&mut self, session: Session) -> bool {
        if self.index.contains(&session) {
            return false;
        }
        self.index.insert(session.clone());
        self.items.push(session);
        true
    }

    pub fn contains(&self, session: &Session) -> bool {
        self.index.contains(session)
    }

    /// Remove the session equal to `session`, returning whether one was present.
    pub fn remove(&mut self, session: &Session) -> bool {
        if !self.index.remove(session) {
            return false;
        }
        self.items.retain(|s| s != session);
        true
    }

    /// A new set holding the sessions accepted by `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> SessionSet
    where
        F: FnMut(&Session) -> bool,
    {
        self.items
            .iter()
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }

    /// Sort in place by `(day, start)`. The sort is stable, so ties keep their
    /// current relative order.
    pub fn sort(&mut self) {
        self.items.sort_by(Session::schedule_cmp);
    }

    /// Move every session of `other` into this set.
    pub fn merge(&mut self, other: SessionSet) {
        self.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<Session> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct room codes, sorted.
    pub fn rooms(&self) -> Vec<String> {
        let rooms: BTreeSet<&str> = self.items.iter().map(|s| s.room.as_str()).collect();
        rooms.into_iter().map(str::to_string).collect()
    }

    /// Distinct course codes, sorted.
    pub fn course_codes(&self) -> Vec<String> {
        let codes: BTreeSet<&str> = self.items.iter().map(|s| s.course_code.as_str()).collect();
        codes.into_iter().map(str::to_string).collect()
    }
}

impl Extend<Session> for SessionSet {
    fn extend<I: IntoIterator<Item = Session>>(&mut self, iter: I) {
        for session in iter {
            self.insert(session);
        }
    }
}

impl FromIterator<Session> for SessionSet {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        let mut set = SessionSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for SessionSet {
    type Item = Session;
    type IntoIter = std::vec::IntoIter<Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SessionSet {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
