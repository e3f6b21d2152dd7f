//! In-memory model of the flair service.
//!
//! Behaves like a correct service by default. Individual faults can be
//! switched on through [`StoreFaults`] to check that the scenario notices.

use std::collections::{BTreeMap, HashMap};

use flaircheck_core::types::Flair;

/// Misbehaviors the store can simulate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreFaults {
    /// Upserting an existing name inserts a second entry.
    pub duplicate_upserts: bool,
    /// Deleting a flair leaves assignments pointing at the stale flair.
    pub no_cascade: bool,
    /// The public listing includes mod-only flairs.
    pub leak_mod_flairs: bool,
}

/// Flairs per community and assignments per (community, user).
#[derive(Debug, Default)]
pub struct FlairStore {
    flairs: BTreeMap<String, Vec<Flair>>,
    assignments: HashMap<(String, String), Flair>,
    faults: StoreFaults,
}

#[allow(dead_code)]
impl FlairStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: StoreFaults) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }

    pub fn list(&self, community: &str, mod_only: bool) -> Vec<Flair> {
        self.flairs
            .get(community)
            .map(|flairs| {
                flairs
                    .iter()
                    .filter(|flair| mod_only || !flair.mod_only || self.faults.leak_mod_flairs)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn upsert(&mut self, community: &str, flair: &Flair) -> bool {
        let mut stored = flair.clone();
        stored.community_actor_id = Some(community.to_owned());

        let flairs = self.flairs.entry(community.to_owned()).or_default();
        match flairs.iter_mut().find(|existing| existing.name == flair.name) {
            Some(existing) if !self.faults.duplicate_upserts => *existing = stored,
            _ => flairs.push(stored),
        }
        true
    }

    pub fn delete(&mut self, community: &str, name: &str) -> bool {
        let Some(flairs) = self.flairs.get_mut(community) else {
            return false;
        };
        let before = flairs.len();
        flairs.retain(|flair| flair.name != name);
        let removed = flairs.len() != before;
        if flairs.is_empty() {
            self.flairs.remove(community);
        }
        removed
    }

    pub fn user_flair(&self, community: &str, user: &str) -> Option<Flair> {
        let assigned = self
            .assignments
            .get(&(community.to_owned(), user.to_owned()))?;
        if self.faults.no_cascade {
            return Some(assigned.clone());
        }
        self.find(community, &assigned.name)
    }

    pub fn assign(&mut self, community: &str, user: &str, flair_name: &str) -> bool {
        let Some(flair) = self.find(community, flair_name) else {
            return false;
        };
        self.assignments
            .insert((community.to_owned(), user.to_owned()), flair);
        true
    }

    pub fn unassign(&mut self, community: &str, user: &str) -> bool {
        self.assignments
            .remove(&(community.to_owned(), user.to_owned()));
        true
    }

    pub fn communities(&self) -> Vec<String> {
        self.flairs.keys().cloned().collect()
    }

    /// Whether the store is back to its initial empty state.
    pub fn is_pristine(&self) -> bool {
        self.flairs.is_empty() && self.assignments.is_empty()
    }

    fn find(&self, community: &str, name: &str) -> Option<Flair> {
        self.flairs
            .get(community)?
            .iter()
            .find(|flair| flair.name == name)
            .cloned()
    }
}
