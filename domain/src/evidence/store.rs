//! Per-team evidence store.

use super::fragment::{EvidenceFragment, FragmentKey};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Result of merging one fragment into a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// An existing fragment with the same key had a lower relevance
    Replaced,
    /// An existing fragment with the same key was at least as relevant
    Kept,
}

/// Deduplicated collection of fragments owned by exactly one supervisor.
///
/// Merging is idempotent: the stored fragment for a key is always the one
/// with the highest relevance seen so far.
#[derive(Debug, Clone, Default)]
pub struct EvidenceStore {
    fragments: HashMap<FragmentKey, EvidenceFragment>,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn merge(&mut self, fragment: EvidenceFragment) -> MergeOutcome {
        let key = fragment.key();
        match self.fragments.get_mut(&key) {
            None => {
                self.fragments.insert(key, fragment);
                MergeOutcome::Inserted
            }
            Some(existing) if fragment.relevance > existing.relevance => {
                *existing = fragment;
                MergeOutcome::Replaced
            }
            Some(_) => MergeOutcome::Kept,
        }
    }

    /// Merge many fragments, returning how many new keys were added
    pub fn merge_all(&mut self, fragments: impl IntoIterator<Item = EvidenceFragment>) -> usize {
        let mut added = 0;
        for fragment in fragments {
            if self.merge(fragment) == MergeOutcome::Inserted {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, id: &str) -> Option<&EvidenceFragment> {
        self.fragments.values().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceFragment> {
        self.fragments.values()
    }

    /// Composite ranking weight: relevance decayed by fragment age in rounds
    pub fn composite_score(fragment: &EvidenceFragment, current_round: usize, decay: f64) -> f64 {
        let age = current_round.saturating_sub(fragment.round);
        let exponent = i32::try_from(age).unwrap_or(i32::MAX);
        fragment.relevance * decay.powi(exponent)
    }

    /// Top `k` fragments by composite score. Ties are broken by id so the
    /// selection is deterministic.
    pub fn top_k(&self, current_round: usize, decay: f64, k: usize) -> Vec<EvidenceFragment> {
        let mut ranked: Vec<(f64, &EvidenceFragment)> = self
            .fragments
            .values()
            .map(|f| (Self::composite_score(f, current_round, decay), f))
            .collect();
        ranked.sort_by(|(sa, a), (sb, b)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.into_iter().take(k).map(|(_, f)| f.clone()).collect()
    }

    /// Evict the lowest-ranked fragments until at most `cap` remain.
    ///
    /// Ranking is the same as [`EvidenceStore::top_k`]. Returns the number
    /// of fragments evicted.
    pub fn retain_top(&mut self, current_round: usize, decay: f64, cap: usize) -> usize {
        if self.fragments.len() <= cap {
            return 0;
        }
        let keep: HashSet<FragmentKey> = self
            .top_k(current_round, decay, cap)
            .iter()
            .map(EvidenceFragment::key)
            .collect();
        let before = self.fragments.len();
        self.fragments.retain(|key, _| keep.contains(key));
        before - self.fragments.len()
    }

    /// Mean relevance of everything in the store, 0 when empty
    pub fn average_relevance(&self) -> f64 {
        if self.fragments.is_empty() {
            return 0.0;
        }
        self.fragments.values().map(|f| f.relevance).sum::<f64>() / self.fragments.len() as f64
    }
}
