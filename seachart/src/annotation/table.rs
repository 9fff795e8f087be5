//! Entity table of materialized annotations.
//!
//! Records are owned here and addressed by [`AnnotationId`]; a separate index
//! maps each [`AnnotationKey`] to the id it was materialized under. An id is
//! never reused, so the host can key view reuse on it.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::tint::{pin_tint, Rgb};
use super::types::{Annotation, AnnotationId, AnnotationKey, AnnotationKind};
use crate::time::wall_age;

/// One materialized annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub id: AnnotationId,
    pub key: AnnotationKey,
    pub annotation: Annotation,
    /// Current tint; group pins only.
    pub tint: Option<Rgb>,
}

/// Changes to push to the host after a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileDiff {
    pub added: Vec<AnnotationId>,
    pub updated: Vec<AnnotationId>,
    pub removed: Vec<AnnotationId>,
}

impl ReconcileDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Materialized annotations keyed by stable id.
#[derive(Debug, Default)]
pub struct AnnotationTable {
    records: BTreeMap<AnnotationId, AnnotationRecord>,
    index: HashMap<AnnotationKey, AnnotationId>,
    next_id: u64,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: AnnotationId) -> Option<&AnnotationRecord> {
        self.records.get(&id)
    }

    pub fn id_of(&self, key: &AnnotationKey) -> Option<AnnotationId> {
        self.index.get(key).copied()
    }

    /// Records in materialization order.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> {
        self.records.values()
    }

    /// Bring the materialized set of one `kind` in line with `desired`.
    ///
    /// Existing records are mutated in place and keep their id; entries not
    /// yet materialized are added; records of `kind` absent from `desired`
    /// are removed. Records of other kinds are untouched. Desired entries of
    /// a different kind are ignored.
    pub fn reconcile(
        &mut self,
        kind: AnnotationKind,
        desired: impl IntoIterator<Item = Annotation>,
        now: DateTime<Utc>,
    ) -> ReconcileDiff {
        let mut diff = ReconcileDiff::default();

        // Last entry per key wins; keys keep their first-seen order.
        let mut order: Vec<AnnotationKey> = Vec::new();
        let mut latest: HashMap<AnnotationKey, Annotation> = HashMap::new();
        for annotation in desired {
            if annotation.kind() != kind {
                continue;
            }
            let key = annotation.key();
            if latest.insert(key.clone(), annotation).is_none() {
                order.push(key);
            }
        }

        for key in &order {
            let Some(annotation) = latest.remove(key) else {
                continue;
            };
            let tint = tint_for(&annotation, now);

            match self.index.get(key).copied() {
                Some(id) => {
                    if let Some(record) = self.records.get_mut(&id) {
                        if record.annotation != annotation || record.tint != tint {
                            record.annotation = annotation;
                            record.tint = tint;
                            diff.updated.push(id);
                        }
                    }
                }
                None => {
                    let id = self.allocate();
                    self.records.insert(
                        id,
                        AnnotationRecord {
                            id,
                            key: key.clone(),
                            annotation,
                            tint,
                        },
                    );
                    self.index.insert(key.clone(), id);
                    diff.added.push(id);
                }
            }
        }

        let seen: HashSet<&AnnotationKey> = order.iter().collect();
        let stale: Vec<AnnotationId> = self
            .records
            .values()
            .filter(|r| r.key.kind() == kind && !seen.contains(&r.key))
            .map(|r| r.id)
            .collect();
        for id in stale {
            if let Some(record) = self.records.remove(&id) {
                self.index.remove(&record.key);
                diff.removed.push(id);
            }
        }

        if !diff.is_empty() {
            debug!(
                ?kind,
                added = diff.added.len(),
                updated = diff.updated.len(),
                removed = diff.removed.len(),
                "Reconciled annotations"
            );
        }
        diff
    }

    /// Recompute every group pin's tint for `now`; returns the ids whose tint changed.
    pub fn refresh_tints(&mut self, now: DateTime<Utc>) -> Vec<AnnotationId> {
        let mut changed = Vec::new();
        for record in self.records.values_mut() {
            let tint = tint_for(&record.annotation, now);
            if tint != record.tint {
                record.tint = tint;
                changed.push(record.id);
            }
        }
        changed
    }

    fn allocate(&mut self) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn tint_for(annotation: &Annotation, now: DateTime<Utc>) -> Option<Rgb> {
    match annotation {
        Annotation::GroupPin(pin) => Some(pin_tint(wall_age(pin.fade_anchor(), now))),
        _ => None,
    }
}
