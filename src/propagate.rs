//! Unit propagation over the two-watched-literal index.

use crate::data::Lit;
use crate::trail::StepKind;
use crate::Solver;

/// Outcome of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    /// Some clause became falsified.
    Contradiction,

    /// All consequences applied; the watched-literal invariants hold.
    Done,
}

impl Solver {
    /// Enforce unit propagation after `lit` has been assigned true.
    ///
    /// The caller has already set the assignment and, with `update_trail`,
    /// pushed `lit` onto the trail. Only clauses watching `-lit` can have
    /// become falsified; each one is either satisfied through its other
    /// watch, rewatched onto a non-false literal, found unit (the forced
    /// literal is assigned and propagated recursively before the iteration
    /// continues), or reported as a contradiction.
    ///
    /// With `update_trail == false` forced literals are written to the
    /// assignment only; the backjump probe runs its speculative propagations
    /// through this and rolls the assignment back from a snapshot.
    pub(crate) fn propagate(&mut self, lit: Lit, update_trail: bool) -> PropagationResult {
        debug_assert!(self.trail.is_satisfied(lit));
        self.stats.propagations += 1;

        let falsified = -lit;
        let mut i = 0;
        while i < self.watches.watchers(falsified).len() {
            let cls_idx = self.watches.watchers(falsified)[i];
            let [w0, w1] = self.watches.pair(cls_idx);
            let this_slot = if w0 == falsified {
                0
            } else {
                debug_assert_eq!(w1, falsified);
                1
            };
            let other = if this_slot == 0 { w1 } else { w0 };

            // Satisfied through the other watch: leave the pair alone.
            if self.trail.is_satisfied(other) {
                i += 1;
                continue;
            }

            // Look for a replacement: a non-false literal outside the pair.
            let replacement = self
                .clause_db
                .get(cls_idx)
                .iter()
                .copied()
                .find(|&cand| cand != w0 && cand != w1 && !self.trail.is_falsified(cand));
            if let Some(new_watch) = replacement {
                self.watches.set_watch(cls_idx, this_slot, new_watch);
                self.watches.add_watcher(new_watch, cls_idx);
                self.watches.remove_watcher_at(falsified, i);
                // the next watcher slid into position i
                continue;
            }

            if self.trail.is_unassigned(other) {
                // Unit: every literal but `other` is false.
                if update_trail {
                    self.trail.assign(other, StepKind::Deduced);
                } else {
                    self.trail.assign_speculative(other);
                }
                if self.propagate(other, update_trail) == PropagationResult::Contradiction {
                    return PropagationResult::Contradiction;
                }
                i += 1;
                continue;
            }

            // Both watches false and no replacement: the clause is falsified.
            debug_assert!(self.trail.is_falsified(other));
            return PropagationResult::Contradiction;
        }

        PropagationResult::Done
    }
}
