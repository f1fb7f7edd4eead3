//! Conflict resolution: chronological backtracking extended with a
//! backjumping probe.
//!
//! After a conflict the driver rewinds to the most recent decision and asks
//! whether the conflict can be blamed on that decision alone: it substitutes
//! the decision for the one below it and re-runs propagation speculatively.
//! As long as the conflict reappears, the intermediate decision is discarded;
//! the first time it does not, the rewind is rolled back. The surviving
//! decision is then flipped.

use tracing::debug;

use crate::data::Lit;
use crate::propagate::PropagationResult;
use crate::trail::StepKind;
use crate::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnalyzeResult {
    /// The conflict reaches back to the root; the input is unsatisfiable.
    Unsat,

    /// A decision was flipped; search continues.
    Done,
}

impl Solver {
    pub(crate) fn analyze_contradiction(&mut self) -> AnalyzeResult {
        self.trail.backtrack();
        if self.trail.is_empty() {
            return AnalyzeResult::Unsat;
        }

        // The decision the conflict is provisionally blamed on. Popping does
        // not clear its assignment: the probes propagate from it.
        let x = self
            .trail
            .pop()
            .expect("backtrack left a decision on a nonempty trail");
        debug_assert_eq!(x.kind, StepKind::Decision);

        loop {
            let head_save = self.trail.head();
            let assignment_save = self.trail.save_assignment();

            self.trail.backtrack();
            if self.trail.is_empty() {
                // no decision left to skip over
                self.trail.restore_head(head_save);
                self.trail.restore_assignment(assignment_save);
                break;
            }

            // Substitute the blamed decision for the one below it and check
            // whether propagation still runs into a conflict.
            let skipped = self
                .trail
                .top()
                .expect("backtrack left a decision on a nonempty trail");
            debug_assert_eq!(skipped.kind, StepKind::Decision);
            self.trail.set_top(x);
            self.trail.clear_assignment(skipped.lit.var());

            let inner_save = self.trail.save_assignment();
            let flag = self.propagate(x.lit, false);
            self.trail.restore_assignment(inner_save);

            if flag == PropagationResult::Contradiction {
                // The skipped decision was irrelevant to the conflict:
                // discard it for good and try to jump further down.
                self.stats.backjumps += 1;
                debug!("backjumping over decision {}", skipped.lit);
                self.trail.pop();
            } else {
                self.trail.set_top(skipped);
                self.trail.restore_head(head_save);
                self.trail.restore_assignment(assignment_save);
                break;
            }
        }

        let conflict = self.conflict_clause(x.lit);
        debug!("conflict clause {conflict:?}");

        // Flip the blamed decision. It enters as deduced, so exhausting this
        // branch later backtracks straight past it.
        debug!("flipping decision {} to {}", x.lit, -x.lit);
        self.trail.assign(-x.lit, StepKind::Deduced);
        AnalyzeResult::Done
    }

    /// The negations of the decisions whose joint assertion propagated into
    /// the conflict, `driver` last. A sound lemma implied by the input; kept
    /// for diagnostics, never entered into the database.
    fn conflict_clause(&self, driver: Lit) -> Vec<Lit> {
        self.trail
            .steps()
            .iter()
            .filter(|step| step.kind == StepKind::Decision)
            .map(|step| -step.lit)
            .chain(std::iter::once(-driver))
            .collect()
    }
}
