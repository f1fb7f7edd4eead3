use crate::assignment::Assignment;
use crate::data::{Lit, Var};

/// Why a literal sits on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepKind {
    /// Guessed by the decision heuristic.
    Decision,

    /// Forced: by preprocessing, by unit propagation, or by flipping an
    /// exhausted decision.
    Deduced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub lit: Lit,
    pub kind: StepKind,
}

/// Ordered record of assigned literals with a movable head cursor.
///
/// `push` writes at the head and advances it, extending storage only at the
/// very end; `pop` retracts the head without destroying the entry or clearing
/// the popped variable's assignment. Saving `(head, assignment snapshot)`,
/// rewinding speculatively and restoring both therefore reproduces the
/// pre-rewind state exactly, entries included.
#[derive(Debug, Default)]
pub(crate) struct Trail {
    steps: Vec<Step>,
    head: usize,
    assignment: Assignment,
}

impl Trail {
    pub fn grow(&mut self, v: Var) {
        self.assignment.grow(v);
    }

    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }

    pub fn len(&self) -> usize {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head == 0
    }

    /// Does every variable have a trail entry?
    pub fn is_complete(&self) -> bool {
        self.head == self.assignment.num_vars()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps[..self.head]
    }

    /// Record `lit` as true. The variable's previous truth value, if any, is
    /// overwritten.
    pub fn assign(&mut self, lit: Lit, kind: StepKind) {
        let step = Step { lit, kind };
        if self.head == self.steps.len() {
            self.steps.push(step);
        } else {
            self.steps[self.head] = step;
        }
        self.head += 1;
        self.assignment.set(lit);
    }

    /// Set `lit` true in the assignment without recording a trail entry.
    /// Probing propagations run entirely through this.
    pub fn assign_speculative(&mut self, lit: Lit) {
        self.assignment.set(lit);
    }

    pub fn top(&self) -> Option<Step> {
        self.head.checked_sub(1).map(|i| self.steps[i])
    }

    /// Overwrite the entry below the head in place.
    pub fn set_top(&mut self, step: Step) {
        debug_assert!(self.head > 0);
        self.steps[self.head - 1] = step;
    }

    /// Retract the head. The popped variable stays assigned and the entry
    /// stays in storage.
    pub fn pop(&mut self) -> Option<Step> {
        self.head = self.head.checked_sub(1)?;
        Some(self.steps[self.head])
    }

    /// Chronological backtracking: drop deduced entries, clearing their
    /// assignments, until a decision is on top or the trail is empty. The
    /// decision itself is left in place, still assigned.
    pub fn backtrack(&mut self) {
        while let Some(step) = self.top() {
            if step.kind == StepKind::Decision {
                return;
            }
            self.head -= 1;
            self.assignment.clear(step.lit.var());
        }
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn restore_head(&mut self, head: usize) {
        debug_assert!(head <= self.steps.len());
        self.head = head;
    }

    pub fn clear_assignment(&mut self, v: Var) {
        self.assignment.clear(v);
    }

    pub fn save_assignment(&self) -> Assignment {
        self.assignment.snapshot()
    }

    pub fn restore_assignment(&mut self, saved: Assignment) {
        self.assignment = saved;
    }

    pub fn value_of(&self, lit: Lit) -> Option<bool> {
        self.assignment.value_of(lit)
    }

    pub fn is_satisfied(&self, lit: Lit) -> bool {
        self.assignment.is_satisfied(lit)
    }

    pub fn is_falsified(&self, lit: Lit) -> bool {
        self.assignment.is_falsified(lit)
    }

    #[allow(unused)]
    pub fn is_assigned(&self, lit: Lit) -> bool {
        self.assignment.is_assigned(lit)
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.assignment.is_unassigned(lit)
    }

    pub fn var_is_unassigned(&self, v: Var) -> bool {
        self.assignment.var_is_unassigned(v)
    }

    pub fn is_clause_satisfied(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&lit| self.is_satisfied(lit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(num_vars: u32) -> Trail {
        let mut trail = Trail::default();
        trail.grow(Var::new(num_vars));
        trail
    }

    #[test]
    fn assign_records_and_sets() {
        let mut trail = trail(3);
        trail.assign(Lit::new(2), StepKind::Decision);
        trail.assign(Lit::new(-3), StepKind::Deduced);

        assert_eq!(trail.len(), 2);
        assert!(trail.is_satisfied(Lit::new(2)));
        assert!(trail.is_falsified(Lit::new(3)));
        assert_eq!(trail.top().unwrap().lit, Lit::new(-3));
        assert!(!trail.is_complete());
    }

    #[test]
    fn backtrack_stops_at_decision() {
        let mut trail = trail(4);
        trail.assign(Lit::new(1), StepKind::Decision);
        trail.assign(Lit::new(2), StepKind::Deduced);
        trail.assign(Lit::new(3), StepKind::Deduced);

        trail.backtrack();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.top().unwrap().kind, StepKind::Decision);
        // the decision survives with its assignment, the deduced entries are cleared
        assert!(trail.is_satisfied(Lit::new(1)));
        assert!(trail.var_is_unassigned(Var::new(2)));
        assert!(trail.var_is_unassigned(Var::new(3)));
    }

    #[test]
    fn backtrack_empties_decisionless_trail() {
        let mut trail = trail(2);
        trail.assign(Lit::new(1), StepKind::Deduced);
        trail.assign(Lit::new(-2), StepKind::Deduced);

        trail.backtrack();
        assert!(trail.is_empty());
        assert!(trail.var_is_unassigned(Var::new(1)));
        assert!(trail.var_is_unassigned(Var::new(2)));
    }

    #[test]
    fn pop_keeps_assignment() {
        let mut trail = trail(1);
        trail.assign(Lit::new(1), StepKind::Decision);

        let popped = trail.pop().unwrap();
        assert_eq!(popped.lit, Lit::new(1));
        assert!(trail.is_empty());
        assert!(trail.is_satisfied(Lit::new(1)));
    }

    #[test]
    fn head_restore_resurrects_entries() {
        let mut trail = trail(3);
        trail.assign(Lit::new(1), StepKind::Decision);
        trail.assign(Lit::new(2), StepKind::Deduced);
        trail.assign(Lit::new(3), StepKind::Deduced);

        let head = trail.head();
        let saved = trail.save_assignment();

        trail.backtrack();
        trail.set_top(Step {
            lit: Lit::new(-1),
            kind: StepKind::Decision,
        });
        assert_eq!(trail.len(), 1);

        trail.set_top(Step {
            lit: Lit::new(1),
            kind: StepKind::Decision,
        });
        trail.restore_head(head);
        trail.restore_assignment(saved);

        let lits: Vec<Lit> = trail.steps().iter().map(|s| s.lit).collect();
        assert_eq!(lits, vec![Lit::new(1), Lit::new(2), Lit::new(3)]);
        assert!(trail.is_satisfied(Lit::new(2)));
        assert!(trail.is_satisfied(Lit::new(3)));
    }
}
