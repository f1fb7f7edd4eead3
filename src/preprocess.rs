//! One-shot simplification of the raw clause set, run before the watch index
//! exists. Produces the canonical clause database and the root-level trail
//! entries, or an early verdict.

use tracing::debug;

use crate::data::{Lit, Var, VarVec};
use crate::trail::StepKind;
use crate::Solver;

/// What is known once root-level simplification finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootOutcome {
    /// Every clause was eliminated; the trail already satisfies the input.
    Sat,

    /// An empty clause appeared; no assignment can satisfy the input.
    Unsat,

    /// No verdict at the root; search takes over on the canonical database.
    Search,
}

impl Solver {
    /// Run the simplification passes in order: literal dedup, clause dedup,
    /// pure-literal elimination, tautology removal, free-variable closure,
    /// root-level unit propagation. On [`RootOutcome::Search`] the canonical
    /// clauses (all of length >= 2) have been moved into the clause database.
    pub(crate) fn preprocess(&mut self) -> RootOutcome {
        let mut clauses = std::mem::take(&mut self.raw);

        normalise_literals(&mut clauses);
        dedup_clauses(&mut clauses);
        let pure = eliminate_pure_literals(&mut clauses, self.trail.num_vars());
        remove_tautologies(&mut clauses);
        self.close_absent_variables(&clauses, &pure);
        let outcome = self.propagate_root_units(&mut clauses);

        if outcome == RootOutcome::Search {
            for cls in &clauses {
                self.clause_db.push_clause(cls);
            }
        }
        debug!(
            clauses = self.clause_db.len(),
            trail = self.trail.len(),
            ?outcome,
            "preprocessing finished"
        );
        outcome
    }

    /// Assign every variable that no longer occurs anywhere, so that a SAT
    /// trail is a total model. A variable eliminated as pure gets the polarity
    /// that satisfied its clauses; anything else defaults to true.
    fn close_absent_variables(&mut self, clauses: &[Vec<Lit>], pure: &[Lit]) {
        let num_vars = self.trail.num_vars();
        if num_vars == 0 {
            return;
        }
        let top = Var::new(num_vars as u32);

        let mut occurs = VarVec::new();
        occurs.grow(top, false);
        for cls in clauses {
            for &lit in cls {
                occurs[lit.var()] = true;
            }
        }

        let mut polarity: VarVec<Option<Lit>> = VarVec::new();
        polarity.grow(top, None);
        for &lit in pure {
            polarity[lit.var()] = Some(lit);
        }

        for (var, &present) in occurs.iter_with_var() {
            if !present {
                let lit = polarity[var].unwrap_or_else(|| Lit::from(var));
                self.trail.assign(lit, StepKind::Deduced);
            }
        }
    }

    /// Exhaustively apply unit clauses at the root: record the literal, drop
    /// the clauses it satisfies and strip its negation everywhere.
    fn propagate_root_units(&mut self, clauses: &mut Vec<Vec<Lit>>) -> RootOutcome {
        loop {
            if clauses.iter().any(|cls| cls.is_empty()) {
                return RootOutcome::Unsat;
            }
            if clauses.is_empty() {
                return RootOutcome::Sat;
            }
            let Some(unit) = clauses.iter().find(|cls| cls.len() == 1).map(|cls| cls[0]) else {
                return RootOutcome::Search;
            };

            debug!("root unit {unit}");
            self.trail.assign(unit, StepKind::Deduced);
            clauses.retain(|cls| !cls.contains(&unit));
            for cls in clauses.iter_mut() {
                cls.retain(|&lit| lit != -unit);
            }
        }
    }
}

/// Sort each clause into the canonical literal order and drop duplicates.
/// Sorting also puts the two phases of a variable next to each other, which
/// the tautology scan relies on.
fn normalise_literals(clauses: &mut [Vec<Lit>]) {
    for cls in clauses.iter_mut() {
        cls.sort_unstable();
        cls.dedup();
    }
}

/// Sort the database lexicographically and drop identical clauses.
fn dedup_clauses(clauses: &mut Vec<Vec<Lit>>) {
    clauses.sort_unstable();
    clauses.dedup();
}

/// A literal is pure if its negation appears nowhere. Every clause containing
/// a pure literal is satisfied by asserting it, so those clauses are dropped.
/// One scan over the database decides purity for all variables before any
/// clause is removed. Returns the pure literals; the closure pass records
/// their assignments once the variables have vanished from the database.
fn eliminate_pure_literals(clauses: &mut Vec<Vec<Lit>>, num_vars: usize) -> Vec<Lit> {
    if num_vars == 0 {
        return Vec::new();
    }
    let top = Var::new(num_vars as u32);

    let mut seen_pos = VarVec::new();
    seen_pos.grow(top, false);
    let mut seen_neg = VarVec::new();
    seen_neg.grow(top, false);
    for cls in clauses.iter() {
        for &lit in cls {
            if lit.is_pos() {
                seen_pos[lit.var()] = true;
            } else {
                seen_neg[lit.var()] = true;
            }
        }
    }

    let mut is_pure = VarVec::new();
    is_pure.grow(top, false);
    let mut pure = Vec::new();
    for (var, &pos) in seen_pos.iter_with_var() {
        if pos != seen_neg[var] {
            is_pure[var] = true;
            pure.push(if pos { Lit::from(var) } else { -Lit::from(var) });
        }
    }

    if !pure.is_empty() {
        debug!("pure literals {pure:?}");
        clauses.retain(|cls| !cls.iter().any(|lit| is_pure[lit.var()]));
    }
    pure
}

/// Drop clauses containing a variable in both phases.
fn remove_tautologies(clauses: &mut Vec<Vec<Lit>>) {
    // literals are sorted, so the two phases of a variable are adjacent
    clauses.retain(|cls| !cls.windows(2).any(|pair| pair[0].var() == pair[1].var()));
}
