//! A DPLL SAT solver with two watched literals and conflict-driven
//! backjumping.
//!
//! Clauses go through a one-shot preprocessor (deduplication, pure-literal
//! elimination, tautology removal, root-level unit propagation) before search
//! starts. The search itself is chronological DPLL: propagate with two
//! watched literals, decide by a static occurrence-count order, and on
//! conflict backtrack to the last decision, probing whether intermediate
//! decisions can be jumped over before flipping. No clauses are learned.

mod analyze;
mod assignment;
mod clause;
mod data;
mod dimacs;
mod log;
mod preprocess;
mod propagate;
mod trail;
mod watch;

use tracing::debug;

use analyze::AnalyzeResult;
use clause::ClauseDB;
pub use data::{Lit, Var};
pub use dimacs::{Formula, ParseError};
use preprocess::RootOutcome;
use propagate::PropagationResult;
use trail::{StepKind, Trail};
use watch::Watches;

/// Counters accumulated over one `solve` run.
#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub backjumps: u64,
}

#[derive(Default)]
pub struct Solver {
    /// Clauses as added, consumed by preprocessing.
    raw: Vec<Vec<Lit>>,

    /// Canonical clause database; frozen once preprocessing is done.
    clause_db: ClauseDB,

    watches: Watches,

    trail: Trail,

    /// Variables by descending occurrence count in the canonical database,
    /// ties by ascending id. Computed once, never updated.
    decision_order: Vec<Var>,

    stats: Stats,
}

/// A satisfying assignment, borrowed from the solver's trail.
pub struct Model<'a> {
    trail: &'a Trail,
}

impl Model<'_> {
    /// Truth value of a DIMACS literal under the model.
    pub fn lit(&self, lit: i32) -> bool {
        self.trail.is_satisfied(Lit::new(lit))
    }

    /// The model as signed DIMACS literals, one per variable. A variable the
    /// search never had to touch reports as false; every clause it occurred
    /// in was eliminated as already satisfied, so either polarity would do.
    pub fn as_vec(&self) -> Vec<i32> {
        (1..=self.trail.num_vars() as i32)
            .map(|v| if self.lit(v) { v } else { -v })
            .collect()
    }
}

impl std::fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Model").field(&self.as_vec()).finish()
    }
}

#[derive(Debug)]
pub struct Proof;

#[derive(Debug)]
pub enum Result<'a> {
    Sat(Model<'a>),
    Unsat(Proof),
}

impl<'a> Result<'a> {
    pub fn is_sat(&self) -> bool {
        matches!(self, Result::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Result::Unsat(_))
    }

    pub fn unwrap_sat(self) -> Model<'a> {
        match self {
            Result::Sat(model) => model,
            Result::Unsat(_) => panic!("result is not SAT"),
        }
    }

    pub fn unwrap_unsat(self) -> Proof {
        match self {
            Result::Unsat(proof) => proof,
            Result::Sat(_) => panic!("result is SAT"),
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dimacs(input: &str) -> std::result::Result<Solver, ParseError> {
        let formula = Formula::parse(input)?;

        let mut solver = Solver::new();
        solver.reserve_vars(formula.num_vars);
        for cls in &formula.clauses {
            solver.add_clause(cls.iter().copied());
        }

        Ok(solver)
    }

    /// Declare variables `1..=n` up front. Variables beyond the largest
    /// mentioned in a clause are otherwise unknown to the solver, and a
    /// total model must cover them.
    pub fn reserve_vars(&mut self, n: usize) {
        if n > 0 {
            self.trail.grow(Var::new(n as u32));
        }
    }

    pub fn num_vars(&self) -> usize {
        self.trail.num_vars()
    }

    pub fn add_clause<I>(&mut self, cls: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let cls: Vec<Lit> = cls.into_iter().map(Lit::new).collect();

        if let Some(max) = cls.iter().copied().max_by_key(|lit| lit.var()) {
            self.trail.grow(max.var());
        }
        self.raw.push(cls);
    }

    pub fn solve(&mut self) -> Result<'_> {
        match self.preprocess() {
            RootOutcome::Sat => return Result::Sat(Model { trail: &self.trail }),
            RootOutcome::Unsat => return Result::Unsat(Proof),
            RootOutcome::Search => {}
        }

        self.watches = Watches::build(&self.clause_db, self.trail.num_vars());
        self.prepare_decision_order();
        self.log_state();

        if !self.decide() {
            unreachable!("a nonempty database leaves variables to decide");
        }

        loop {
            let top = self.trail.top().expect("search never empties the trail");

            match self.propagate(top.lit, true) {
                PropagationResult::Done if self.trail.is_complete() => {
                    let model = Model { trail: &self.trail };
                    debug!("satisfying assignment found: {model:?}");
                    assert!(
                        self.check_assignment(),
                        "model fails the clause database"
                    );
                    return Result::Sat(model);
                }
                PropagationResult::Done => {
                    if !self.decide() {
                        unreachable!(
                            "an incomplete conflict-free trail leaves a decision candidate"
                        );
                    }
                }
                PropagationResult::Contradiction => {
                    self.stats.conflicts += 1;
                    debug!("conflict at trail {}", self.trail.fmt_trail());
                    if self.analyze_contradiction() == AnalyzeResult::Unsat {
                        debug!("unsatisfiable");
                        return Result::Unsat(Proof);
                    }
                }
            }
        }
    }

    /// Count literal occurrences per variable and fix the decision order:
    /// most frequent first, ties by ascending variable id.
    fn prepare_decision_order(&mut self) {
        let num_vars = self.trail.num_vars();
        let mut freq = vec![0u64; num_vars];
        for cls in self.clause_db.iter() {
            for &lit in cls {
                freq[lit.var().index()] += 1;
            }
        }

        let mut order: Vec<Var> = (1..=num_vars as u32).map(Var::new).collect();
        // stable sort keeps ties in ascending id order
        order.sort_by_key(|v| std::cmp::Reverse(freq[v.index()]));
        self.decision_order = order;
    }

    /// Assert the most frequent unassigned variable, positive phase first.
    fn decide(&mut self) -> bool {
        let next = self
            .decision_order
            .iter()
            .copied()
            .find(|&v| self.trail.var_is_unassigned(v));

        match next {
            Some(var) => {
                self.stats.decisions += 1;
                debug!("deciding {var}");
                self.trail.assign(Lit::from(var), StepKind::Decision);
                true
            }
            None => false,
        }
    }

    /// Does the current assignment satisfy the entire clause database?
    fn check_assignment(&self) -> bool {
        self.clause_db
            .iter()
            .all(|cls| self.trail.is_clause_satisfied(cls))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
