use tracing::debug;

use crate::data::Lit;
use crate::trail::{StepKind, Trail};
use crate::Solver;

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const END: &str = "\u{1b}[0m";

impl Solver {
    /// Dump the clause database with assignment colouring. Debug builds only.
    pub(crate) fn log_state(&self) {
        #[cfg(debug_assertions)]
        for cls in self.clause_db.iter() {
            debug!("{}", self.trail.fmt_clause(cls));
        }
    }
}

impl Trail {
    /// Green for satisfied, red for falsified, plain for unset.
    pub(crate) fn fmt_lit(&self, lit: Lit) -> String {
        match self.value_of(lit) {
            Some(true) => format!("{GREEN}{lit}{END}"),
            Some(false) => format!("{RED}{lit}{END}"),
            None => format!("{lit}"),
        }
    }

    pub(crate) fn fmt_clause(&self, clause: &[Lit]) -> String {
        clause
            .iter()
            .map(|&lit| self.fmt_lit(lit))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Trail with a `D`/`P` marker per entry: decided or deduced.
    pub(crate) fn fmt_trail(&self) -> String {
        let entries: Vec<String> = self
            .steps()
            .iter()
            .map(|step| match step.kind {
                StepKind::Decision => format!("{}D", step.lit),
                StepKind::Deduced => format!("{}P", step.lit),
            })
            .collect();
        format!("[{}]", entries.join(", "))
    }
}
