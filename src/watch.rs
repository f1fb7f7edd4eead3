//! The two-watched-literal index.
//!
//! Two maps: for every literal, the clauses currently watching it; for every
//! clause, its watched pair. The index upholds the watched-literal property
//! during search: a clause can only become falsified after one of its watches
//! does, so propagation only ever inspects the watchers of the literal that
//! just turned false.

use crate::clause::{ClauseDB, ClauseIdx};
use crate::data::{Lit, LitVec, Var};

#[derive(Debug, Default)]
pub(crate) struct Watches {
    /// For each literal, the clauses watching it.
    watchers: LitVec<Vec<ClauseIdx>>,

    /// For each clause ordinal, its two watched literals.
    pair: Vec<[Lit; 2]>,
}

impl Watches {
    /// Install the first two stored literals of every clause as its watches.
    /// Built once, after preprocessing has frozen the database.
    pub fn build(db: &ClauseDB, num_vars: usize) -> Self {
        let mut watches = Watches {
            watchers: LitVec::new(),
            pair: Vec::with_capacity(db.len()),
        };
        if num_vars > 0 {
            // cover every literal: decisions can touch variables that no
            // longer occur in any clause
            watches
                .watchers
                .grow(Lit::from(Var::new(num_vars as u32)), Vec::new());
        }

        for (idx, cls) in db.iter_indexed() {
            let pair = [cls[0], cls[1]];
            watches.watchers[pair[0]].push(idx);
            watches.watchers[pair[1]].push(idx);
            watches.pair.push(pair);
        }

        watches
    }

    pub fn pair(&self, c: ClauseIdx) -> [Lit; 2] {
        self.pair[c.ordinal()]
    }

    pub fn set_watch(&mut self, c: ClauseIdx, slot: usize, lit: Lit) {
        self.pair[c.ordinal()][slot] = lit;
    }

    pub fn watchers(&self, lit: Lit) -> &[ClauseIdx] {
        &self.watchers[lit]
    }

    pub fn add_watcher(&mut self, lit: Lit, c: ClauseIdx) {
        self.watchers[lit].push(c);
    }

    /// Order-preserving removal; the traversal in propagation compensates for
    /// the elements sliding down.
    pub fn remove_watcher_at(&mut self, lit: Lit, i: usize) {
        self.watchers[lit].remove(i);
    }

    /// Structural invariants: each clause's watches are two distinct members
    /// of the clause, and the clause appears exactly once in each of the two
    /// watcher lists (and nowhere else).
    #[cfg(test)]
    pub fn is_well_formed(&self, db: &ClauseDB) -> bool {
        for (idx, cls) in db.iter_indexed() {
            let [w0, w1] = self.pair(idx);
            if w0 == w1 || !cls.contains(&w0) || !cls.contains(&w1) {
                return false;
            }
        }
        for (lit, watching) in self.watchers.iter_with_lit() {
            for &c in watching {
                if !self.pair(c).contains(&lit) {
                    return false;
                }
                if watching.iter().filter(|&&other| other == c).count() != 1 {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(raw: &[i32]) -> Vec<Lit> {
        raw.iter().copied().map(Lit::new).collect()
    }

    #[test]
    fn build_watches_first_two_literals() {
        let mut db = ClauseDB::default();
        let a = db.push_clause(&lits(&[1, 2, 3]));
        let b = db.push_clause(&lits(&[-1, -2]));

        let watches = Watches::build(&db, 3);
        assert_eq!(watches.pair(a), [Lit::new(1), Lit::new(2)]);
        assert_eq!(watches.pair(b), [Lit::new(-1), Lit::new(-2)]);
        assert_eq!(watches.watchers(Lit::new(1)), &[a]);
        assert_eq!(watches.watchers(Lit::new(-1)), &[b]);
        assert_eq!(watches.watchers(Lit::new(3)), &[] as &[ClauseIdx]);
        assert!(watches.is_well_formed(&db));
    }

    #[test]
    fn rewatch_moves_clause_between_lists() {
        let mut db = ClauseDB::default();
        let a = db.push_clause(&lits(&[1, 2, 3]));
        let mut watches = Watches::build(&db, 3);

        // move the first watch from 1 to 3
        watches.set_watch(a, 0, Lit::new(3));
        watches.add_watcher(Lit::new(3), a);
        watches.remove_watcher_at(Lit::new(1), 0);

        assert_eq!(watches.pair(a), [Lit::new(3), Lit::new(2)]);
        assert_eq!(watches.watchers(Lit::new(1)), &[] as &[ClauseIdx]);
        assert_eq!(watches.watchers(Lit::new(3)), &[a]);
        assert!(watches.is_well_formed(&db));
    }

    #[test]
    fn covers_variables_absent_from_clauses() {
        let mut db = ClauseDB::default();
        db.push_clause(&lits(&[1, 2]));
        let watches = Watches::build(&db, 5);
        assert_eq!(watches.watchers(Lit::new(-5)), &[] as &[ClauseIdx]);
    }
}
