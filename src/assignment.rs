use crate::data::{Lit, Var, VarVec};

/// Tri-state truth assignment, one slot per variable.
///
/// Snapshots are whole-vector copies; the backjump probe in conflict analysis
/// takes one before each speculative propagation and restores it afterwards.
#[derive(Debug, Default, Clone)]
pub(crate) struct Assignment {
    values: VarVec<Option<bool>>,
}

impl Assignment {
    pub fn grow(&mut self, v: Var) {
        self.values.grow(v, None);
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Truth value of `lit`, `None` while its variable is unset.
    pub fn value_of(&self, lit: Lit) -> Option<bool> {
        self.values[lit.var()].map(|value| value == lit.is_pos())
    }

    pub fn is_satisfied(&self, lit: Lit) -> bool {
        self.value_of(lit) == Some(true)
    }

    pub fn is_falsified(&self, lit: Lit) -> bool {
        self.value_of(lit) == Some(false)
    }

    pub fn is_assigned(&self, lit: Lit) -> bool {
        self.values[lit.var()].is_some()
    }

    pub fn is_unassigned(&self, lit: Lit) -> bool {
        self.values[lit.var()].is_none()
    }

    pub fn var_is_unassigned(&self, v: Var) -> bool {
        self.values[v].is_none()
    }

    /// Make `lit` true, overwriting any previous value of its variable.
    /// Overwriting matters: flipping a conflict driver re-assigns a variable
    /// that is still set.
    pub fn set(&mut self, lit: Lit) {
        self.values[lit.var()] = Some(lit.is_pos());
    }

    pub fn clear(&mut self, v: Var) {
        self.values[v] = None;
    }

    pub fn snapshot(&self) -> Assignment {
        self.clone()
    }
}
