use super::Lit;

/// Wrapper over `Vec` which is indexed by [`Lit`]. The two phases of a
/// variable sit next to each other.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LitVec<T>(Vec<T>);

impl<T> LitVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[allow(unused)]
    pub fn iter_with_lit(&self) -> impl Iterator<Item = (Lit, &T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, val)| (Lit::from_index(i), val))
    }
}

impl<T: Clone> LitVec<T> {
    /// Grow so that both phases of `lit`'s variable are valid indices.
    pub fn grow(&mut self, lit: Lit, fill: T) {
        let len = 2 * lit.var().get() as usize;
        if len > self.0.len() {
            self.0.resize(len, fill);
        }
    }
}

impl<T> Default for LitVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_layout() {
        assert_eq!(Lit::new(1).index(), 0);
        assert_eq!(Lit::new(-1).index(), 1);
        assert_eq!(Lit::new(2).index(), 2);
        assert_eq!(Lit::new(-2).index(), 3);
        assert_eq!(Lit::new(3).index(), 4);
        assert_eq!(Lit::new(-3).index(), 5);
    }

    #[test]
    fn grow_covers_both_phases() {
        let mut v: LitVec<i32> = LitVec::new();
        v.grow(Lit::new(4), 0);

        v[Lit::new(1)] = 1;
        v[Lit::new(-1)] = -1;
        v[Lit::new(-4)] = -4;

        assert_eq!(v[Lit::new(1)], 1);
        assert_eq!(v[Lit::new(-1)], -1);
        assert_eq!(v[Lit::new(4)], 0);
        assert_eq!(v[Lit::new(-4)], -4);
    }

    #[test]
    fn iter_with_lit_roundtrips() {
        let mut v: LitVec<u8> = LitVec::new();
        v.grow(Lit::new(2), 0);
        let lits: Vec<Lit> = v.iter_with_lit().map(|(l, _)| l).collect();
        assert_eq!(
            lits,
            vec![Lit::new(1), Lit::new(-1), Lit::new(2), Lit::new(-2)]
        );
    }
}
