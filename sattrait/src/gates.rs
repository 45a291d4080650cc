use crate::{Lit, SatInstance};
use std::collections::HashSet;
use std::iter::once;

/// A boolean value -- either a literal in a SAT problem, or a constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bool {
    Lit(Lit),
    Const(bool),
}

impl From<Lit> for Bool {
    fn from(l: Lit) -> Self {
        Bool::Lit(l)
    }
}

impl From<bool> for Bool {
    fn from(b: bool) -> Self {
        Bool::Const(b)
    }
}

impl std::ops::Not for Bool {
    type Output = Bool;

    fn not(self) -> Self::Output {
        match self {
            Bool::Lit(l) => Bool::Lit(!l),
            Bool::Const(b) => Bool::Const(!b),
        }
    }
}

/// Tseitin-style definitions of compound formulas on top of a [`SatInstance`].
pub trait BooleanFormulas {
    fn and_literal(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>) -> Bool;
    fn or_literal(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>) -> Bool;

    /// Assert a clause over booleans. Constant `true` satisfies it, constant `false` is dropped.
    fn assert_clause(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>);
}

impl<S: SatInstance> BooleanFormulas for S {
    fn and_literal(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>) -> Bool {
        let mut lits = Vec::new();
        let mut seen = HashSet::new();
        for v in xs {
            match v.into() {
                Bool::Const(false) => return false.into(),
                Bool::Const(true) => {}
                Bool::Lit(l) => {
                    if seen.contains(&!l) {
                        return false.into();
                    }
                    if seen.insert(l) {
                        lits.push(l);
                    }
                }
            }
        }

        if lits.is_empty() {
            return true.into();
        }

        if lits.len() == 1 {
            return Bool::Lit(lits[0]);
        }

        let y = self.new_var();
        for x in &lits {
            self.add_clause(once(!y).chain(once(*x)));
        }
        self.add_clause(lits.iter().map(|x| !*x).chain(once(y)));
        Bool::Lit(y)
    }

    fn or_literal(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>) -> Bool {
        !(self.and_literal(xs.into_iter().map(|l| !(l.into()))))
    }

    fn assert_clause(&mut self, xs: impl IntoIterator<Item = impl Into<Bool>>) {
        let mut clause = Vec::new();
        for x in xs {
            match x.into() {
                Bool::Const(true) => return,
                Bool::Const(false) => {}
                Bool::Lit(l) => clause.push(l),
            }
        }
        self.add_clause(clause);
    }
}
