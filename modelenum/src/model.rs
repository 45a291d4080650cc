use sattrait::{Lit, Oracle};

/// A named variable with a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal<N> {
    pub name: N,
    pub phase: bool,
}

impl<N> Literal<N> {
    pub fn new(name: N, phase: bool) -> Self {
        Literal { name, phase }
    }
}

/// An assignment to a set of named variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model<N> {
    literals: Vec<Literal<N>>,
}

impl<N: PartialEq> Model<N> {
    pub fn new(literals: Vec<Literal<N>>) -> Self {
        Model { literals }
    }

    pub fn literals(&self) -> &[Literal<N>] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn value(&self, name: &N) -> Option<bool> {
        self.literals
            .iter()
            .find(|l| &l.name == name)
            .map(|l| l.phase)
    }

    pub(crate) fn push(&mut self, name: N, phase: bool) {
        self.literals.push(Literal { name, phase });
    }

    /// The model as oracle literals. Variables unknown to the oracle are skipped.
    pub fn to_lits<O: Oracle<Name = N>>(&self, oracle: &O) -> Vec<Lit> {
        self.literals
            .iter()
            .filter_map(|l| oracle.index_of(&l.name).map(|v| Lit::new(v, !l.phase)))
            .collect()
    }
}

impl<N: Ord> Model<N> {
    /// Literals ordered by variable name.
    pub fn sorted(mut self) -> Self {
        self.literals.sort();
        self
    }
}
