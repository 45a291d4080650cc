/// Internal variable index, as numbered by the oracle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub i32);

impl Var {
    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

/// A variable with a polarity, encoded as `2 * var + sign` where a set sign bit
/// means the negative literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(pub i32);

impl Lit {
    pub fn new(Var(var): Var, sign: bool) -> Lit {
        Lit(2 * var + sign as i32)
    }

    pub fn positive(var: Var) -> Lit {
        Lit::new(var, false)
    }

    pub fn negative(var: Var) -> Lit {
        Lit::new(var, true)
    }

    pub fn sign(&self) -> bool {
        ((self.0) & 1) != 0
    }

    pub fn var(&self) -> Var {
        Var(self.0 >> 1)
    }

    pub fn inverse(&self) -> Lit {
        Self::new(self.var(), !self.sign())
    }

    /// Whether the literal holds under the given (dense) assignment.
    pub fn holds(&self, model: &[bool]) -> bool {
        model[self.var().idx()] != self.sign()
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;
    fn not(self) -> Lit {
        self.inverse()
    }
}
