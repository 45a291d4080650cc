use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("no projection variable set was given")]
    InvalidVariableSet,
    /// Only returned by [`crate::IndexSets::new`]. `ModelEnumerationFunction`
    /// treats projection variables unknown to the oracle as don't-cares.
    #[error("projection variable {0} is not known to the solver")]
    UnknownProjectionVariable(String),
    #[error("a split was required at depth {depth} but the strategy gave no split variables")]
    EmptySplitVariables { depth: usize },
    #[error("split probing overflowed at depth {depth} and {size} split variables could not be reduced")]
    SplitNotReducible { depth: usize, size: usize },
}
