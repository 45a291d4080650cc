//! Interface between incremental SAT oracles and the algorithms that drive them.
//!
//! An algorithm only ever sees an [`Oracle`]: it can push and pop solver states,
//! add clauses, solve under a [`Handler`], and read back the model.

mod gates;
mod guard;
mod handler;
mod lit;

pub use crate::gates::{Bool, BooleanFormulas};
pub use crate::guard::StateGuard;
pub use crate::handler::{
    Cancelled, Event, Handler, NopHandler, NumberOfModelsHandler, TimeoutHandler, TimerType,
};
pub use crate::lit::{Lit, Var};

use std::fmt::Debug;
use std::hash::Hash;

/// An instance of a SAT problem which can be extended with fresh variables and clauses.
pub trait SatInstance {
    fn new_var(&mut self) -> Lit;
    fn add_clause(&mut self, clause: impl IntoIterator<Item = Lit>);
}

/// An incremental SAT solver holding a formula over named variables.
///
/// States saved with [`Oracle::save_state`] must be restored in reverse order. Restoring a
/// state removes every clause added after it was saved; variables are kept.
pub trait Oracle: SatInstance {
    /// Caller-facing variable names.
    type Name: Clone + Ord + Hash + Debug;
    /// Opaque marker of the clause database at some point in time.
    type State: Copy + Debug;

    fn save_state(&mut self) -> Self::State;
    fn restore_state(&mut self, state: Self::State);

    /// Add each literal as a unit clause.
    fn add_literals(&mut self, lits: &[Lit]) {
        for l in lits {
            self.add_clause(std::iter::once(*l));
        }
    }

    /// Solve the current formula. `Ok(true)` means satisfiable, in which case
    /// [`Oracle::model`] holds the assignment until the next modification.
    fn solve(&mut self, handler: &mut dyn Handler) -> Result<bool, Cancelled>;

    /// The model of the last satisfiable solve call, one value per variable index.
    fn model(&self) -> &[bool];

    fn index_of(&self, name: &Self::Name) -> Option<Var>;
    fn name_of(&self, var: Var) -> Option<&Self::Name>;

    /// All named variables, sorted.
    fn known_variables(&self) -> Vec<Self::Name>;

    fn num_vars(&self) -> usize;
    fn clauses<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Lit]> + 'a>;
}
