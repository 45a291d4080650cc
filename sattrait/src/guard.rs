use crate::Oracle;
use std::ops::{Deref, DerefMut};

/// Saves the oracle state on creation and restores it on drop.
///
/// Guards nest through `DerefMut`, so an inner guard always borrows from an
/// outer one and is dropped (restored) first.
pub struct StateGuard<'a, O: Oracle> {
    oracle: &'a mut O,
    state: O::State,
}

impl<'a, O: Oracle> StateGuard<'a, O> {
    pub fn new(oracle: &'a mut O) -> Self {
        let state = oracle.save_state();
        StateGuard { oracle, state }
    }
}

impl<'a, O: Oracle> Deref for StateGuard<'a, O> {
    type Target = O;
    fn deref(&self) -> &O {
        self.oracle
    }
}

impl<'a, O: Oracle> DerefMut for StateGuard<'a, O> {
    fn deref_mut(&mut self) -> &mut O {
        self.oracle
    }
}

impl<'a, O: Oracle> Drop for StateGuard<'a, O> {
    fn drop(&mut self) {
        self.oracle.restore_state(self.state);
    }
}
