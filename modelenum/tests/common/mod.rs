#![allow(dead_code)]

use dpll::DpllSolver;
use itertools::Itertools;
use modelenum::{EnumerationCollector, EnumerationStrategy, Model, RelevantIndices};
use sattrait::{BooleanFormulas, Cancelled, Handler, Lit, Oracle, SatInstance, Var};
use std::collections::BTreeSet;

pub fn init_logger() {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init();
}

/// `(A & B) | (B & C) | (C & D)`.
pub fn chain_formula() -> DpllSolver<&'static str> {
    let mut s = DpllSolver::new();
    let [a, b, c, d] = ["A", "B", "C", "D"].map(|n| s.var(n));
    let ab = s.and_literal(vec![a, b]);
    let bc = s.and_literal(vec![b, c]);
    let cd = s.and_literal(vec![c, d]);
    let f = s.or_literal(vec![ab, bc, cd]);
    s.assert_clause(vec![f]);
    s
}

pub fn chain_holds(a: bool, b: bool, c: bool, d: bool) -> bool {
    (a && b) || (b && c) || (c && d)
}

/// A model as a sorted list of (name, value) pairs.
pub fn assignment<N: Ord + Clone>(m: &Model<N>) -> Vec<(N, bool)> {
    m.clone()
        .sorted()
        .literals()
        .iter()
        .map(|l| (l.name.clone(), l.phase))
        .collect()
}

/// Projections of all assignments of `vars` variables satisfying `clauses`.
pub fn brute_force(vars: u32, clauses: &[Vec<(u32, bool)>], projection: &[u32]) -> BTreeSet<Vec<(u32, bool)>> {
    (0..vars)
        .map(|_| vec![false, true])
        .multi_cartesian_product()
        .filter(|values| {
            clauses
                .iter()
                .all(|c| c.iter().any(|(v, phase)| values[*v as usize] == *phase))
        })
        .map(|values| {
            projection
                .iter()
                .sorted()
                .map(|v| (*v, values[*v as usize]))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Budget of one model per frame, splitting on one variable at a time.
pub struct OneAtATime {
    pub probe_budget: usize,
}

impl<N: Clone> EnumerationStrategy<N> for OneAtATime {
    fn enumeration_budget(&self, _: usize) -> usize {
        1
    }

    fn split_probe_budget(&self, _: usize) -> usize {
        self.probe_budget
    }

    fn initial_split_variables<O: Oracle<Name = N>>(&self, remaining: &[N], _: &O, _: usize) -> Vec<N> {
        remaining.iter().take(1).cloned().collect()
    }

    fn reduce_split_variables(&self, vars: &[N], _: usize) -> Vec<N> {
        vars.to_vec()
    }
}

/// Forces a split on the first model but never offers split variables.
pub struct NeverSplits;

impl<N> EnumerationStrategy<N> for NeverSplits {
    fn enumeration_budget(&self, _: usize) -> usize {
        0
    }

    fn split_probe_budget(&self, _: usize) -> usize {
        0
    }

    fn initial_split_variables<O: Oracle<Name = N>>(&self, _: &[N], _: &O, _: usize) -> Vec<N> {
        Vec::new()
    }

    fn reduce_split_variables(&self, _: &[N], _: usize) -> Vec<N> {
        Vec::new()
    }
}

/// Oracle wrapper checking that states are restored in reverse order.
pub struct Recording<O: Oracle> {
    pub inner: O,
    pub stack: Vec<O::State>,
    pub saves: usize,
    pub solves: usize,
    pub max_depth: usize,
}

impl<O: Oracle> Recording<O> {
    pub fn new(inner: O) -> Self {
        Recording {
            inner,
            stack: Vec::new(),
            saves: 0,
            solves: 0,
            max_depth: 0,
        }
    }

    pub fn clause_count(&self) -> usize {
        self.inner.clauses().count()
    }
}

impl<O: Oracle> SatInstance for Recording<O> {
    fn new_var(&mut self) -> Lit {
        self.inner.new_var()
    }

    fn add_clause(&mut self, clause: impl IntoIterator<Item = Lit>) {
        self.inner.add_clause(clause)
    }
}

impl<O: Oracle> Oracle for Recording<O> {
    type Name = O::Name;
    type State = O::State;

    fn save_state(&mut self) -> O::State {
        let state = self.inner.save_state();
        self.stack.push(state);
        self.saves += 1;
        self.max_depth = self.max_depth.max(self.stack.len());
        state
    }

    fn restore_state(&mut self, state: O::State) {
        let top = self.stack.pop().expect("restore without a saved state");
        assert_eq!(format!("{:?}", top), format!("{:?}", state));
        self.inner.restore_state(state)
    }

    fn solve(&mut self, handler: &mut dyn Handler) -> Result<bool, Cancelled> {
        self.solves += 1;
        self.inner.solve(handler)
    }

    fn model(&self) -> &[bool] {
        self.inner.model()
    }

    fn index_of(&self, name: &O::Name) -> Option<Var> {
        self.inner.index_of(name)
    }

    fn name_of(&self, var: Var) -> Option<&O::Name> {
        self.inner.name_of(var)
    }

    fn known_variables(&self) -> Vec<O::Name> {
        self.inner.known_variables()
    }

    fn num_vars(&self) -> usize {
        self.inner.num_vars()
    }

    fn clauses<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Lit]> + 'a> {
        self.inner.clauses()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub added: usize,
    pub pending: usize,
    pub committed: usize,
    pub discarded: usize,
}

/// Collector wrapper counting where every added model ends up.
pub struct Tallying<C> {
    pub inner: C,
    pub tally: Tally,
}

impl<O: Oracle, C: EnumerationCollector<O>> EnumerationCollector<O> for Tallying<C> {
    type Output = (C::Output, Tally);

    fn add_model(
        &mut self,
        model: &[bool],
        oracle: &O,
        relevant: &RelevantIndices,
        handler: &mut dyn Handler,
    ) -> Result<(), Cancelled> {
        self.inner.add_model(model, oracle, relevant, handler)?;
        self.tally.added += 1;
        self.tally.pending += 1;
        Ok(())
    }

    fn commit(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.tally.committed += self.tally.pending;
        self.tally.pending = 0;
        self.inner.commit(handler)
    }

    fn rollback(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.tally.discarded += self.tally.pending;
        self.tally.pending = 0;
        self.inner.rollback(handler)
    }

    fn rollback_and_materialize(
        &mut self,
        oracle: &O,
        handler: &mut dyn Handler,
    ) -> Result<Vec<Model<O::Name>>, Cancelled> {
        self.tally.discarded += self.tally.pending;
        self.tally.pending = 0;
        self.inner.rollback_and_materialize(oracle, handler)
    }

    fn result(self) -> (C::Output, Tally) {
        (self.inner.result(), self.tally)
    }
}
