//! A small incremental DPLL solver implementing [`sattrait::Oracle`].
//!
//! Clauses are kept in insertion order and solver states are prefixes of the
//! clause database, so restoring a state is a truncation. Every call to
//! `solve` starts from an empty trail.

mod clausedb;
mod cnf;

pub use crate::cnf::DimacsError;

use crate::clausedb::*;
use log::{debug, info, trace};
use sattrait::{Cancelled, Event, Handler, Lit, Oracle, SatInstance, Var};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

pub struct SolverParams {
    /// Polarity of the first decision on a variable. Later decisions reuse the last value.
    pub default_phase: bool,
    pub phase_saving: bool,
    pub verbosity: u32,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            default_phase: false,
            phase_saving: true,
            verbosity: 0,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SolverStatistics {
    pub solves: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
    pub cpu_time: Duration,
}

/// Opaque marker for [`DpllSolver::save_state`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SolverState {
    level: usize,
    clauses: usize,
}

pub struct DpllSolver<N> {
    pub params: SolverParams,
    pub stats: SolverStatistics,

    db: ClauseDatabase,
    states: Vec<usize>,

    names: HashMap<N, Var>,
    var_names: Vec<Option<N>>,

    assigns: Vec<Option<bool>>,
    polarity: Vec<bool>,
    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    /// Decision literal per level, and whether it is already the flipped branch.
    decisions: Vec<(Lit, bool)>,
    qhead: usize,

    model: Vec<bool>,
}

fn value(assigns: &[Option<bool>], lit: Lit) -> Option<bool> {
    assigns[lit.var().idx()].map(|v| v != lit.sign())
}

impl<N: Clone + Ord + Hash + Debug> DpllSolver<N> {
    pub fn new() -> Self {
        Self::with_params(Default::default())
    }

    pub fn with_params(params: SolverParams) -> Self {
        DpllSolver {
            params,
            stats: Default::default(),
            db: ClauseDatabase::new(),
            states: Vec::new(),
            names: HashMap::new(),
            var_names: Vec::new(),
            assigns: Vec::new(),
            polarity: Vec::new(),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            decisions: Vec::new(),
            qhead: 0,
            model: Vec::new(),
        }
    }

    /// The positive literal of the variable called `name`, created if necessary.
    pub fn var(&mut self, name: N) -> Lit {
        if let Some(v) = self.names.get(&name) {
            return Lit::positive(*v);
        }
        let lit = self.new_var_internal(Some(name.clone()));
        self.names.insert(name, lit.var());
        lit
    }

    pub fn lit(&mut self, name: N, phase: bool) -> Lit {
        let l = self.var(name);
        if phase {
            l
        } else {
            !l
        }
    }

    pub fn num_clauses(&self) -> usize {
        self.db.len()
    }

    fn new_var_internal(&mut self, name: Option<N>) -> Lit {
        let var = Var(self.assigns.len() as i32);
        self.assigns.push(None);
        self.polarity.push(self.params.default_phase);
        self.var_names.push(name);
        self.db.add_var();
        Lit::positive(var)
    }

    fn assign(&mut self, lit: Lit) {
        self.assigns[lit.var().idx()] = Some(!lit.sign());
        self.trail.push(lit);
    }

    fn unassign_from(&mut self, pos: usize) {
        for lit in self.trail.drain(pos..) {
            let v = lit.var().idx();
            if self.params.phase_saving {
                self.polarity[v] = !lit.sign();
            }
            self.assigns[v] = None;
        }
        self.qhead = pos;
    }

    fn decide(&mut self, lit: Lit) {
        self.trail_lim.push(self.trail.len());
        self.decisions.push((lit, false));
        self.assign(lit);
    }

    /// Undo decision levels until one can be flipped; `false` if the search space is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some((lit, flipped)) = self.decisions.pop() {
            let lim = self.trail_lim.pop().unwrap_or(0);
            self.unassign_from(lim);
            if !flipped {
                self.trail_lim.push(self.trail.len());
                self.decisions.push((!lit, true));
                self.assign(!lit);
                return true;
            }
        }
        false
    }

    fn cancel_all(&mut self) {
        self.unassign_from(0);
        self.trail_lim.clear();
        self.decisions.clear();
    }

    fn pick_branch_lit(&self) -> Option<Lit> {
        self.assigns
            .iter()
            .position(|a| a.is_none())
            .map(|v| Lit::new(Var(v as i32), !self.polarity[v]))
    }

    fn propagate(&mut self) -> Option<ClauseRef> {
        while self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            self.stats.propagations += 1;
            let false_lit = !p;

            let mut watches = std::mem::take(&mut self.db.watches[p.0 as usize]);
            let (mut i, mut j) = (0, 0);
            let mut conflict = None;
            'for_each_watch: while i < watches.len() {
                let w = watches[i];
                i += 1;
                if value(&self.assigns, w.blocker) == Some(true) {
                    watches[j] = w;
                    j += 1;
                    continue;
                }

                let lits = &mut self.db.clauses[w.cref];
                if lits[0] == false_lit {
                    lits.swap(0, 1);
                }
                debug_assert!(lits[1] == false_lit);

                let first = lits[0];
                let nw = Watcher {
                    cref: w.cref,
                    blocker: first,
                };
                if first != w.blocker && value(&self.assigns, first) == Some(true) {
                    watches[j] = nw;
                    j += 1;
                    continue;
                }

                for k in 2..lits.len() {
                    if value(&self.assigns, lits[k]) != Some(false) {
                        lits.swap(1, k);
                        let watched = lits[1];
                        self.db.watches[(!watched).0 as usize].push(nw);
                        continue 'for_each_watch;
                    }
                }

                watches[j] = nw;
                j += 1;
                if value(&self.assigns, first) == Some(false) {
                    conflict = Some(w.cref);
                    while i < watches.len() {
                        watches[j] = watches[i];
                        j += 1;
                        i += 1;
                    }
                } else {
                    self.assign(first);
                }
            }
            watches.truncate(j);
            self.db.watches[p.0 as usize] = watches;

            if conflict.is_some() {
                self.qhead = self.trail.len();
                return conflict;
            }
        }
        None
    }

    fn search(&mut self, handler: &mut dyn Handler) -> Result<bool, Cancelled> {
        if self.db.first_empty.is_some() {
            trace!("solve: empty clause");
            return Ok(false);
        }

        for i in 0..self.db.units.len() {
            let unit = self.db.clauses[self.db.units[i]][0];
            match value(&self.assigns, unit) {
                Some(false) => return Ok(false),
                Some(true) => {}
                None => self.assign(unit),
            }
        }

        loop {
            if let Some(cref) = self.propagate() {
                self.stats.conflicts += 1;
                trace!("conflict in clause {:?}", self.db.clauses[cref]);
                Cancelled::check(handler, Event::SatConflictDetected)?;
                if !self.backtrack() {
                    return Ok(false);
                }
            } else if let Some(lit) = self.pick_branch_lit() {
                self.stats.decisions += 1;
                self.decide(lit);
            } else {
                self.model.clear();
                self.model
                    .extend(self.assigns.iter().map(|a| a.unwrap_or(false)));
                return Ok(true);
            }
        }
    }

    pub fn stats_info(&self) {
        let secs = self.stats.cpu_time.as_secs_f64();
        info!("* stats:");
        info!("  - solves: {}", self.stats.solves);
        info!(
            "  - conflicts: {}  ({:.0} /sec)",
            self.stats.conflicts,
            self.stats.conflicts as f64 / secs
        );
        info!("  - decisions: {}", self.stats.decisions);
        info!("  - propagations: {}", self.stats.propagations);
        info!("  - cpu time: {:.2}s", secs);
    }
}

impl<N: Clone + Ord + Hash + Debug> Default for DpllSolver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Ord + Hash + Debug> SatInstance for DpllSolver<N> {
    /// A fresh anonymous variable.
    fn new_var(&mut self) -> Lit {
        self.new_var_internal(None)
    }

    fn add_clause(&mut self, clause: impl IntoIterator<Item = Lit>) {
        assert!(self.trail.is_empty());
        let mut lits = clause.into_iter().collect::<Vec<_>>();
        assert!(lits.iter().all(|l| l.var().idx() < self.assigns.len()));
        if ClauseDatabase::normalize(&mut lits) {
            self.db.add_clause(lits);
        }
    }
}

impl<N: Clone + Ord + Hash + Debug> Oracle for DpllSolver<N> {
    type Name = N;
    type State = SolverState;

    fn save_state(&mut self) -> SolverState {
        let state = SolverState {
            level: self.states.len(),
            clauses: self.db.len(),
        };
        self.states.push(state.clauses);
        trace!("save state {:?}", state);
        state
    }

    fn restore_state(&mut self, state: SolverState) {
        assert_eq!(
            state.level + 1,
            self.states.len(),
            "solver states must be restored in reverse order"
        );
        assert_eq!(self.states.pop(), Some(state.clauses));
        trace!("restore state {:?}", state);
        self.db.truncate(state.clauses);
    }

    fn solve(&mut self, handler: &mut dyn Handler) -> Result<bool, Cancelled> {
        Cancelled::check(handler, Event::SatCallStarted)?;
        self.stats.solves += 1;
        let start = cpu_time::ProcessTime::now();
        let result = self.search(handler);
        self.cancel_all();
        self.stats.cpu_time += start.elapsed();
        debug!(
            "solve finished (vars={}, clauses={}) -> {:?}",
            self.assigns.len(),
            self.db.len(),
            result
        );
        if self.params.verbosity >= 1 {
            self.stats_info();
        }
        result
    }

    fn model(&self) -> &[bool] {
        &self.model
    }

    fn index_of(&self, name: &N) -> Option<Var> {
        self.names.get(name).copied()
    }

    fn name_of(&self, var: Var) -> Option<&N> {
        self.var_names.get(var.idx()).and_then(|n| n.as_ref())
    }

    fn known_variables(&self) -> Vec<N> {
        let mut vars = self.names.keys().cloned().collect::<Vec<_>>();
        vars.sort();
        vars
    }

    fn num_vars(&self) -> usize {
        self.assigns.len()
    }

    fn clauses<'a>(&'a self) -> Box<dyn Iterator<Item = &'a [Lit]> + 'a> {
        Box::new(self.db.clauses.iter().map(|c| c.as_slice()))
    }
}
