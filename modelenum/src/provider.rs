//! Heuristics choosing the variables to split on.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sattrait::Oracle;

pub const DEFAULT_TAKE_RATE: f64 = 0.5;
pub const DEFAULT_MAX_VARIABLES: usize = 18;

/// Chooses split variables among `candidates`.
///
/// The result is a subset of `candidates` in candidate order, and is non-empty
/// whenever `candidates` is.
pub trait SplitVariableProvider<N> {
    fn split_variables<O: Oracle<Name = N>>(&self, oracle: &O, candidates: &[N]) -> Vec<N>;
}

/// Number of variables to take out of `n`.
fn take_count(n: usize, take_rate: f64, max_variables: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let k = (take_rate * n as f64).ceil() as usize;
    k.min(max_variables).min(n).max(1)
}

/// Occurrences of each candidate in the oracle's clauses.
fn occurrences<O: Oracle>(oracle: &O, candidates: &[O::Name]) -> Vec<usize> {
    let mut counts = vec![0usize; oracle.num_vars()];
    for clause in oracle.clauses() {
        for l in clause {
            counts[l.var().idx()] += 1;
        }
    }
    candidates
        .iter()
        .map(|n| oracle.index_of(n).map(|v| counts[v.idx()]).unwrap_or(0))
        .collect()
}

/// Keep the candidates at `positions[..k]`, in candidate order.
fn select<N: Clone>(candidates: &[N], mut positions: Vec<usize>, k: usize) -> Vec<N> {
    positions.truncate(k);
    positions.sort_unstable();
    positions.into_iter().map(|i| candidates[i].clone()).collect()
}

fn by_frequency<O: Oracle>(
    oracle: &O,
    candidates: &[O::Name],
    take_rate: f64,
    max_variables: usize,
    most_common: bool,
) -> Vec<O::Name> {
    let counts = occurrences(oracle, candidates);
    let mut positions = (0..candidates.len()).collect::<Vec<_>>();
    // Stable, so ties keep candidate order.
    if most_common {
        positions.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
    } else {
        positions.sort_by(|a, b| counts[*a].cmp(&counts[*b]));
    }
    let k = take_count(candidates.len(), take_rate, max_variables);
    select(candidates, positions, k)
}

/// The variables occurring in the most clauses.
#[derive(Debug, Clone, Copy)]
pub struct MostCommonVariablesProvider {
    pub take_rate: f64,
    pub max_variables: usize,
}

impl Default for MostCommonVariablesProvider {
    fn default() -> Self {
        MostCommonVariablesProvider {
            take_rate: DEFAULT_TAKE_RATE,
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl<N: Clone> SplitVariableProvider<N> for MostCommonVariablesProvider {
    fn split_variables<O: Oracle<Name = N>>(&self, oracle: &O, candidates: &[N]) -> Vec<N> {
        by_frequency(oracle, candidates, self.take_rate, self.max_variables, true)
    }
}

/// The variables occurring in the fewest clauses.
#[derive(Debug, Clone, Copy)]
pub struct LeastCommonVariablesProvider {
    pub take_rate: f64,
    pub max_variables: usize,
}

impl Default for LeastCommonVariablesProvider {
    fn default() -> Self {
        LeastCommonVariablesProvider {
            take_rate: DEFAULT_TAKE_RATE,
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl<N: Clone> SplitVariableProvider<N> for LeastCommonVariablesProvider {
    fn split_variables<O: Oracle<Name = N>>(&self, oracle: &O, candidates: &[N]) -> Vec<N> {
        by_frequency(oracle, candidates, self.take_rate, self.max_variables, false)
    }
}

/// A fixed set of variables, restricted to the candidates.
#[derive(Debug, Clone)]
pub struct FixedVariableProvider<N>(pub Vec<N>);

impl<N: Clone + PartialEq> SplitVariableProvider<N> for FixedVariableProvider<N> {
    fn split_variables<O: Oracle<Name = N>>(&self, _: &O, candidates: &[N]) -> Vec<N> {
        let vars = candidates
            .iter()
            .filter(|c| self.0.contains(c))
            .cloned()
            .collect::<Vec<_>>();
        if vars.is_empty() {
            candidates.iter().take(1).cloned().collect()
        } else {
            vars
        }
    }
}

/// A seeded random choice of variables.
#[derive(Debug, Clone, Copy)]
pub struct RandomVariableProvider {
    pub take_rate: f64,
    pub max_variables: usize,
    pub seed: u64,
}

impl RandomVariableProvider {
    pub fn new(seed: u64) -> Self {
        RandomVariableProvider {
            take_rate: DEFAULT_TAKE_RATE,
            max_variables: DEFAULT_MAX_VARIABLES,
            seed,
        }
    }
}

impl<N: Clone> SplitVariableProvider<N> for RandomVariableProvider {
    fn split_variables<O: Oracle<Name = N>>(&self, _: &O, candidates: &[N]) -> Vec<N> {
        let k = take_count(candidates.len(), self.take_rate, self.max_variables);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let positions = rand::seq::index::sample(&mut rng, candidates.len(), k).into_vec();
        select(candidates, positions, k)
    }
}
