use crate::provider::{
    LeastCommonVariablesProvider, MostCommonVariablesProvider, RandomVariableProvider,
    SplitVariableProvider,
};
use sattrait::Oracle;

/// Decides how much work one recursion frame may do before splitting, and
/// which variables to split on.
pub trait EnumerationStrategy<N> {
    /// Number of models a frame may accept before it has to split.
    fn enumeration_budget(&self, depth: usize) -> usize;

    /// Number of split assignments a frame may accept before the split set is reduced.
    fn split_probe_budget(&self, depth: usize) -> usize;

    /// Split variables for a frame, chosen among `remaining`.
    ///
    /// At depth 0 the oracle may be consulted; deeper frames behave as
    /// [`EnumerationStrategy::reduce_split_variables`].
    fn initial_split_variables<O: Oracle<Name = N>>(
        &self,
        remaining: &[N],
        oracle: &O,
        depth: usize,
    ) -> Vec<N>;

    /// A strictly smaller, non-empty subset of `vars` whenever `vars` has more
    /// than one element.
    fn reduce_split_variables(&self, vars: &[N], depth: usize) -> Vec<N>;
}

/// Enumerates everything in a single pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSplitStrategy;

impl<N> EnumerationStrategy<N> for NoSplitStrategy {
    fn enumeration_budget(&self, _: usize) -> usize {
        usize::MAX
    }

    fn split_probe_budget(&self, _: usize) -> usize {
        usize::MAX
    }

    fn initial_split_variables<O: Oracle<Name = N>>(&self, _: &[N], _: &O, _: usize) -> Vec<N> {
        Vec::new()
    }

    fn reduce_split_variables(&self, _: &[N], _: usize) -> Vec<N> {
        Vec::new()
    }
}

pub const MIN_MAX_MODELS: usize = 3;
pub const DEFAULT_MAX_MODELS: usize = 500;

/// One model cap for both budgets at every depth. Split variables come from a
/// provider at depth 0 and are halved from there on.
#[derive(Debug, Clone)]
pub struct DefaultStrategy<P> {
    max_models: usize,
    provider: P,
}

impl<P> DefaultStrategy<P> {
    /// Caps below [`MIN_MAX_MODELS`] are raised to it.
    pub fn new(provider: P, max_models: usize) -> Self {
        DefaultStrategy {
            max_models: max_models.max(MIN_MAX_MODELS),
            provider,
        }
    }

    pub fn max_models(&self) -> usize {
        self.max_models
    }
}

impl Default for DefaultStrategy<MostCommonVariablesProvider> {
    fn default() -> Self {
        Self::new(MostCommonVariablesProvider::default(), DEFAULT_MAX_MODELS)
    }
}

fn first_half<N: Clone>(vars: &[N]) -> Vec<N> {
    if vars.len() > 1 {
        vars[..vars.len() / 2].to_vec()
    } else {
        vars.to_vec()
    }
}

impl<N: Clone, P: SplitVariableProvider<N>> EnumerationStrategy<N> for DefaultStrategy<P> {
    fn enumeration_budget(&self, _: usize) -> usize {
        self.max_models
    }

    fn split_probe_budget(&self, _: usize) -> usize {
        self.max_models
    }

    fn initial_split_variables<O: Oracle<Name = N>>(
        &self,
        remaining: &[N],
        oracle: &O,
        depth: usize,
    ) -> Vec<N> {
        if depth == 0 {
            self.provider.split_variables(oracle, remaining)
        } else {
            self.reduce_split_variables(remaining, depth)
        }
    }

    fn reduce_split_variables(&self, vars: &[N], _: usize) -> Vec<N> {
        first_half(vars)
    }
}

/// A strategy chosen at run time, see [`crate::EnumerationParams::strategy`].
#[derive(Debug, Clone)]
pub enum ConfiguredStrategy {
    NoSplit,
    MostCommon(DefaultStrategy<MostCommonVariablesProvider>),
    LeastCommon(DefaultStrategy<LeastCommonVariablesProvider>),
    Random(DefaultStrategy<RandomVariableProvider>),
}

impl ConfiguredStrategy {
    /// The model cap, unbounded without splitting.
    pub fn max_models(&self) -> usize {
        match self {
            ConfiguredStrategy::NoSplit => usize::MAX,
            ConfiguredStrategy::MostCommon(s) => s.max_models(),
            ConfiguredStrategy::LeastCommon(s) => s.max_models(),
            ConfiguredStrategy::Random(s) => s.max_models(),
        }
    }
}

impl<N: Clone> EnumerationStrategy<N> for ConfiguredStrategy {
    fn enumeration_budget(&self, _: usize) -> usize {
        self.max_models()
    }

    fn split_probe_budget(&self, _: usize) -> usize {
        self.max_models()
    }

    fn initial_split_variables<O: Oracle<Name = N>>(
        &self,
        remaining: &[N],
        oracle: &O,
        depth: usize,
    ) -> Vec<N> {
        match self {
            ConfiguredStrategy::NoSplit => Vec::new(),
            ConfiguredStrategy::MostCommon(s) => s.initial_split_variables(remaining, oracle, depth),
            ConfiguredStrategy::LeastCommon(s) => s.initial_split_variables(remaining, oracle, depth),
            ConfiguredStrategy::Random(s) => s.initial_split_variables(remaining, oracle, depth),
        }
    }

    fn reduce_split_variables(&self, vars: &[N], depth: usize) -> Vec<N> {
        match self {
            ConfiguredStrategy::NoSplit => Vec::new(),
            ConfiguredStrategy::MostCommon(s) => s.reduce_split_variables(vars, depth),
            ConfiguredStrategy::LeastCommon(s) => s.reduce_split_variables(vars, depth),
            ConfiguredStrategy::Random(s) => s.reduce_split_variables(vars, depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_models_has_a_floor() {
        let s = DefaultStrategy::new(MostCommonVariablesProvider::default(), 1);
        assert_eq!(EnumerationStrategy::<u32>::enumeration_budget(&s, 0), MIN_MAX_MODELS);
        assert_eq!(EnumerationStrategy::<u32>::split_probe_budget(&s, 4), MIN_MAX_MODELS);
        let s = DefaultStrategy::<MostCommonVariablesProvider>::default();
        assert_eq!(s.max_models(), DEFAULT_MAX_MODELS);
    }

    #[test]
    fn reduction_terminates() {
        let s = DefaultStrategy::<MostCommonVariablesProvider>::default();
        let mut vars = (0..37u32).collect::<Vec<_>>();
        let mut steps = 0;
        while vars.len() > 1 {
            let reduced = s.reduce_split_variables(&vars, 1);
            assert!(!reduced.is_empty());
            assert!(reduced.len() < vars.len());
            assert!(reduced.iter().all(|v| vars.contains(v)));
            vars = reduced;
            steps += 1;
        }
        assert_eq!(vars, vec![0]);
        assert!(steps <= 6);
        assert_eq!(s.reduce_split_variables(&vars, 1), vec![0]);
    }

    #[test]
    fn no_split_is_unbounded() {
        let s = ConfiguredStrategy::NoSplit;
        assert_eq!(EnumerationStrategy::<u32>::enumeration_budget(&s, 0), usize::MAX);
        assert!(s.reduce_split_variables(&[1u32, 2, 3], 0).is_empty());
    }
}
