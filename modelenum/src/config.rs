use crate::provider::{
    LeastCommonVariablesProvider, MostCommonVariablesProvider, RandomVariableProvider,
    DEFAULT_MAX_VARIABLES, DEFAULT_TAKE_RATE,
};
use crate::strategy::{ConfiguredStrategy, DefaultStrategy, DEFAULT_MAX_MODELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    NoSplit,
    MostCommon,
    LeastCommon,
    Random,
}

#[derive(Debug, Clone)]
pub struct EnumerationParams {
    pub strategy: StrategyKind,
    /// Models per recursion frame before splitting. Raised to at least 3.
    pub max_models: usize,
    pub split_take_rate: f64,
    pub max_split_variables: usize,
    /// Seed of the random split-variable provider.
    pub seed: u64,
}

impl Default for EnumerationParams {
    fn default() -> Self {
        EnumerationParams {
            strategy: StrategyKind::MostCommon,
            max_models: DEFAULT_MAX_MODELS,
            split_take_rate: DEFAULT_TAKE_RATE,
            max_split_variables: DEFAULT_MAX_VARIABLES,
            seed: 0,
        }
    }
}

impl EnumerationParams {
    pub fn no_split() -> Self {
        EnumerationParams {
            strategy: StrategyKind::NoSplit,
            ..Default::default()
        }
    }

    pub fn strategy(&self) -> ConfiguredStrategy {
        match self.strategy {
            StrategyKind::NoSplit => ConfiguredStrategy::NoSplit,
            StrategyKind::MostCommon => ConfiguredStrategy::MostCommon(DefaultStrategy::new(
                MostCommonVariablesProvider {
                    take_rate: self.split_take_rate,
                    max_variables: self.max_split_variables,
                },
                self.max_models,
            )),
            StrategyKind::LeastCommon => ConfiguredStrategy::LeastCommon(DefaultStrategy::new(
                LeastCommonVariablesProvider {
                    take_rate: self.split_take_rate,
                    max_variables: self.max_split_variables,
                },
                self.max_models,
            )),
            StrategyKind::Random => ConfiguredStrategy::Random(DefaultStrategy::new(
                RandomVariableProvider {
                    take_rate: self.split_take_rate,
                    max_variables: self.max_split_variables,
                    seed: self.seed,
                },
                self.max_models,
            )),
        }
    }
}
