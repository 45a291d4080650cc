use crate::EnumerationError;
use itertools::Itertools;
use sattrait::{Oracle, Var};

/// Oracle indices a model is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevantIndices {
    /// Every index of the model.
    All,
    Only(Vec<Var>),
}

impl RelevantIndices {
    /// The indices, given the number of variables in the model.
    pub fn iter<'a>(&'a self, num_vars: usize) -> Box<dyn Iterator<Item = Var> + 'a> {
        match self {
            RelevantIndices::All => Box::new((0..num_vars).map(|i| Var(i as i32))),
            RelevantIndices::Only(vars) => Box::new(vars.iter().copied()),
        }
    }
}

/// Index sets used for every solve/block cycle of one enumeration.
#[derive(Debug, Clone)]
pub struct IndexSets {
    /// Projection variables, in the order given. Models are blocked on these.
    pub projection: RelevantIndices,
    /// Projection variables followed by the extra variables known to the oracle.
    /// Models are reported on these.
    pub all: RelevantIndices,
}

impl IndexSets {
    /// Translate variable names to oracle indices.
    ///
    /// Every projection variable must be known to the oracle. Extra variables
    /// that are not known cannot constrain anything and are dropped.
    pub fn new<O: Oracle>(
        oracle: &O,
        projection: Option<&[O::Name]>,
        extra: &[O::Name],
    ) -> Result<Self, EnumerationError> {
        let projection = projection.ok_or(EnumerationError::InvalidVariableSet)?;
        let projection = projection
            .iter()
            .map(|name| {
                oracle
                    .index_of(name)
                    .ok_or_else(|| EnumerationError::UnknownProjectionVariable(format!("{:?}", name)))
            })
            .collect::<Result<Vec<Var>, _>>()?
            .into_iter()
            .unique()
            .collect::<Vec<_>>();

        let all = projection
            .iter()
            .copied()
            .chain(extra.iter().filter_map(|name| oracle.index_of(name)))
            .unique()
            .collect::<Vec<_>>();

        Ok(IndexSets {
            projection: RelevantIndices::Only(projection),
            all: RelevantIndices::Only(all),
        })
    }
}

/// How the variables of an enumeration relate to the oracle.
#[derive(Debug, Clone)]
pub struct VariableUniverse<N> {
    /// Projection variables known to the oracle, deduplicated, in the order given.
    pub enumeration: Vec<N>,
    /// Projection variables unknown to the oracle. Both of their values are models.
    pub dont_cares: Vec<N>,
    /// Extra variables unknown to the oracle. They are reported as false.
    pub missing_extra: Vec<N>,
}

impl<N: Clone + Ord + std::hash::Hash + std::fmt::Debug> VariableUniverse<N> {
    pub fn new<O: Oracle<Name = N>>(oracle: &O, projection: &[N], extra: &[N]) -> Self {
        let (enumeration, dont_cares): (Vec<N>, Vec<N>) = projection
            .iter()
            .unique()
            .cloned()
            .partition(|n| oracle.index_of(n).is_some());
        let missing_extra = extra
            .iter()
            .unique()
            .filter(|n| oracle.index_of(*n).is_none() && !projection.contains(*n))
            .cloned()
            .collect();
        VariableUniverse {
            enumeration,
            dont_cares,
            missing_extra,
        }
    }
}
