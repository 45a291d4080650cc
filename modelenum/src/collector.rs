use crate::{Model, RelevantIndices, VariableUniverse};
use num_bigint::BigUint;
use sattrait::{Cancelled, Event, Handler, Oracle, Var};

/// Two-phase buffer of enumerated models.
///
/// Models are added as uncommitted. `commit` makes them part of the result,
/// `rollback` forgets them. Every method that may suspend the computation
/// consults the handler and returns `Err` when it refuses to resume.
pub trait EnumerationCollector<O: Oracle> {
    type Output;

    /// Record the restriction of `model` to `relevant`. The handler is asked
    /// first, and the model is only recorded if it lets the computation go on.
    fn add_model(
        &mut self,
        model: &[bool],
        oracle: &O,
        relevant: &RelevantIndices,
        handler: &mut dyn Handler,
    ) -> Result<(), Cancelled>;

    fn commit(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled>;

    /// Uncommitted models are discarded even if the handler cancels.
    fn rollback(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled>;

    /// The uncommitted models, as they were added, followed by a rollback.
    fn rollback_and_materialize(
        &mut self,
        oracle: &O,
        handler: &mut dyn Handler,
    ) -> Result<Vec<Model<O::Name>>, Cancelled>;

    /// The committed result.
    fn result(self) -> Self::Output;
}

/// Number of models a solver model stands for, given `k` don't-care variables.
fn expansion(k: usize) -> u64 {
    if k >= 64 {
        u64::MAX
    } else {
        1u64 << k
    }
}

fn named<O: Oracle>(model: &[bool], oracle: &O, relevant: &RelevantIndices) -> Model<O::Name> {
    Model::new(
        relevant
            .iter(model.len())
            .filter_map(|v| oracle.name_of(v).map(|n| crate::Literal::new(n.clone(), model[v.idx()])))
            .collect(),
    )
}

/// Collects the models themselves.
#[derive(Debug, Clone)]
pub struct ModelCollector<N> {
    models: Vec<Model<N>>,
    /// `models[..committed]` is the durable part.
    committed: usize,
    dont_cares: Vec<N>,
    missing_extra: Vec<N>,
}

impl<N: Clone> ModelCollector<N> {
    pub fn new(universe: &VariableUniverse<N>) -> Self {
        ModelCollector {
            models: Vec::new(),
            committed: 0,
            dont_cares: universe.dont_cares.clone(),
            missing_extra: universe.missing_extra.clone(),
        }
    }
}

impl<O: Oracle> EnumerationCollector<O> for ModelCollector<O::Name> {
    type Output = Vec<Model<O::Name>>;

    fn add_model(
        &mut self,
        model: &[bool],
        oracle: &O,
        relevant: &RelevantIndices,
        handler: &mut dyn Handler,
    ) -> Result<(), Cancelled> {
        Cancelled::check(handler, Event::ModelsFound(expansion(self.dont_cares.len())))?;
        self.models.push(named(model, oracle, relevant));
        Ok(())
    }

    fn commit(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.committed = self.models.len();
        Cancelled::check(handler, Event::Commit)
    }

    fn rollback(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.models.truncate(self.committed);
        Cancelled::check(handler, Event::Rollback)
    }

    fn rollback_and_materialize(
        &mut self,
        _: &O,
        handler: &mut dyn Handler,
    ) -> Result<Vec<Model<O::Name>>, Cancelled> {
        let models = self.models.split_off(self.committed);
        Cancelled::check(handler, Event::Rollback)?;
        Ok(models)
    }

    fn result(self) -> Vec<Model<O::Name>> {
        let ModelCollector {
            mut models,
            committed,
            dont_cares,
            missing_extra,
        } = self;
        models.truncate(committed);
        for m in models.iter_mut() {
            for n in missing_extra.iter() {
                m.push(n.clone(), false);
            }
        }
        for d in dont_cares.iter() {
            models = models
                .into_iter()
                .flat_map(|m| {
                    let mut pos = m.clone();
                    pos.push(d.clone(), true);
                    let mut neg = m;
                    neg.push(d.clone(), false);
                    [neg, pos]
                })
                .collect();
        }
        models
    }
}

/// Counts models without keeping the committed ones.
#[derive(Debug, Clone)]
pub struct ModelCountCollector {
    committed: BigUint,
    uncommitted: Vec<Vec<(Var, bool)>>,
    dont_cares: usize,
}

impl ModelCountCollector {
    pub fn new<N>(universe: &VariableUniverse<N>) -> Self {
        ModelCountCollector {
            committed: BigUint::from(0u32),
            uncommitted: Vec::new(),
            dont_cares: universe.dont_cares.len(),
        }
    }
}

impl<O: Oracle> EnumerationCollector<O> for ModelCountCollector {
    type Output = BigUint;

    fn add_model(
        &mut self,
        model: &[bool],
        _: &O,
        relevant: &RelevantIndices,
        handler: &mut dyn Handler,
    ) -> Result<(), Cancelled> {
        Cancelled::check(handler, Event::ModelsFound(expansion(self.dont_cares)))?;
        self.uncommitted.push(
            relevant
                .iter(model.len())
                .map(|v| (v, model[v.idx()]))
                .collect(),
        );
        Ok(())
    }

    fn commit(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.committed += self.uncommitted.len();
        self.uncommitted.clear();
        Cancelled::check(handler, Event::Commit)
    }

    fn rollback(&mut self, handler: &mut dyn Handler) -> Result<(), Cancelled> {
        self.uncommitted.clear();
        Cancelled::check(handler, Event::Rollback)
    }

    fn rollback_and_materialize(
        &mut self,
        oracle: &O,
        handler: &mut dyn Handler,
    ) -> Result<Vec<Model<O::Name>>, Cancelled> {
        let models = self
            .uncommitted
            .drain(..)
            .map(|lits| {
                Model::new(
                    lits.into_iter()
                        .filter_map(|(v, phase)| {
                            oracle.name_of(v).map(|n| crate::Literal::new(n.clone(), phase))
                        })
                        .collect(),
                )
            })
            .collect();
        Cancelled::check(handler, Event::Rollback)?;
        Ok(models)
    }

    fn result(self) -> BigUint {
        self.committed << self.dont_cares
    }
}
