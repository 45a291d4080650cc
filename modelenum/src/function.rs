use crate::blocking::blocking_clause;
use crate::collector::{EnumerationCollector, ModelCollector, ModelCountCollector};
use crate::strategy::{ConfiguredStrategy, EnumerationStrategy};
use crate::{EnumerationError, EnumerationParams, IndexSets, Model, RelevantIndices, VariableUniverse};
use log::{debug, trace};
use num_bigint::BigUint;
use sattrait::{Cancelled, Event, Handler, Lit, Oracle, StateGuard, Var};
use std::fmt::Debug;
use std::hash::Hash;

/// Result of a computation that may have been cancelled by its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Computation<R> {
    Complete(R),
    /// The committed part of the result at the time of cancellation.
    Cancelled { partial: R, cause: Event },
}

impl<R> Computation<R> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Computation::Complete(_))
    }

    pub fn result(&self) -> &R {
        match self {
            Computation::Complete(r) => r,
            Computation::Cancelled { partial, .. } => partial,
        }
    }

    pub fn into_result(self) -> R {
        match self {
            Computation::Complete(r) => r,
            Computation::Cancelled { partial, .. } => partial,
        }
    }

    pub fn cause(&self) -> Option<Event> {
        match self {
            Computation::Complete(_) => None,
            Computation::Cancelled { cause, .. } => Some(*cause),
        }
    }
}

/// Projected model enumeration by recursive splitting.
///
/// Models are restricted to the projection variables and extended with the
/// additional variables. A frame of the recursion enumerates at most the
/// strategy's budget of models; beyond that, the problem is divided by
/// fixing the split variables to each of their satisfiable assignments.
#[derive(Debug, Clone)]
pub struct ModelEnumerationFunction<N, S = ConfiguredStrategy> {
    variables: Option<Vec<N>>,
    additional_variables: Vec<N>,
    strategy: S,
}

#[derive(Debug, Clone)]
pub struct ModelEnumerationFunctionBuilder<N, S> {
    variables: Option<Vec<N>>,
    additional_variables: Vec<N>,
    strategy: S,
}

impl<N> ModelEnumerationFunction<N> {
    pub fn builder() -> ModelEnumerationFunctionBuilder<N, ConfiguredStrategy> {
        ModelEnumerationFunctionBuilder {
            variables: None,
            additional_variables: Vec::new(),
            strategy: EnumerationParams::default().strategy(),
        }
    }
}

impl<N, S> ModelEnumerationFunctionBuilder<N, S> {
    pub fn variables(mut self, vars: impl IntoIterator<Item = N>) -> Self {
        self.variables = Some(vars.into_iter().collect());
        self
    }

    pub fn additional_variables(mut self, vars: impl IntoIterator<Item = N>) -> Self {
        self.additional_variables = vars.into_iter().collect();
        self
    }

    pub fn strategy<S2>(self, strategy: S2) -> ModelEnumerationFunctionBuilder<N, S2> {
        ModelEnumerationFunctionBuilder {
            variables: self.variables,
            additional_variables: self.additional_variables,
            strategy,
        }
    }

    pub fn params(self, params: &EnumerationParams) -> ModelEnumerationFunctionBuilder<N, ConfiguredStrategy> {
        self.strategy(params.strategy())
    }

    pub fn build(self) -> ModelEnumerationFunction<N, S> {
        ModelEnumerationFunction {
            variables: self.variables,
            additional_variables: self.additional_variables,
            strategy: self.strategy,
        }
    }
}

impl<N, S> ModelEnumerationFunction<N, S>
where
    N: Clone + Ord + Hash + Debug,
    S: EnumerationStrategy<N>,
{
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// All projected models.
    pub fn enumerate<O: Oracle<Name = N>>(
        &self,
        oracle: &mut O,
        handler: &mut dyn Handler,
    ) -> Result<Computation<Vec<Model<N>>>, EnumerationError> {
        self.run(oracle, ModelCollector::new, handler)
    }

    /// Number of projected models.
    pub fn count<O: Oracle<Name = N>>(
        &self,
        oracle: &mut O,
        handler: &mut dyn Handler,
    ) -> Result<Computation<BigUint>, EnumerationError> {
        self.run(oracle, ModelCountCollector::new, handler)
    }

    /// Enumerate into the collector built by `make_collector`.
    ///
    /// The oracle is left in the state it was given in. Errors are reported
    /// before the oracle is used.
    pub fn run<O, C, F>(
        &self,
        oracle: &mut O,
        make_collector: F,
        handler: &mut dyn Handler,
    ) -> Result<Computation<C::Output>, EnumerationError>
    where
        O: Oracle<Name = N>,
        C: EnumerationCollector<O>,
        F: FnOnce(&VariableUniverse<N>) -> C,
    {
        let variables = self
            .variables
            .as_deref()
            .ok_or(EnumerationError::InvalidVariableSet)?;
        let universe = VariableUniverse::new(oracle, variables, &self.additional_variables);
        let indices = IndexSets::new(
            oracle,
            Some(universe.enumeration.as_slice()),
            &self.additional_variables,
        )?;
        debug!(
            "enumerating over {} variables ({} don't-cares, {} extra missing)",
            universe.enumeration.len(),
            universe.dont_cares.len(),
            universe.missing_extra.len()
        );

        let mut collector = make_collector(&universe);
        if let Err(c) = Cancelled::check(handler, Event::EnumerationStarted) {
            return Ok(Computation::Cancelled {
                partial: collector.result(),
                cause: c.cause,
            });
        }

        let outcome = Recursion {
            strategy: &self.strategy,
            universe: &universe,
            indices: &indices,
            collector: &mut collector,
            handler,
        }
        .enumerate(oracle, &[], None, 0);

        match outcome {
            Ok(()) => Ok(Computation::Complete(collector.result())),
            Err(Interrupt::Cancelled(cause)) => {
                debug!("enumeration cancelled at {:?}", cause);
                Ok(Computation::Cancelled {
                    partial: collector.result(),
                    cause,
                })
            }
            Err(Interrupt::Failed(e)) => Err(e),
        }
    }
}

enum Interrupt {
    Cancelled(Event),
    Failed(EnumerationError),
}

impl From<Cancelled> for Interrupt {
    fn from(c: Cancelled) -> Self {
        Interrupt::Cancelled(c.cause)
    }
}

impl From<EnumerationError> for Interrupt {
    fn from(e: EnumerationError) -> Self {
        Interrupt::Failed(e)
    }
}

enum Bounded {
    Exhausted,
    Overflow,
}

/// State shared by every frame of one enumeration.
struct Recursion<'a, N, S, C> {
    strategy: &'a S,
    universe: &'a VariableUniverse<N>,
    indices: &'a IndexSets,
    collector: &'a mut C,
    handler: &'a mut dyn Handler,
}

impl<'a, N, S, C> Recursion<'a, N, S, C>
where
    N: Clone + Ord + Hash + Debug,
    S: EnumerationStrategy<N>,
{
    /// Solve and block until unsatisfiable, or until a model arrives after
    /// `budget` models were accepted. Blocking clauses are removed afterwards.
    /// On cancellation the collector is rolled back.
    fn enumerate_bounded<O>(
        &mut self,
        oracle: &mut O,
        budget: usize,
        block_on: &RelevantIndices,
        report_on: &RelevantIndices,
    ) -> Result<Bounded, Interrupt>
    where
        O: Oracle<Name = N>,
        C: EnumerationCollector<O>,
    {
        let mut oracle = StateGuard::new(oracle);
        let mut found = 0usize;
        let outcome = loop {
            match oracle.solve(&mut *self.handler) {
                Ok(false) => break Ok(Bounded::Exhausted),
                Ok(true) if found >= budget => break Ok(Bounded::Overflow),
                Ok(true) => {}
                Err(c) => break Err(c),
            }
            let clause = blocking_clause(oracle.model(), block_on);
            if let Err(c) = self
                .collector
                .add_model(oracle.model(), &*oracle, report_on, &mut *self.handler)
            {
                break Err(c);
            }
            found += 1;
            trace!("model {} accepted", found);
            oracle.add_clause(clause);
        };
        outcome.map_err(|c| {
            // Already cancelled; the handler's answer to the rollback is moot.
            let _ = self.collector.rollback(&mut *self.handler);
            Interrupt::from(c)
        })
    }

    fn enumerate<O>(
        &mut self,
        oracle: &mut O,
        context: &[Lit],
        split: Option<Vec<N>>,
        depth: usize,
    ) -> Result<(), Interrupt>
    where
        O: Oracle<Name = N>,
        C: EnumerationCollector<O>,
    {
        debug!("frame at depth {} with {} context literals", depth, context.len());
        let mut oracle = StateGuard::new(oracle);
        oracle.add_literals(context);

        let indices = self.indices;
        let budget = self.strategy.enumeration_budget(depth);
        if let Bounded::Exhausted =
            self.enumerate_bounded(&mut *oracle, budget, &indices.projection, &indices.all)?
        {
            self.collector.commit(&mut *self.handler)?;
            return Ok(());
        }
        self.collector.rollback(&mut *self.handler)?;

        let mut split_vars = match split {
            Some(vars) => vars,
            None => self
                .strategy
                .initial_split_variables(&self.universe.enumeration, &*oracle, depth),
        };
        let probe_budget = self.strategy.split_probe_budget(depth);
        loop {
            if split_vars.is_empty() {
                return Err(EnumerationError::EmptySplitVariables { depth }.into());
            }
            let split_indices =
                RelevantIndices::Only(split_vars.iter().filter_map(|n| oracle.index_of(n)).collect());
            match self.enumerate_bounded(&mut *oracle, probe_budget, &split_indices, &split_indices)? {
                Bounded::Exhausted => break,
                Bounded::Overflow => {
                    self.collector.rollback(&mut *self.handler)?;
                    let reduced = self.strategy.reduce_split_variables(&split_vars, depth);
                    if reduced.len() >= split_vars.len() {
                        return Err(EnumerationError::SplitNotReducible {
                            depth,
                            size: split_vars.len(),
                        }
                        .into());
                    }
                    debug!("reducing split from {} to {} variables", split_vars.len(), reduced.len());
                    split_vars = reduced;
                }
            }
        }
        let assignments = self
            .collector
            .rollback_and_materialize(&*oracle, &mut *self.handler)?;
        debug!(
            "splitting on {} variables into {} branches at depth {}",
            split_vars.len(),
            assignments.len(),
            depth
        );

        let fixed = context.iter().map(|l| l.var()).collect::<Vec<Var>>();
        let remaining = self
            .universe
            .enumeration
            .iter()
            .filter(|n| !split_vars.contains(n))
            .filter(|n| oracle.index_of(n).map(|v| !fixed.contains(&v)).unwrap_or(false))
            .cloned()
            .collect::<Vec<_>>();
        let child_split = self
            .strategy
            .initial_split_variables(&remaining, &*oracle, depth + 1);

        for assignment in assignments {
            let mut child_context = context.to_vec();
            child_context.extend(assignment.to_lits(&*oracle));
            self.enumerate(&mut *oracle, &child_context, Some(child_split.clone()), depth + 1)?;
            self.collector.commit(&mut *self.handler)?;
        }
        Ok(())
    }
}
