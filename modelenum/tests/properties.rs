mod common;

use common::*;
use dpll::DpllSolver;
use modelenum::*;
use quickcheck::{Arbitrary, Gen, QuickCheck};
use sattrait::{NopHandler, SatInstance};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
struct SmallCnf {
    vars: u32,
    clauses: Vec<Vec<(u32, bool)>>,
}

impl Arbitrary for SmallCnf {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let vars = 1 + u32::arbitrary(g) % 5;
        let num_clauses = usize::arbitrary(g) % 9;
        let clauses = (0..num_clauses)
            .map(|_| {
                let len = 1 + usize::arbitrary(g) % 3;
                (0..len)
                    .map(|_| (u32::arbitrary(g) % vars, bool::arbitrary(g)))
                    .collect()
            })
            .collect();
        SmallCnf { vars, clauses }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vars = self.vars;
        Box::new(
            self.clauses
                .shrink()
                .filter(|cs| cs.iter().all(|c| !c.is_empty()))
                .map(move |clauses| SmallCnf { vars, clauses }),
        )
    }
}

impl SmallCnf {
    fn solver(&self) -> Recording<DpllSolver<u32>> {
        let mut s = DpllSolver::new();
        for v in 0..self.vars {
            s.var(v);
        }
        for c in self.clauses.iter() {
            let lits = c.iter().map(|(v, phase)| s.lit(*v, *phase)).collect::<Vec<_>>();
            s.add_clause(lits);
        }
        Recording::new(s)
    }

    fn projection(&self, mask: u8) -> Vec<u32> {
        (0..self.vars).filter(|v| mask & (1 << v) != 0).collect()
    }
}

fn strategy(choice: u8) -> ConfiguredStrategy {
    let strategy = match choice % 4 {
        0 => StrategyKind::NoSplit,
        1 => StrategyKind::MostCommon,
        2 => StrategyKind::LeastCommon,
        _ => StrategyKind::Random,
    };
    EnumerationParams {
        strategy,
        max_models: 1,
        seed: choice as u64,
        ..Default::default()
    }
    .strategy()
}

/// Enumerated models, checked against brute force.
fn complete_and_distinct<S: EnumerationStrategy<u32>>(cnf: &SmallCnf, projection: Vec<u32>, strategy: S) -> bool {
    let expected = brute_force(cnf.vars, &cnf.clauses, &projection);
    let mut s = cnf.solver();
    let f = ModelEnumerationFunction::builder()
        .variables(projection)
        .strategy(strategy)
        .build();
    let models = match f.enumerate(&mut s, &mut NopHandler) {
        Ok(Computation::Complete(models)) => models,
        _ => return false,
    };
    let found = models.iter().map(assignment).collect::<BTreeSet<_>>();
    s.stack.is_empty() && found.len() == models.len() && found == expected
}

#[test]
fn enumeration_matches_brute_force() {
    fn prop(cnf: SmallCnf, mask: u8, choice: u8) -> bool {
        complete_and_distinct(&cnf, cnf.projection(mask), strategy(choice))
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(SmallCnf, u8, u8) -> bool);
}

#[test]
fn one_model_per_frame_matches_brute_force() {
    fn prop(cnf: SmallCnf, mask: u8) -> bool {
        complete_and_distinct(&cnf, cnf.projection(mask), OneAtATime { probe_budget: 2 })
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(SmallCnf, u8) -> bool);
}

#[test]
fn count_matches_enumeration() {
    fn prop(cnf: SmallCnf, mask: u8, choice: u8) -> bool {
        // An empty projection counts 1 if satisfiable, 0 otherwise.
        let projection = cnf.projection(mask);
        let expected = brute_force(cnf.vars, &cnf.clauses, &projection).len();
        let f = ModelEnumerationFunction::builder()
            .variables(projection)
            .strategy(strategy(choice))
            .build();
        let count = f.count(&mut cnf.solver(), &mut NopHandler).map(|c| c.into_result());
        count == Ok(num_bigint::BigUint::from(expected))
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(SmallCnf, u8, u8) -> bool);
}

#[test]
fn every_model_is_committed_or_discarded() {
    fn prop(cnf: SmallCnf, choice: u8) -> bool {
        let projection = cnf.projection(u8::MAX);
        let expected = brute_force(cnf.vars, &cnf.clauses, &projection).len();
        let f = ModelEnumerationFunction::builder()
            .variables(projection)
            .strategy(strategy(choice))
            .build();
        let result = f.run(
            &mut cnf.solver(),
            |u| Tallying {
                inner: ModelCollector::new(u),
                tally: Tally::default(),
            },
            &mut NopHandler,
        );
        match result {
            Ok(Computation::Complete((models, tally))) => {
                models.len() == expected
                    && tally.pending == 0
                    && tally.committed == expected
                    && tally.added == tally.committed + tally.discarded
            }
            _ => false,
        }
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(SmallCnf, u8) -> bool);
}
