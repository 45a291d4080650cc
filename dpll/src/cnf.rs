use crate::DpllSolver;
use log::trace;
use sattrait::{Lit, SatInstance};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("could not parse DIMACS input: {0}")]
    Parse(String),
    #[error("DIMACS input is not in CNF format")]
    NotCnf,
}

impl DpllSolver<u64> {
    /// Load a CNF in DIMACS format. Variables are named by their DIMACS number.
    pub fn from_dimacs(text: &str) -> Result<Self, DimacsError> {
        let instance =
            ::dimacs::parse_dimacs(text).map_err(|e| DimacsError::Parse(format!("{:?}", e)))?;
        let (num_vars, clauses) = match instance {
            ::dimacs::Instance::Cnf {
                num_vars, clauses, ..
            } => (num_vars, clauses),
            _ => return Err(DimacsError::NotCnf),
        };

        let mut s = DpllSolver::new();
        for v in 1..=num_vars {
            s.var(v);
        }
        for c in clauses.iter() {
            trace!("clause {:?}", c);
            let lits = c
                .lits()
                .iter()
                .map(|l| s.lit(l.var().to_u64(), l.sign() == ::dimacs::Sign::Pos))
                .collect::<Vec<Lit>>();
            s.add_clause(lits);
        }
        Ok(s)
    }
}
