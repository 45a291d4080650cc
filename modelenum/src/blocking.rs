use crate::RelevantIndices;
use sattrait::Lit;

/// The clause excluding exactly the restriction of `model` to `relevant`.
pub fn blocking_clause(model: &[bool], relevant: &RelevantIndices) -> Vec<Lit> {
    relevant
        .iter(model.len())
        .map(|v| Lit::new(v, model[v.idx()]))
        .collect()
}
