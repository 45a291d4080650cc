use sattrait::Lit;

/// Clause reference: position in the database.
pub type ClauseRef = usize;

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct Watcher {
    pub cref: ClauseRef,
    pub blocker: Lit,
}

/// Clauses in insertion order, so that a prefix of the database is a previous
/// state of it. Clauses of two or more literals are watched on their first
/// two literals; units and empty clauses are kept in side lists.
pub struct ClauseDatabase {
    pub clauses: Vec<Vec<Lit>>,
    /// `watches[l]` holds the clauses watching `!l`, i.e. those to visit when `l` becomes true.
    pub watches: Vec<Vec<Watcher>>,
    pub units: Vec<ClauseRef>,
    pub first_empty: Option<ClauseRef>,
}

impl ClauseDatabase {
    pub fn new() -> Self {
        ClauseDatabase {
            clauses: Vec::new(),
            watches: Vec::new(),
            units: Vec::new(),
            first_empty: None,
        }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn add_var(&mut self) {
        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
    }

    /// Sort and deduplicate `lits`; returns `false` if the clause is a tautology.
    pub fn normalize(lits: &mut Vec<Lit>) -> bool {
        lits.sort();
        lits.dedup();
        !lits.windows(2).any(|w| w[0].var() == w[1].var())
    }

    pub fn add_clause(&mut self, lits: Vec<Lit>) -> ClauseRef {
        let cref = self.clauses.len();
        match lits.len() {
            0 => {
                if self.first_empty.is_none() {
                    self.first_empty = Some(cref);
                }
            }
            1 => self.units.push(cref),
            _ => {
                self.watches[(!lits[0]).0 as usize].push(Watcher {
                    cref,
                    blocker: lits[1],
                });
                self.watches[(!lits[1]).0 as usize].push(Watcher {
                    cref,
                    blocker: lits[0],
                });
            }
        }
        self.clauses.push(lits);
        cref
    }

    /// Remove every clause at position `len` or later.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.clauses.len() {
            return;
        }
        self.clauses.truncate(len);
        for ws in self.watches.iter_mut() {
            ws.retain(|w| w.cref < len);
        }
        self.units.retain(|c| *c < len);
        if self.first_empty.map(|c| c >= len).unwrap_or(false) {
            self.first_empty = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sattrait::Var;

    #[test]
    fn normalize_removes_duplicates_and_detects_tautologies() {
        let a = Lit::positive(Var(0));
        let b = Lit::negative(Var(1));
        let mut c = vec![b, a, b];
        assert!(ClauseDatabase::normalize(&mut c));
        assert_eq!(c, vec![a, b]);
        let mut t = vec![a, b, !a];
        assert!(!ClauseDatabase::normalize(&mut t));
    }

    #[test]
    fn truncate_detaches_watchers() {
        let mut db = ClauseDatabase::new();
        db.add_var();
        db.add_var();
        let a = Lit::positive(Var(0));
        let b = Lit::positive(Var(1));
        db.add_clause(vec![a, b]);
        db.add_clause(vec![!a]);
        db.add_clause(vec![]);
        db.add_clause(vec![!a, !b]);
        assert_eq!(db.first_empty, Some(2));
        db.truncate(1);
        assert_eq!(db.len(), 1);
        assert!(db.units.is_empty());
        assert_eq!(db.first_empty, None);
        assert_eq!(db.watches.iter().map(|w| w.len()).sum::<usize>(), 2);
    }
}
