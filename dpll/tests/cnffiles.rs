use dpll::{DimacsError, DpllSolver};
use sattrait::{NopHandler, Oracle};

fn verify_model(text: &str) -> bool {
    let mut solver = DpllSolver::from_dimacs(text).unwrap();
    if solver.solve(&mut NopHandler).unwrap() {
        // check that each clause is satisfied
        let model = solver.model().to_vec();
        for c in solver.clauses() {
            if !c.iter().any(|l| l.holds(&model)) {
                println!("  clause not sat: {:?}", c);
                return false;
            }
        }
        println!(
            "  ok -- sat model, checked {} clauses against {} variables",
            solver.clauses().count(),
            model.len()
        );
    }
    true
}

const SAT: &str = "c small satisfiable instance
p cnf 5 6
1 -2 3 0
-1 2 0
2 -3 4 0
-4 5 0
-5 -1 0
3 4 5 0
";

const UNSAT: &str = "p cnf 2 4
1 2 0
-1 2 0
1 -2 0
-1 -2 0
";

#[test]
fn satisfiable_dimacs_model_is_checked() {
    assert!(verify_model(SAT));
    let mut s = DpllSolver::from_dimacs(SAT).unwrap();
    assert!(s.solve(&mut NopHandler).unwrap());
    assert_eq!(s.known_variables(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn unsatisfiable_dimacs() {
    let mut s = DpllSolver::from_dimacs(UNSAT).unwrap();
    assert!(!s.solve(&mut NopHandler).unwrap());
}

#[test]
fn malformed_dimacs_is_an_error() {
    match DpllSolver::from_dimacs("p cnf x y\n1 2") {
        Err(DimacsError::Parse(_)) => {}
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("parsed malformed input"),
    }
}
