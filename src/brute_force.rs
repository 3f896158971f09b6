use crate::formula::{Cnf, Literal};
use crate::{SatResult, Truth};

// Exhaustive oracle for the proptests. Assigns every variable through the literal slots and
// evaluates the formula directly, so it shares no code with the DPLL search.
pub(crate) fn solve_brute_force(f: &Cnf) -> SatResult {
    let mut variables: Vec<Literal> = vec![];
    for literal in f.collect_variables() {
        if !variables.iter().any(|v| v.shares_variable(&literal)) {
            variables.push(literal);
        }
    }
    assert!(variables.len() <= 15); // just for safety

    let mut result = SatResult::Unsatisfiable;
    for assignment in 0..(1u32 << variables.len()) {
        for (i, variable) in variables.iter().enumerate() {
            variable.assign(Truth::from(assignment & (1 << i) != 0));
        }
        if f.evaluate() == Truth::True {
            result = SatResult::Satisfiable;
            break;
        }
    }

    for variable in &variables {
        variable.assign(Truth::Unknown);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Clause;

    #[test]
    fn solve_bcp_sat() {
        let x = Literal::new("x");
        let y = Literal::new("y");
        let f = Cnf::new(vec![Clause::new(vec![x.clone(), y]), Clause::new(vec![-&x])]);

        assert_eq!(solve_brute_force(&f), SatResult::Satisfiable);
        assert!(!x.is_assigned());
    }

    #[test]
    fn solve_bcp_unsat() {
        let x = Literal::new("x");
        let y = Literal::new("y");
        let f = Cnf::new(vec![
            Clause::new(vec![x.clone(), y.clone()]),
            Clause::new(vec![-&x]),
            Clause::new(vec![-&y]),
        ]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_degenerate() {
        assert_eq!(solve_brute_force(&Cnf::default()), SatResult::Satisfiable);
        assert_eq!(
            solve_brute_force(&Cnf::new(vec![Clause::default()])),
            SatResult::Unsatisfiable
        );
    }
}
