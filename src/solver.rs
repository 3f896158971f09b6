use crate::formula::{Clause, Cnf};
use crate::SatResult;
use log::{debug, trace};

/// Counters gathered over one call to [`Solver::solve`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SolverStats {
    pub decisions: usize,
    pub propagations: usize,
    pub max_depth: usize,
}

/// Recursive DPLL search. Each branch works on its own copy of the clause list; literal
/// objects are shared between copies but their assignment slots are never written.
pub struct Solver {
    formula: Cnf,
    stats: SolverStats,
}

impl Solver {
    pub fn new(formula: Cnf) -> Self {
        Self {
            formula,
            stats: SolverStats::default(),
        }
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = SolverStats::default();
        let result = if self.search(self.formula.clone(), 0) {
            SatResult::Satisfiable
        } else {
            SatResult::Unsatisfiable
        };
        debug!(
            "{:?} after {} decisions, {} propagations, depth {}",
            result, self.stats.decisions, self.stats.propagations, self.stats.max_depth
        );
        result
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    fn search(&mut self, mut formula: Cnf, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);
        self.stats.propagations += formula.propagate_units();

        if formula.has_empty_clause() {
            trace!("conflict at depth {}", depth);
            return false;
        }
        if formula.is_empty() {
            trace!("all clauses satisfied at depth {}", depth);
            return true;
        }

        // No heuristics: branch on the first literal object in formula order.
        let literal = match formula.collect_variables().into_iter().next() {
            Some(literal) => literal,
            None => return true,
        };
        self.stats.decisions += 1;
        trace!("decide {} at depth {}", literal, depth);

        let mut positive = formula.clone();
        positive.push(Clause::new(vec![literal.clone()]));
        if self.search(positive, depth + 1) {
            return true;
        }

        trace!("decide {} at depth {}", literal.negated_name(), depth);
        let mut negative = formula;
        negative.push(Clause::new(vec![literal.negated()]));
        self.search(negative, depth + 1)
    }
}

impl Cnf {
    /// Whether some assignment satisfies every clause. Leaves `self` untouched.
    pub fn decide(&self) -> bool {
        Solver::new(self.clone()).solve() == SatResult::Satisfiable
    }

    /// Structural unit propagation: while a unit clause `{u}` exists, drop every clause that
    /// contains `u` and delete every occurrence of `¬u` from the rest. Assignment slots are not
    /// touched. Returns the number of units propagated.
    pub fn propagate_units(&mut self) -> usize {
        let mut propagated = 0;
        while let Some(unit) = self.find_unit_clause() {
            let name = unit.name().to_string();
            let negation = unit.negated_name();
            trace!("propagate {}", name);

            self.remove_clauses_containing(&name);
            for clause in self.clauses_mut() {
                clause.remove_all(&negation);
            }
            propagated += 1;
        }
        propagated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{clause_names, formula_strategy, Literal};
    use crate::Truth;
    use proptest::prelude::*;
    use test_env_log::test;

    fn vars(names: &[&str]) -> Vec<Literal> {
        names.iter().map(|n| Literal::new(*n)).collect()
    }

    #[test]
    fn solve_empty_formula() {
        let f = Cnf::default();
        assert_eq!(Solver::new(f).solve(), SatResult::Satisfiable);
    }

    #[test]
    fn solve_empty_clause() {
        let f = Cnf::new(vec![Clause::default()]);
        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_unit_conflict() {
        let x = Literal::new("x");
        let f = Cnf::new(vec![Clause::new(vec![x.clone()]), Clause::new(vec![-x])]);

        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Unsatisfiable);
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().propagations, 1);
    }

    #[test]
    fn solve_bcp_sat() {
        let v = vars(&["x", "y"]);
        let c1 = Clause::new(vec![v[0].clone(), v[1].clone()]);
        let c2 = Clause::new(vec![-&v[0]]);
        let f = Cnf::new(vec![c1, c2]);

        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(solver.stats().propagations, 2);
    }

    #[test]
    fn solve_bcp_unsat() {
        let v = vars(&["x", "y"]);
        let c1 = Clause::new(vec![v[0].clone(), v[1].clone()]);
        let c2 = Clause::new(vec![-&v[0]]);
        let c3 = Clause::new(vec![-&v[1]]);
        let f = Cnf::new(vec![c1, c2, c3]);

        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_tautology() {
        let x = Literal::new("x");
        let f = Cnf::new(vec![Clause::new(vec![x.clone(), -x])]);

        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert_eq!(solver.stats().decisions, 1);
    }

    #[test]
    fn solve_duplicate_negations() {
        let u = Literal::new("u");
        let f = Cnf::new(vec![Clause::new(vec![u.clone()]), Clause::new(vec![-&u, -&u])]);
        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_branch_on_negative_literal() {
        // every clause mentions x, and the first literal seen is -x
        let v = vars(&["x", "y"]);
        let (x, y) = (&v[0], &v[1]);
        let f = Cnf::new(vec![
            Clause::new(vec![-x, y.clone()]),
            Clause::new(vec![-x, -y]),
            Clause::new(vec![x.clone(), y.clone()]),
            Clause::new(vec![x.clone(), -y]),
        ]);
        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_conflict_sat() {
        let v = vars(&["a", "b", "c"]);
        let c1 = Clause::new(vec![v[0].clone(), v[1].clone(), v[2].clone()]);
        let c2 = Clause::new(vec![-&v[0], -&v[1], v[2].clone()]);
        let c3 = Clause::new(vec![-&v[1], -&v[2]]);
        let f = Cnf::new(vec![c1, c2, c3]);

        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), SatResult::Satisfiable);
        assert!(solver.stats().decisions >= 1);
    }

    #[test]
    fn propagation_is_idempotent_without_units() {
        let v = vars(&["x", "y"]);
        let mut f = Cnf::new(vec![
            Clause::new(vec![v[0].clone(), v[1].clone()]),
            Clause::new(vec![-&v[0], -&v[1]]),
        ]);
        let before = f.to_string();
        assert_eq!(f.propagate_units(), 0);
        assert_eq!(f.to_string(), before);
    }

    #[test]
    fn propagation_rewrites_structure_only() {
        let v = vars(&["x", "y", "z"]);
        let mut f = Cnf::new(vec![
            Clause::new(vec![v[0].clone(), v[1].clone()]),
            Clause::new(vec![-&v[0], v[2].clone(), v[1].clone()]),
            Clause::new(vec![v[0].clone()]),
        ]);
        assert_eq!(f.propagate_units(), 1);
        assert_eq!(f.len(), 1);
        assert_eq!(clause_names(f.clauses().next().unwrap()), vec!["z", "y"]);
        assert!(v.iter().all(|l| !l.is_assigned()));
    }

    #[test]
    fn decide_leaves_formula_alone() {
        let v = vars(&["x", "y"]);
        let f = Cnf::new(vec![
            Clause::new(vec![v[0].clone(), v[1].clone()]),
            Clause::new(vec![-&v[0]]),
        ]);
        let before = f.to_string();

        assert!(f.decide());
        assert_eq!(f.len(), 2);
        assert_eq!(f.to_string(), before);
        assert_eq!(f.evaluate(), Truth::Unknown);
    }

    proptest! {
        #[test]
        fn proptest_solve(f in formula_strategy()) {
            let brute_force = solve_brute_force(&f);
            let solver = Solver::new(f).solve();
            log::trace!("result = {:?}", solver);
            assert_eq!(solver, brute_force);
        }
    }
}
