pub mod formula;
mod solver;
mod truth;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum SatResult {
    Satisfiable,
    Unsatisfiable,
}

pub use formula::{Clause, Cnf, Literal};
pub use solver::{Solver, SolverStats};
pub use truth::Truth;
