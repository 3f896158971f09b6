pub mod dimacs;

use crate::truth::Truth;
use std::cell::Cell;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Neg;
use std::rc::Rc;

/// A named propositional variable or its negation.
///
/// `Literal` is a handle: cloning it yields another reference to the same literal object, so a
/// literal can appear in many clauses at once. A literal and its negation point at the same pair
/// of assignment slots (with the roles swapped), so assigning either one updates both.
#[derive(Clone)]
pub struct Literal(Rc<LiteralData>);

struct LiteralData {
    name: String,
    value: Rc<Cell<Truth>>,
    negation: Rc<Cell<Truth>>,
}

impl Literal {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, Truth::Unknown)
    }

    pub fn with_value(name: impl Into<String>, value: Truth) -> Self {
        Literal(Rc::new(LiteralData {
            name: name.into(),
            value: Rc::new(Cell::new(value)),
            negation: Rc::new(Cell::new(!value)),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Name of this literal's negation. A leading `-` is stripped rather than doubled, so the
    /// negation of `-x` is `x`.
    pub fn negated_name(&self) -> String {
        negate_name(&self.0.name)
    }

    /// A fresh literal object for the negation of this one, sharing its assignment slots.
    pub fn negated(&self) -> Self {
        Literal(Rc::new(LiteralData {
            name: self.negated_name(),
            value: Rc::clone(&self.0.negation),
            negation: Rc::clone(&self.0.value),
        }))
    }

    pub fn assign(&self, value: Truth) {
        self.0.value.set(value);
        self.0.negation.set(!value);
    }

    pub fn value(&self) -> Truth {
        self.0.value.get()
    }

    pub fn is_assigned(&self) -> bool {
        self.value().is_known()
    }

    /// Whether both handles refer to the same literal object.
    pub fn ptr_eq(&self, other: &Literal) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether both literals are views of the same variable, in either polarity.
    pub fn shares_variable(&self, other: &Literal) -> bool {
        Rc::ptr_eq(&self.0.value, &other.0.value) || Rc::ptr_eq(&self.0.value, &other.0.negation)
    }
}

pub(crate) fn negate_name(name: &str) -> String {
    match name.strip_prefix('-') {
        Some(positive) => positive.to_string(),
        None => format!("-{}", name),
    }
}

impl Neg for &Literal {
    type Output = Literal;

    fn neg(self) -> Literal {
        self.negated()
    }
}

impl Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Literal {
        self.negated()
    }
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}={}", self.name(), self.value())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

/// A disjunction of literals. Duplicates are kept as given.
#[derive(Clone, Debug, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn unit_literal(&self) -> Option<&Literal> {
        match self.literals.as_slice() {
            [literal] => Some(literal),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.literals.iter().any(|l| l.name() == name)
    }

    /// Removes the first literal called `name`, if there is one.
    pub fn remove_literal(&mut self, name: &str) {
        if let Some(idx) = self.literals.iter().position(|l| l.name() == name) {
            self.literals.remove(idx);
        }
    }

    /// Removes every literal called `name`.
    pub fn remove_all(&mut self, name: &str) {
        self.literals.retain(|l| l.name() != name);
    }

    /// Disjunction of the current literal values. `False` is the identity of the fold, so the
    /// empty clause evaluates to `False`.
    pub fn evaluate(&self) -> Truth {
        self.literals
            .iter()
            .fold(Truth::False, |acc, l| acc.disjunction(l.value()))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(" \\/ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

/// A conjunction of clauses.
#[derive(Clone, Debug, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub(crate) fn clauses_mut(&mut self) -> impl Iterator<Item = &mut Clause> {
        self.clauses.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Conjunction of the clause values; the empty formula is `True`.
    pub fn evaluate(&self) -> Truth {
        self.clauses
            .iter()
            .fold(Truth::True, |acc, c| acc.conjunction(c.evaluate()))
    }

    /// The literal of the first unit clause, in formula order.
    pub fn find_unit_clause(&self) -> Option<&Literal> {
        self.clauses.iter().find_map(|c| c.unit_literal())
    }

    pub fn remove_clauses_containing(&mut self, name: &str) {
        self.clauses.retain(|c| !c.contains(name));
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|c| c.is_empty())
    }

    /// Every distinct literal object in the formula, in first-seen order. Two objects with the
    /// same name are both reported.
    pub fn collect_variables(&self) -> Vec<Literal> {
        let mut seen: Vec<Literal> = vec![];
        for literal in self.clauses.iter().flat_map(|c| c.literals()) {
            if !seen.iter().any(|s| s.ptr_eq(literal)) {
                seen.push(literal.clone());
            }
        }
        seen
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("(")?;
        let mut first = true;
        for clause in &self.clauses {
            if first {
                first = false;
            } else {
                f.write_str(") /\\ (")?;
            }
            write!(f, "{}", clause)?;
        }
        f.write_str(")")
    }
}

/// Random formulas over at most six variables, for checking the solver against brute force.
#[cfg(test)]
pub(crate) fn formula_strategy() -> impl proptest::strategy::Strategy<Value = Cnf> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 6;
    const MAX_CLAUSES: usize = 8;
    const MAX_CLAUSE_SIZE: usize = 4;

    (1..=MAX_VARS)
        .prop_flat_map(|num_vars| {
            let literal = (0..num_vars, any::<bool>());
            let clause = prop::collection::vec(literal, 1..=MAX_CLAUSE_SIZE);
            (Just(num_vars), prop::collection::vec(clause, 0..=MAX_CLAUSES))
        })
        .prop_map(|(num_vars, clauses)| {
            let variables: Vec<_> = (0..num_vars).map(|i| Literal::new(format!("x{}", i))).collect();
            Cnf::new(clauses.into_iter().map(|clause| {
                Clause::new(clause.into_iter().map(|(var, positive)| {
                    if positive {
                        variables[var].clone()
                    } else {
                        variables[var].negated()
                    }
                }))
            }))
        })
}

#[cfg(test)]
pub(crate) fn clause_names(clause: &Clause) -> Vec<&str> {
    clause.literals().map(|l| l.name()).collect()
}
