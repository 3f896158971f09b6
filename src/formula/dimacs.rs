use crate::formula::{Clause, Cnf, Literal};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads a formula in DIMACS CNF format. Variable `n` becomes the literal `x<n>`; every
/// occurrence of the same signed variable shares one literal object.
pub fn parse<R: Read>(reader: R) -> Result<Cnf, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut formula = Cnf::default();
    let mut variables = Variables::default();
    let mut num_clauses = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                let expected = num_clauses
                    .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(variables.literal(l)),
                        None => break,
                    }
                }
                if !clause.is_empty() {
                    formula.push(Clause::new(clause));
                }

                if formula.len() >= expected {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }

    log::debug!(
        "parsed {} clauses over {} variables",
        formula.len(),
        variables.polarities.len()
    );
    Ok(formula)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<isize>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    Ok(if l == 0 { None } else { Some(l) })
}

/// Positive and negative literal objects for each variable seen so far.
#[derive(Default)]
struct Variables {
    polarities: HashMap<usize, (Literal, Literal)>,
}

impl Variables {
    fn literal(&mut self, l: isize) -> Literal {
        let (positive, negative) = self
            .polarities
            .entry(l.unsigned_abs())
            .or_insert_with(|| {
                let positive = Literal::new(format!("x{}", l.unsigned_abs()));
                let negative = positive.negated();
                (positive, negative)
            });
        if l > 0 {
            positive.clone()
        } else {
            negative.clone()
        }
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for DimacsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "format error: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {}
