//! DIMACS CNF reading and writing.
//!
//! The reader is deliberately loose where the format allows it: the two
//! leading header tokens are ignored, whitespace is arbitrary and comment
//! lines are skipped. It is strict about the rest: the header must carry two
//! counts, every literal must be an integer, and exactly as many 0-terminated
//! clauses as announced must be present.

use thiserror::Error;

/// Errors for malformed DIMACS input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing `p cnf <vars> <clauses>` header")]
    MissingHeader,

    #[error("invalid header field {field:?}")]
    InvalidHeader { field: String },

    #[error("invalid literal {token:?}")]
    InvalidLiteral { token: String },

    #[error("unexpected end of input inside clause {clause} of {expected}")]
    UnexpectedEnd { clause: usize, expected: usize },
}

/// A parsed CNF instance: the declared variable count and the clauses as
/// signed integers, exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub num_vars: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl Formula {
    pub fn parse(input: &str) -> Result<Formula, ParseError> {
        let mut tokens = input
            .lines()
            .filter(|line| !line.trim_start().starts_with('c'))
            .flat_map(str::split_whitespace);

        // conventionally `p cnf`; only their presence matters
        for _ in 0..2 {
            tokens.next().ok_or(ParseError::MissingHeader)?;
        }
        let num_vars = header_count(tokens.next())?;
        let num_clauses = header_count(tokens.next())?;

        let mut clauses = Vec::with_capacity(num_clauses);
        for clause in 0..num_clauses {
            let mut lits = Vec::new();
            loop {
                let token = tokens.next().ok_or(ParseError::UnexpectedEnd {
                    clause: clause + 1,
                    expected: num_clauses,
                })?;
                let lit: i32 = token.parse().map_err(|_| ParseError::InvalidLiteral {
                    token: token.to_string(),
                })?;
                if lit == 0 {
                    break;
                }
                lits.push(lit);
            }
            clauses.push(lits);
        }

        Ok(Formula { num_vars, clauses })
    }

    /// Serialise back to DIMACS, one clause per line.
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for cls in &self.clauses {
            for lit in cls {
                out.push_str(&lit.to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }
}

fn header_count(token: Option<&str>) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::MissingHeader)?;
    token.parse().map_err(|_| ParseError::InvalidHeader {
        field: token.to_string(),
    })
}
