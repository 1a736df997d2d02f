//! Sparse linear combinations over the variable assignment

use crate::Variable;
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{fmt, vec::Vec};

/// A term in a linear combination: coefficient * variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Term<F: Field> {
    pub coefficient: F,
    pub variable: Variable,
}

impl<F: Field> Term<F> {
    pub fn new(coefficient: F, variable: Variable) -> Self {
        Self { coefficient, variable }
    }
}

/// A linear combination of variables: c1*v1 + c2*v2 + ... + cn*vn
///
/// Terms are kept in insertion order and may repeat a variable; evaluation
/// simply sums them.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct LinearCombination<F: Field> {
    pub terms: Vec<Term<F>>,
}

impl<F: Field> LinearCombination<F> {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn from_variable(variable: Variable) -> Self {
        Self {
            terms: vec![Term::new(F::one(), variable)],
        }
    }

    pub fn from_constant(constant: F) -> Self {
        Self {
            terms: vec![Term::new(constant, Variable::ONE)],
        }
    }

    /// Builder-style term push
    pub fn with_term(mut self, coefficient: F, variable: Variable) -> Self {
        self.add_term(coefficient, variable);
        self
    }

    pub fn add_term(&mut self, coefficient: F, variable: Variable) {
        self.terms.push(Term::new(coefficient, variable));
    }

    /// Evaluate against a full assignment. Returns `None` if a term points
    /// past the end of `assignment`.
    pub fn evaluate(&self, assignment: &[F]) -> Option<F> {
        self.terms.iter().try_fold(F::zero(), |acc, term| {
            assignment
                .get(term.variable.index)
                .map(|value| acc + term.coefficient * value)
        })
    }

    /// Largest variable index referenced, if any
    pub fn max_index(&self) -> Option<usize> {
        self.terms.iter().map(|term| term.variable.index).max()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<F: Field> Default for LinearCombination<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> fmt::Display for LinearCombination<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", term.coefficient, term.variable)?;
        }
        Ok(())
    }
}

impl<F: Field> std::ops::Add for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self.terms.extend_from_slice(&other.terms);
        self
    }
}
