//! R1CS constraint representation

use crate::LinearCombination;
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt;

/// An R1CS constraint: <A, z> * <B, z> = <C, z>
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Constraint<F: Field> {
    pub a: LinearCombination<F>,
    pub b: LinearCombination<F>,
    pub c: LinearCombination<F>,
}

impl<F: Field> Constraint<F> {
    pub fn new(a: LinearCombination<F>, b: LinearCombination<F>, c: LinearCombination<F>) -> Self {
        Self { a, b, c }
    }

    /// Check the constraint against a full assignment `[1, primary.., auxiliary..]`.
    /// An assignment that is too short never satisfies.
    pub fn is_satisfied(&self, assignment: &[F]) -> bool {
        match (
            self.a.evaluate(assignment),
            self.b.evaluate(assignment),
            self.c.evaluate(assignment),
        ) {
            (Some(a), Some(b), Some(c)) => a * b == c,
            _ => false,
        }
    }

    pub(crate) fn max_index(&self) -> Option<usize> {
        [self.a.max_index(), self.b.max_index(), self.c.max_index()]
            .into_iter()
            .flatten()
            .max()
    }
}

impl<F: Field> fmt::Display for Constraint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) * ({}) = ({})", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variable;
    use ark_bls12_381::Fr;

    #[test]
    fn test_constraint_satisfaction() {
        // (x + y) * 1 = z
        let a = LinearCombination::<Fr>::from_variable(Variable::new(1))
            .with_term(Fr::from(1u64), Variable::new(2));
        let b = LinearCombination::from_variable(Variable::ONE);
        let c = LinearCombination::from_variable(Variable::new(3));
        let constraint = Constraint::new(a, b, c);

        let good = vec![Fr::from(1u64), Fr::from(3u64), Fr::from(4u64), Fr::from(7u64)];
        assert!(constraint.is_satisfied(&good));

        let bad = vec![Fr::from(1u64), Fr::from(3u64), Fr::from(4u64), Fr::from(12u64)];
        assert!(!constraint.is_satisfied(&bad));

        assert!(!constraint.is_satisfied(&good[..3]));
        assert_eq!(constraint.max_index(), Some(3));
    }
}
