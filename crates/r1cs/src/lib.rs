//! R1CS (Rank-1 Constraint System) with a primary/auxiliary input split
//!
//! Constraints have the form `<A, z> * <B, z> = <C, z>` over the full
//! assignment `z = [1, primary.., auxiliary..]`. Primary inputs are the
//! statement a proof system exposes; auxiliary inputs are the private witness.

#![forbid(unsafe_code)]

pub mod constraint;
pub mod example;
pub mod linear_combination;
pub mod variable;

pub use constraint::*;
pub use example::*;
pub use linear_combination::*;
pub use variable::*;

use ark_ff::Field;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use ark_std::vec::Vec;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum R1CSError {
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),
    #[error("Variable out of bounds: {0}")]
    VariableOutOfBounds(usize),
    #[error("Primary inputs must be allocated before auxiliary variables")]
    PrimaryAfterAuxiliary,
    #[error("Assignment length mismatch: expected {expected} {kind} values, got {actual}")]
    AssignmentLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid example parameters: {0}")]
    InvalidExample(String),
}

/// R1CS constraint system.
///
/// Deserialization re-checks that every constraint stays within the declared
/// variables and that the primary inputs fit.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct R1CS<F: Field> {
    /// Number of variables, including the constant one
    num_variables: usize,
    /// Number of primary (public) input variables
    primary_input_size: usize,
    constraints: Vec<Constraint<F>>,
}

impl<F: Field> R1CS<F> {
    pub fn new() -> Self {
        Self {
            num_variables: 1,
            primary_input_size: 0,
            constraints: Vec::new(),
        }
    }

    /// Allocate an auxiliary (witness) variable
    pub fn alloc_variable(&mut self) -> Variable {
        let var = Variable::new(self.num_variables);
        self.num_variables += 1;
        var
    }

    /// Allocate a primary input. Primary inputs occupy a contiguous prefix of
    /// the assignment, so this fails once an auxiliary variable exists.
    pub fn alloc_public_input(&mut self) -> Result<Variable, R1CSError> {
        if self.auxiliary_input_size() != 0 {
            return Err(R1CSError::PrimaryAfterAuxiliary);
        }
        let var = self.alloc_variable();
        self.primary_input_size += 1;
        Ok(var)
    }

    pub fn add_constraint(
        &mut self,
        a: LinearCombination<F>,
        b: LinearCombination<F>,
        c: LinearCombination<F>,
    ) -> Result<(), R1CSError> {
        let constraint = Constraint::new(a, b, c);
        if let Some(index) = constraint.max_index() {
            if index >= self.num_variables {
                return Err(R1CSError::VariableOutOfBounds(index));
            }
        }

        self.constraints.push(constraint);
        Ok(())
    }

    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of variables including the constant one
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn primary_input_size(&self) -> usize {
        self.primary_input_size
    }

    pub fn auxiliary_input_size(&self) -> usize {
        self.num_variables - 1 - self.primary_input_size
    }

    /// Assemble `[1, primary.., auxiliary..]`, checking both lengths.
    pub fn full_assignment(&self, primary: &[F], auxiliary: &[F]) -> Result<Vec<F>, R1CSError> {
        if primary.len() != self.primary_input_size {
            return Err(R1CSError::AssignmentLength {
                kind: "primary",
                expected: self.primary_input_size,
                actual: primary.len(),
            });
        }
        if auxiliary.len() != self.auxiliary_input_size() {
            return Err(R1CSError::AssignmentLength {
                kind: "auxiliary",
                expected: self.auxiliary_input_size(),
                actual: auxiliary.len(),
            });
        }

        let mut assignment = Vec::with_capacity(self.num_variables);
        assignment.push(F::one());
        assignment.extend_from_slice(primary);
        assignment.extend_from_slice(auxiliary);
        Ok(assignment)
    }

    /// Check that `(primary, auxiliary)` satisfies every constraint
    pub fn is_satisfied(&self, primary: &[F], auxiliary: &[F]) -> Result<bool, R1CSError> {
        let assignment = self.full_assignment(primary, auxiliary)?;
        Ok(self.constraints.iter().all(|c| c.is_satisfied(&assignment)))
    }

    /// Index of the first constraint violated by the assignment, if any
    pub fn first_unsatisfied(&self, primary: &[F], auxiliary: &[F]) -> Result<Option<usize>, R1CSError> {
        let assignment = self.full_assignment(primary, auxiliary)?;
        Ok(self.constraints.iter().position(|c| !c.is_satisfied(&assignment)))
    }

    pub fn one() -> LinearCombination<F> {
        LinearCombination::from_variable(Variable::ONE)
    }
}

impl<F: Field> Default for R1CS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> Valid for R1CS<F> {
    fn check(&self) -> Result<(), SerializationError> {
        if self.num_variables == 0 || self.primary_input_size >= self.num_variables {
            return Err(SerializationError::InvalidData);
        }
        let out_of_bounds = self
            .constraints
            .iter()
            .filter_map(Constraint::max_index)
            .any(|index| index >= self.num_variables);
        if out_of_bounds {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl<F: Field> CanonicalDeserialize for R1CS<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let num_variables = usize::deserialize_with_mode(&mut reader, compress, validate)?;
        let primary_input_size = usize::deserialize_with_mode(&mut reader, compress, validate)?;
        let constraints = Vec::<Constraint<F>>::deserialize_with_mode(&mut reader, compress, validate)?;
        let cs = Self {
            num_variables,
            primary_input_size,
            constraints,
        };
        if let Validate::Yes = validate {
            cs.check()?;
        }
        Ok(cs)
    }
}
