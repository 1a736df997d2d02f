//! Constraint system with a public/committable split of the primary input

use crate::{LegoError, LegoResult};
use ark_ff::Field;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::vec::Vec;
use r1cs::R1CS;
use std::sync::Arc;

/// An R1CS whose primary input is laid out as `x ++ opn`: the first
/// `x_size()` entries are revealed to the verifier, the last
/// `opn_size() = comm_input_size` entries are bound to an external commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegoConstraintSystem<F: Field> {
    cs: Arc<R1CS<F>>,
    comm_input_size: usize,
}

impl<F: Field> LegoConstraintSystem<F> {
    pub fn new(cs: R1CS<F>, comm_input_size: usize) -> LegoResult<Self> {
        if comm_input_size > cs.primary_input_size() {
            return Err(LegoError::InconsistentPartition(format!(
                "committable input size {} exceeds primary input size {}",
                comm_input_size,
                cs.primary_input_size()
            )));
        }
        Ok(Self {
            cs: Arc::new(cs),
            comm_input_size,
        })
    }

    pub fn r1cs(&self) -> &R1CS<F> {
        &self.cs
    }

    pub fn comm_input_size(&self) -> usize {
        self.comm_input_size
    }

    pub fn primary_input_size(&self) -> usize {
        self.cs.primary_input_size()
    }

    pub fn x_size(&self) -> usize {
        self.cs.primary_input_size() - self.comm_input_size
    }

    pub fn opn_size(&self) -> usize {
        self.comm_input_size
    }

    /// Concatenate `x ++ opn` into the full primary input
    pub fn primary_input(&self, x: &[F], opn: &[F]) -> LegoResult<Vec<F>> {
        if x.len() != self.x_size() {
            return Err(LegoError::length("public input", self.x_size(), x.len()));
        }
        if opn.len() != self.opn_size() {
            return Err(LegoError::length("opening", self.opn_size(), opn.len()));
        }
        Ok(x.iter().chain(opn).copied().collect())
    }

    /// Split a full primary input back into `(x, opn)`
    pub fn split_primary_input<'a>(&self, primary: &'a [F]) -> LegoResult<(&'a [F], &'a [F])> {
        if primary.len() != self.primary_input_size() {
            return Err(LegoError::length(
                "primary input",
                self.primary_input_size(),
                primary.len(),
            ));
        }
        Ok(primary.split_at(self.x_size()))
    }
}

impl<F: Field> CanonicalSerialize for LegoConstraintSystem<F> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.cs.serialize_with_mode(&mut writer, compress)?;
        self.comm_input_size.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.cs.serialized_size(compress) + self.comm_input_size.serialized_size(compress)
    }
}

impl<F: Field> Valid for LegoConstraintSystem<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.cs.check()?;
        if self.comm_input_size > self.cs.primary_input_size() {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl<F: Field> CanonicalDeserialize for LegoConstraintSystem<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let cs = R1CS::deserialize_with_mode(&mut reader, compress, validate)?;
        let comm_input_size = usize::deserialize_with_mode(&mut reader, compress, validate)?;
        Self::new(cs, comm_input_size).map_err(|_| SerializationError::InvalidData)
    }
}
