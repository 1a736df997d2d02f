//! Shared, read-only vectors of group elements

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_ec::{pairing::Pairing, VariableBaseMSM};
use ark_std::{vec::Vec, Zero};
use std::{ops::Deref, sync::Arc};

/// An immutable vector of bases shared between key pairs and proofs.
///
/// Cloning shares the allocation. There is no way to mutate the elements once
/// built. The encoding matches `Vec<G>`: a `u64` length followed by the
/// elements in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedBases<G>(Arc<[G]>);

impl<G> SharedBases<G> {
    pub fn as_slice(&self) -> &[G] {
        &self.0
    }
}

impl<G> Deref for SharedBases<G> {
    type Target = [G];

    fn deref(&self) -> &[G] {
        &self.0
    }
}

impl<G> From<Vec<G>> for SharedBases<G> {
    fn from(points: Vec<G>) -> Self {
        Self(points.into())
    }
}

impl<G: CanonicalSerialize> CanonicalSerialize for SharedBases<G> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        (self.0.len() as u64).serialize_with_mode(&mut writer, compress)?;
        for point in self.0.iter() {
            point.serialize_with_mode(&mut writer, compress)?;
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.0
            .iter()
            .map(|point| point.serialized_size(compress))
            .sum::<usize>()
            + (self.0.len() as u64).serialized_size(compress)
    }
}

impl<G: Valid + Send> Valid for SharedBases<G> {
    fn check(&self) -> Result<(), SerializationError> {
        self.0.iter().try_for_each(Valid::check)
    }
}

impl<G: CanonicalDeserialize + Send> CanonicalDeserialize for SharedBases<G> {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        Vec::<G>::deserialize_with_mode(reader, compress, validate).map(Self::from)
    }
}

/// `Σ bases[i]·scalars[i]` in G1; `None` on a length mismatch, the identity
/// for empty input.
pub(crate) fn msm_g1<E: Pairing>(
    bases: &[E::G1Affine],
    scalars: &[E::ScalarField],
) -> Option<E::G1> {
    if bases.len() != scalars.len() {
        return None;
    }
    if bases.is_empty() {
        return Some(E::G1::zero());
    }
    E::G1::msm(bases, scalars).ok()
}
