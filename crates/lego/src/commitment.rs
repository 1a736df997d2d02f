//! Generalized Pedersen commitment over the committable slice

use crate::{
    bases::{msm_g1, SharedBases},
    LegoError, LegoResult,
};
use ark_ec::{pairing::Pairing, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{
    rand::{CryptoRng, Rng},
    vec::Vec,
    UniformRand,
};

/// Commitment key: one independently sampled G1 base per committed scalar
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct CommitmentKey<E: Pairing> {
    bases: SharedBases<E::G1Affine>,
}

/// `cm = Σ ck[i]·opn[i]`. Binding, not hiding on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Commitment<E: Pairing>(pub E::G1Affine);

impl<E: Pairing> CommitmentKey<E> {
    /// Sample `size` bases. `size` may be zero.
    pub fn generate<R: Rng + CryptoRng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let bases: Vec<E::G1> = (0..size).map(|_| E::G1::rand(rng)).collect();
        Self {
            bases: E::G1::normalize_batch(&bases).into(),
        }
    }

    /// Commit to `opn`, which must have exactly `self.len()` entries
    pub fn commit(&self, opn: &[E::ScalarField]) -> LegoResult<Commitment<E>> {
        let cm = msm_g1::<E>(&self.bases, opn)
            .ok_or_else(|| LegoError::length("opening", self.len(), opn.len()))?;
        Ok(Commitment(cm.into_affine()))
    }

    /// `ck[i]`, one per committed scalar
    pub fn bases(&self) -> &[E::G1Affine] {
        &self.bases
    }

    /// Number of scalars this key commits to
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl<E: Pairing> Commitment<E> {
    /// The underlying group element
    pub fn into_affine(self) -> E::G1Affine {
        self.0
    }
}

/// Sample a commitment key for `opn_size` committed scalars
pub fn gen_ck<E, R>(opn_size: usize, rng: &mut R) -> CommitmentKey<E>
where
    E: Pairing,
    R: Rng + CryptoRng + ?Sized,
{
    CommitmentKey::generate(opn_size, rng)
}

/// Commit to `opn` under `ck`
pub fn commit<E: Pairing>(ck: &CommitmentKey<E>, opn: &[E::ScalarField]) -> LegoResult<Commitment<E>> {
    ck.commit(opn)
}
