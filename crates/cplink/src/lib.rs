//! Commit-and-prove linking argument
//!
//! Proves that two group elements open to the same scalar vector under two
//! different bases. Given a commitment key `ck` (length `n`) and proof-term
//! bases `u` (length `n + 1`, the last one a blinding base), the statement is
//!
//! ```text
//! cm  = Σ opn[i]·ck[i]
//! g_D = Σ opn[i]·u[i] + v·u[n]
//! ```
//!
//! i.e. `(cm, g_D)` lies in the column span of
//!
//! ```text
//! M = | ck[0] .. ck[n-1]   0   |
//!     | u[0]  .. u[n-1]   u[n] |
//! ```
//!
//! This is a quasi-adaptive NIZK for linear subspaces with a single G1
//! element as proof (SXDH, `k = 1`): the key publishes `P = Mᵀ·(k0, k1)` in
//! G1 and `(k0·a, k1·a, a)` in G2, the proof is `π = Σ w_j·P_j` for the
//! witness `w = (opn, v)`, and the verifier checks
//! `e(cm, k0·a)·e(g_D, k1·a) = e(π, a)`.

#![forbid(unsafe_code)]

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, Group, VariableBaseMSM};
use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{
    iter,
    rand::{CryptoRng, Rng},
    vec::Vec,
};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Invalid length for {what}: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type LinkResult<T> = Result<T, LinkError>;

/// Public parameters of the linking argument for one `(ck, u)` pair
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct LinkKey<E: Pairing> {
    /// `P_j = k0·M[0][j] + k1·M[1][j]`, one base per witness coordinate
    p: Vec<E::G1Affine>,
    /// `k0·a`
    c_commitment: E::G2Affine,
    /// `k1·a`
    c_proof_term: E::G2Affine,
    a: E::G2Affine,
}

impl<E: Pairing> LinkKey<E> {
    /// Length of the committed vector this key links
    pub fn opn_size(&self) -> usize {
        self.p.len().saturating_sub(1)
    }

    pub fn prover_bases(&self) -> &[E::G1Affine] {
        &self.p
    }
}

/// A linking proof: one G1 element
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct LinkProof<E: Pairing>(pub E::G1Affine);

/// Generate a linking key for commitments under `ck` and proof terms under
/// `proof_bases`. The final entry of `proof_bases` is the blinding base.
#[tracing::instrument(skip_all, fields(opn_size = ck.len()))]
pub fn setup<E, R>(
    ck: &[E::G1Affine],
    proof_bases: &[E::G1Affine],
    rng: &mut R,
) -> LinkResult<LinkKey<E>>
where
    E: Pairing,
    R: Rng + CryptoRng + ?Sized,
{
    if proof_bases.len() != ck.len() + 1 {
        return Err(LinkError::InvalidLength {
            what: "proof-term bases",
            expected: ck.len() + 1,
            actual: proof_bases.len(),
        });
    }

    let k0 = E::ScalarField::rand(rng);
    let k1 = E::ScalarField::rand(rng);
    let a = E::ScalarField::rand(rng);

    // The blinding column has no commitment-key entry.
    let p: Vec<E::G1> = proof_bases
        .par_iter()
        .enumerate()
        .map(|(j, u)| {
            let top = ck.get(j).map_or_else(E::G1::zero, |g| *g * k0);
            top + *u * k1
        })
        .collect();

    let g2 = E::G2::generator();
    Ok(LinkKey {
        p: E::G1::normalize_batch(&p),
        c_commitment: (g2 * (k0 * a)).into_affine(),
        c_proof_term: (g2 * (k1 * a)).into_affine(),
        a: (g2 * a).into_affine(),
    })
}

/// Prove that the commitment to `opn` and the proof term built from
/// `(opn, randomness)` share the same opening.
pub fn prove<E: Pairing>(
    key: &LinkKey<E>,
    opn: &[E::ScalarField],
    randomness: E::ScalarField,
) -> LinkResult<LinkProof<E>> {
    if opn.len() != key.opn_size() || key.p.is_empty() {
        return Err(LinkError::InvalidLength {
            what: "opening",
            expected: key.opn_size(),
            actual: opn.len(),
        });
    }

    let witness: Vec<E::ScalarField> = opn.iter().copied().chain(iter::once(randomness)).collect();
    let pi = E::G1::msm(&key.p, &witness).map_err(|actual| LinkError::InvalidLength {
        what: "witness",
        expected: key.p.len(),
        actual,
    })?;
    Ok(LinkProof(pi.into_affine()))
}

/// Check `e(cm, k0·a)·e(g_D, k1·a) = e(π, a)`
pub fn verify<E: Pairing>(
    key: &LinkKey<E>,
    commitment: &E::G1Affine,
    proof_term: &E::G1Affine,
    proof: &LinkProof<E>,
) -> bool {
    let neg_pi = (-proof.0.into_group()).into_affine();
    E::multi_pairing(
        [*commitment, *proof_term, neg_pi],
        [key.c_commitment, key.c_proof_term, key.a],
    )
    .is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective};
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    type E = Bls12_381;

    fn test_rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0x11c)
    }

    struct Instance {
        ck: Vec<G1Affine>,
        bases: Vec<G1Affine>,
        key: LinkKey<E>,
    }

    fn random_points(n: usize, rng: &mut impl Rng) -> Vec<G1Affine> {
        let points: Vec<G1Projective> = (0..n).map(|_| G1Projective::rand(rng)).collect();
        G1Projective::normalize_batch(&points)
    }

    fn instance(n: usize, rng: &mut (impl Rng + CryptoRng)) -> Instance {
        let ck = random_points(n, rng);
        let bases = random_points(n + 1, rng);
        let key = setup::<E, _>(&ck, &bases, rng).unwrap();
        Instance { ck, bases, key }
    }

    fn open(bases: &[G1Affine], scalars: &[Fr]) -> G1Affine {
        G1Projective::msm(&bases[..scalars.len()], scalars).unwrap().into_affine()
    }

    #[test]
    fn test_link_completeness() {
        let mut rng = test_rng();
        let inst = instance(3, &mut rng);
        let opn: Vec<Fr> = (0..3).map(|_| Fr::rand(&mut rng)).collect();
        let v = Fr::rand(&mut rng);

        let cm = open(&inst.ck, &opn);
        let mut witness = opn.clone();
        witness.push(v);
        let g_d = open(&inst.bases, &witness);

        let proof = prove(&inst.key, &opn, v).unwrap();
        assert!(verify(&inst.key, &cm, &g_d, &proof));
    }

    #[test]
    fn test_link_rejects_mismatched_openings() {
        let mut rng = test_rng();
        let inst = instance(2, &mut rng);
        let opn = vec![Fr::from(5u64), Fr::from(9u64)];
        let other = vec![Fr::from(5u64), Fr::from(10u64)];
        let v = Fr::rand(&mut rng);

        let cm = open(&inst.ck, &other);
        let g_d = open(&inst.bases, &[opn[0], opn[1], v]);
        let proof = prove(&inst.key, &opn, v).unwrap();
        assert!(!verify(&inst.key, &cm, &g_d, &proof));

        let proof = prove(&inst.key, &other, v).unwrap();
        assert!(!verify(&inst.key, &cm, &g_d, &proof));
    }

    #[test]
    fn test_link_rejects_wrong_randomness() {
        let mut rng = test_rng();
        let inst = instance(2, &mut rng);
        let opn = vec![Fr::from(1u64), Fr::from(2u64)];
        let v = Fr::rand(&mut rng);

        let cm = open(&inst.ck, &opn);
        let g_d = open(&inst.bases, &[opn[0], opn[1], v]);
        let proof = prove(&inst.key, &opn, v + Fr::from(1u64)).unwrap();
        assert!(!verify(&inst.key, &cm, &g_d, &proof));
    }

    #[test]
    fn test_link_empty_opening() {
        let mut rng = test_rng();
        let inst = instance(0, &mut rng);
        let v = Fr::rand(&mut rng);

        let cm = G1Affine::zero();
        let g_d = (inst.bases[0] * v).into_affine();
        let proof = prove(&inst.key, &[], v).unwrap();
        assert_eq!(inst.key.opn_size(), 0);
        assert!(verify(&inst.key, &cm, &g_d, &proof));
    }

    #[test]
    fn test_link_length_checks() {
        let mut rng = test_rng();
        let ck = random_points(2, &mut rng);
        let bases = random_points(2, &mut rng);
        assert_eq!(
            setup::<E, _>(&ck, &bases, &mut rng).unwrap_err(),
            LinkError::InvalidLength { what: "proof-term bases", expected: 3, actual: 2 }
        );

        let inst = instance(2, &mut rng);
        assert!(prove(&inst.key, &[Fr::from(1u64)], Fr::from(2u64)).is_err());
    }

    #[test]
    fn test_link_key_reload() {
        let mut rng = test_rng();
        let inst = instance(4, &mut rng);
        let mut bytes = Vec::new();
        inst.key.serialize_compressed(&mut bytes).unwrap();
        let reloaded = LinkKey::<E>::deserialize_compressed(bytes.as_slice()).unwrap();
        assert_eq!(reloaded, inst.key);
        assert_eq!(reloaded.prover_bases().len(), 5);
    }
}
