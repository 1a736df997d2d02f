//! `prv(ek, x, cm, opn, omega) -> π`

use crate::{
    commitment::Commitment,
    correction::{CorrectionTerm, EtaBlinding},
    keys::KeyPair,
    snark, LegoError, LegoResult,
};
use ark_ec::pairing::Pairing;
use ark_ff::UniformRand;
use ark_groth16::Proof as Groth16Proof;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use cplink::LinkProof;

/// A LegoGroth16 proof: a Groth16 proof with its `C` shifted by the
/// correction, the proof term `g_D` standing in for the committed inputs, and
/// the linking proof tying `g_D` to the external commitment.
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<E: Pairing> {
    pub gro16prf: Groth16Proof<E>,
    pub g_d: E::G1Affine,
    pub lnk_prf: LinkProof<E>,
}

/// Prove with the default [`EtaBlinding`] correction
pub fn prv<E, R>(
    kp: &KeyPair<E>,
    x: &[E::ScalarField],
    cm: &Commitment<E>,
    opn: &[E::ScalarField],
    omega: &[E::ScalarField],
    rng: &mut R,
) -> LegoResult<Proof<E>>
where
    E: Pairing,
    R: Rng + CryptoRng,
{
    prove_with::<E, EtaBlinding, R>(kp, x, cm, opn, omega, rng)
}

/// Prove that `(x ++ opn, omega)` satisfies the constraint system and that
/// `opn` is the opening of `cm`.
///
/// `cm` is expected to equal `commit(kp.ck(), opn)`; if it does not, the
/// proof is produced but will not verify. Each call draws fresh blinding
/// randomness, so proving twice yields different proofs.
#[tracing::instrument(
    name = "LegoGroth16 prover",
    skip_all,
    fields(x_size = x.len(), opn_size = opn.len())
)]
pub fn prove_with<E, C, R>(
    kp: &KeyPair<E>,
    x: &[E::ScalarField],
    cm: &Commitment<E>,
    opn: &[E::ScalarField],
    omega: &[E::ScalarField],
    rng: &mut R,
) -> LegoResult<Proof<E>>
where
    E: Pairing,
    C: CorrectionTerm<E>,
    R: Rng + CryptoRng,
{
    let cs = kp.cs();
    let primary = cs.primary_input(x, opn)?;
    let aux_size = cs.r1cs().auxiliary_input_size();
    if omega.len() != aux_size {
        return Err(LegoError::length("auxiliary input", aux_size, omega.len()));
    }

    let mut gro16prf = snark::prove(kp.gro16pk(), cs.r1cs(), &primary, omega, rng)?;

    let v = E::ScalarField::rand(rng);
    let g_d = {
        let _span = tracing::debug_span!("Proof term").entered();
        C::blind(kp, cm, opn, v, &mut gro16prf)?
    };

    let lnk_prf = {
        let _span = tracing::debug_span!("Linking proof").entered();
        cplink::prove(kp.lnk_key(), opn, v).map_err(LegoError::proving)?
    };

    Ok(Proof {
        gro16prf,
        g_d,
        lnk_prf,
    })
}
