//! Correction terms that move the committed slice out of the Groth16 input
//! and into a separately linked proof term.
//!
//! A strategy has two halves. On the prover side, [`CorrectionTerm::blind`]
//! builds the proof term `g_D` from the opening and fresh randomness `v`,
//! adjusting the base proof so that it still verifies with `g_D` in place of
//! the committed part of the prepared inputs. On the verifier side,
//! [`CorrectionTerm::fold`] turns `(cm, g_D)` into the G1 element that is
//! added to the public-input accumulation. For any strategy, the base proof
//! must verify against `x`-accumulation `+ fold(..)` iff it verified against
//! the unsplit primary input, and `g_D` must stay in the span of
//! `gamma_abc_g1_u ++ [eta_gamma_inv_g1]` so the linking key covers it.

use crate::{bases::msm_g1, commitment::Commitment, keys::KeyPair, LegoError, LegoResult};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_groth16::Proof as Groth16Proof;

pub trait CorrectionTerm<E: Pairing> {
    /// Build `g_D` for `opn` with blinding `v` and patch `proof` accordingly
    fn blind(
        kp: &KeyPair<E>,
        cm: &Commitment<E>,
        opn: &[E::ScalarField],
        v: E::ScalarField,
        proof: &mut Groth16Proof<E>,
    ) -> LegoResult<E::G1Affine>;

    /// The committed contribution to the prepared inputs
    fn fold(kp: &KeyPair<E>, cm: &Commitment<E>, g_d: &E::G1Affine) -> E::G1;
}

/// `g_D = Σ opn[i]·gamma_abc_u[i] + v·(η/γ)·G1` and `C' = C − v·(η/δ)·G1`.
///
/// The extra `v·η/γ` in the prepared inputs pairs with `γ` to `v·η`, which the
/// shifted `C` cancels against `δ`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EtaBlinding;

impl<E: Pairing> CorrectionTerm<E> for EtaBlinding {
    fn blind(
        kp: &KeyPair<E>,
        _cm: &Commitment<E>,
        opn: &[E::ScalarField],
        v: E::ScalarField,
        proof: &mut Groth16Proof<E>,
    ) -> LegoResult<E::G1Affine> {
        let committed = msm_g1::<E>(kp.gamma_abc_g1_u(), opn)
            .ok_or_else(|| LegoError::length("opening", kp.opn_size(), opn.len()))?;
        let g_d = committed + *kp.eta_gamma_inv_g1() * v;
        proof.c = (proof.c.into_group() - *kp.eta_delta_inv_g1() * v).into_affine();
        Ok(g_d.into_affine())
    }

    fn fold(_kp: &KeyPair<E>, _cm: &Commitment<E>, g_d: &E::G1Affine) -> E::G1 {
        g_d.into_group()
    }
}
