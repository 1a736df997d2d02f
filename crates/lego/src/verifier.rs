//! `vfy(vk, x, cm, π) -> bool`

use crate::{
    bases::msm_g1,
    commitment::Commitment,
    correction::{CorrectionTerm, EtaBlinding},
    keys::KeyPair,
    prover::Proof,
    snark,
};
use ark_ec::pairing::Pairing;

/// Verify with the default [`EtaBlinding`] correction
pub fn vfy<E: Pairing>(
    kp: &KeyPair<E>,
    x: &[E::ScalarField],
    cm: &Commitment<E>,
    prf: &Proof<E>,
) -> bool {
    verify_with::<E, EtaBlinding>(kp, x, cm, prf)
}

/// Accept iff the base proof verifies against `x` and the proof term, and the
/// linking proof ties the proof term to `cm`.
///
/// Malformed input (a public input of the wrong length) is a rejection, not
/// an error.
#[tracing::instrument(name = "LegoGroth16 verifier", skip_all, fields(x_size = x.len()))]
pub fn verify_with<E, C>(
    kp: &KeyPair<E>,
    x: &[E::ScalarField],
    cm: &Commitment<E>,
    prf: &Proof<E>,
) -> bool
where
    E: Pairing,
    C: CorrectionTerm<E>,
{
    if x.len() != kp.x_size() {
        tracing::warn!(expected = kp.x_size(), actual = x.len(), "public input length mismatch");
        return false;
    }
    let Some((one, x_bases)) = kp.gamma_abc_g1_x().split_first() else {
        return false;
    };
    let Some(x_acc) = msm_g1::<E>(x_bases, x) else {
        return false;
    };

    let prepared_inputs = x_acc + *one + C::fold(kp, cm, &prf.g_d);
    if !snark::verify_with_prepared_inputs(kp.gro16pvk(), &prf.gro16prf, &prepared_inputs) {
        tracing::debug!("base proof rejected");
        return false;
    }

    if !cplink::verify(kp.lnk_key(), &cm.0, &prf.g_d, &prf.lnk_prf) {
        tracing::debug!("linking proof rejected");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commitment::{commit, gen_ck},
        constraint_system::LegoConstraintSystem,
        keys::{kg, KeyMaterial},
        prover::prv,
        LegoError,
    };
    use ark_bls12_381::{Bls12_381, Fr, G1Affine, G2Affine};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use crate::test_rng;
    use ark_std::UniformRand;
    use cplink::LinkProof;
    use proptest::prelude::*;
    use r1cs::generate_r1cs_example_with_field_input;
    use std::sync::OnceLock;

    type E = Bls12_381;

    struct Fixture {
        kp: KeyPair<E>,
        x: Vec<Fr>,
        opn: Vec<Fr>,
        omega: Vec<Fr>,
        cm: Commitment<E>,
        proof: Proof<E>,
    }

    fn fixture(num_constraints: usize, primary: usize, comm: usize) -> Fixture {
        let mut rng = test_rng();
        let example = generate_r1cs_example_with_field_input::<Fr, _>(num_constraints, primary, &mut rng).unwrap();
        let cs = LegoConstraintSystem::new(example.constraint_system, comm).unwrap();
        let (x, opn) = cs.split_primary_input(&example.primary_input).unwrap();
        let (x, opn) = (x.to_vec(), opn.to_vec());

        let ck = gen_ck::<E, _>(comm, &mut rng);
        let cm = commit(&ck, &opn).unwrap();
        let kp = kg(&ck, &cs, &mut rng).unwrap();
        let proof = prv(&kp, &x, &cm, &opn, &example.auxiliary_input, &mut rng).unwrap();
        Fixture {
            kp,
            x,
            opn,
            omega: example.auxiliary_input,
            cm,
            proof,
        }
    }

    fn shared() -> &'static Fixture {
        static FIXTURE: OnceLock<Fixture> = OnceLock::new();
        FIXTURE.get_or_init(|| fixture(10, 4, 2))
    }

    fn bump_g1(p: G1Affine) -> G1Affine {
        shift_g1(p, Fr::from(1u64))
    }

    fn bump_g2(p: G2Affine) -> G2Affine {
        (p.into_group() + G2Affine::generator()).into_affine()
    }

    fn shift_g1(p: G1Affine, k: Fr) -> G1Affine {
        (p.into_group() + G1Affine::generator() * k).into_affine()
    }

    #[test]
    fn test_completeness() {
        let f = shared();
        assert!(vfy(&f.kp, &f.x, &f.cm, &f.proof));
    }

    #[test]
    fn test_wrong_commitment_rejected() {
        let f = shared();
        let mut opn = f.opn.clone();
        opn[0] += Fr::from(1u64);
        let other = f.kp.ck().commit(&opn).unwrap();
        assert!(!vfy(&f.kp, &f.x, &other, &f.proof));
    }

    #[test]
    fn test_wrong_public_input_rejected() {
        let f = shared();
        let mut x = f.x.clone();
        x[1] += Fr::from(1u64);
        assert!(!vfy(&f.kp, &x, &f.cm, &f.proof));
        assert!(!vfy(&f.kp, &f.x[..1], &f.cm, &f.proof));
    }

    #[test]
    fn test_perturbed_proof_rejected() {
        let f = shared();
        let perturbations: [fn(&mut Proof<E>); 5] = [
            |p| p.gro16prf.a = bump_g1(p.gro16prf.a),
            |p| p.gro16prf.b = bump_g2(p.gro16prf.b),
            |p| p.gro16prf.c = bump_g1(p.gro16prf.c),
            |p| p.g_d = bump_g1(p.g_d),
            |p| p.lnk_prf = LinkProof(bump_g1(p.lnk_prf.0)),
        ];
        for perturb in perturbations {
            let mut proof = f.proof.clone();
            perturb(&mut proof);
            assert!(!vfy(&f.kp, &f.x, &f.cm, &proof));
        }
    }

    #[test]
    fn test_proofs_are_rerandomized() {
        let f = shared();
        let mut rng = test_rng();
        let again = prv(&f.kp, &f.x, &f.cm, &f.opn, &f.omega, &mut rng).unwrap();
        assert!(vfy(&f.kp, &f.x, &f.cm, &again));
        assert_ne!(again.g_d, f.proof.g_d);
        assert_ne!(again.lnk_prf, f.proof.lnk_prf);
    }

    #[test]
    fn test_proof_size_is_constant() {
        let small = shared();
        let large = fixture(20, 8, 6);
        assert!(vfy(&large.kp, &large.x, &large.cm, &large.proof));
        assert_eq!(small.proof.compressed_size(), large.proof.compressed_size());
        assert_eq!(small.proof.uncompressed_size(), large.proof.uncompressed_size());
    }

    #[test]
    fn test_nothing_committed() {
        let f = fixture(10, 4, 0);
        assert!(f.opn.is_empty());
        assert!(vfy(&f.kp, &f.x, &f.cm, &f.proof));
        let mut x = f.x.clone();
        x[0] += Fr::from(1u64);
        assert!(!vfy(&f.kp, &x, &f.cm, &f.proof));
    }

    #[test]
    fn test_everything_committed() {
        let f = fixture(10, 4, 4);
        assert!(f.x.is_empty());
        assert!(vfy(&f.kp, &[], &f.cm, &f.proof));
        let mut opn = f.opn.clone();
        opn[3] += Fr::from(1u64);
        let other = f.kp.ck().commit(&opn).unwrap();
        assert!(!vfy(&f.kp, &[], &other, &f.proof));
    }

    #[test]
    fn test_reloaded_keys_and_proof_verify() {
        let f = shared();

        let mut key_bytes = Vec::new();
        f.kp.material().serialize_compressed(&mut key_bytes).unwrap();
        let kp = KeyMaterial::<E>::deserialize_compressed(key_bytes.as_slice())
            .unwrap()
            .preprocess()
            .unwrap();

        let mut proof_bytes = Vec::new();
        f.proof.serialize_compressed(&mut proof_bytes).unwrap();
        let proof = Proof::<E>::deserialize_compressed(proof_bytes.as_slice()).unwrap();

        assert_eq!(proof, f.proof);
        assert!(vfy(&kp, &f.x, &f.cm, &proof));

        let mut x = f.x.clone();
        x[0] += Fr::from(1u64);
        assert_eq!(vfy(&kp, &x, &f.cm, &proof), vfy(&f.kp, &x, &f.cm, &proof));
    }

    #[test]
    fn test_prover_rejects_bad_lengths() {
        let f = shared();
        let mut rng = test_rng();

        let err = prv(&f.kp, &f.x[..1], &f.cm, &f.opn, &f.omega, &mut rng).unwrap_err();
        assert!(matches!(err, LegoError::InvalidLength { what: "public input", .. }));

        let err = prv(&f.kp, &f.x, &f.cm, &f.opn[..1], &f.omega, &mut rng).unwrap_err();
        assert!(matches!(err, LegoError::InvalidLength { what: "opening", .. }));

        let err = prv(&f.kp, &f.x, &f.cm, &f.opn, &f.omega[1..], &mut rng).unwrap_err();
        assert!(matches!(err, LegoError::InvalidLength { what: "auxiliary input", .. }));
    }

    #[test]
    fn test_prover_rejects_unsatisfied_witness() {
        let f = shared();
        let mut rng = test_rng();
        let mut omega = f.omega.clone();
        omega[0] += Fr::from(1u64);
        let err = prv(&f.kp, &f.x, &f.cm, &f.opn, &omega, &mut rng).unwrap_err();
        assert!(matches!(err, LegoError::ProofGenerationFailure(_)));
    }

    #[test]
    fn test_commitment_to_other_opening_rejected() {
        // A proof for one opening does not verify against a commitment whose
        // opening differs, even when the statement itself is satisfiable.
        let f = shared();
        let mut rng = test_rng();
        let opn: Vec<Fr> = (0..f.opn.len()).map(|_| Fr::rand(&mut rng)).collect();
        let cm = f.kp.ck().commit(&opn).unwrap();
        let proof = prv(&f.kp, &f.x, &cm, &f.opn, &f.omega, &mut rng).unwrap();
        assert!(!vfy(&f.kp, &f.x, &cm, &proof));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn test_any_public_input_change_rejected(index in 0usize..2, delta in 1u64..) {
            let f = shared();
            let mut x = f.x.clone();
            x[index] += Fr::from(delta);
            prop_assert!(!vfy(&f.kp, &x, &f.cm, &f.proof));
        }

        #[test]
        fn test_any_opening_change_rejected(index in 0usize..2, delta in 1u64..) {
            let f = shared();
            let mut opn = f.opn.clone();
            opn[index] += Fr::from(delta);
            let cm = f.kp.ck().commit(&opn).unwrap();
            prop_assert!(!vfy(&f.kp, &f.x, &cm, &f.proof));
        }

        #[test]
        fn test_any_proof_element_or_commitment_shift_rejected(element in 0usize..6, k in 1u64..) {
            let f = shared();
            let k = Fr::from(k);
            let mut proof = f.proof.clone();
            let mut cm = f.cm;
            match element {
                0 => proof.gro16prf.a = shift_g1(proof.gro16prf.a, k),
                1 => proof.gro16prf.b = (proof.gro16prf.b.into_group() + G2Affine::generator() * k).into_affine(),
                2 => proof.gro16prf.c = shift_g1(proof.gro16prf.c, k),
                3 => proof.g_d = shift_g1(proof.g_d, k),
                4 => proof.lnk_prf = LinkProof(shift_g1(proof.lnk_prf.0, k)),
                _ => cm = Commitment(shift_g1(cm.0, k)),
            }
            prop_assert!(!vfy(&f.kp, &f.x, &cm, &proof));
        }
    }
}
