//! Key generation: `kg(ck, cs) -> KeyPair`.
//!
//! Setup runs in two phases. [`KeyMaterial::generate`] produces everything
//! that has to be persisted: the commitment key, the Groth16 proving key, the
//! two correction elements and the linking key. [`KeyMaterial::preprocess`]
//! validates the material against its own partition and prepares the
//! verification key for pairing checks. Keys loaded from disk go through the
//! same `preprocess` step as fresh ones.

use crate::{
    bases::SharedBases,
    commitment::CommitmentKey,
    constraint_system::LegoConstraintSystem,
    snark::{self, ToxicWaste},
    LegoError, LegoResult,
};
use ark_ec::{pairing::Pairing, CurveGroup};
use ark_groth16::{PreparedVerifyingKey, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, Rng};
use cplink::LinkKey;
use std::ops::Deref;

/// Persistable output of setup.
///
/// `gamma_abc_g1_x` holds the constant-one base followed by one base per
/// public input; `gamma_abc_g1_u` holds one base per committed scalar. Their
/// concatenation is the Groth16 `gamma_abc_g1` vector.
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KeyMaterial<E: Pairing> {
    cs: LegoConstraintSystem<E::ScalarField>,
    ck: CommitmentKey<E>,
    gro16pk: ProvingKey<E>,
    eta_gamma_inv_g1: E::G1Affine,
    eta_delta_inv_g1: E::G1Affine,
    gamma_abc_g1_x: SharedBases<E::G1Affine>,
    gamma_abc_g1_u: SharedBases<E::G1Affine>,
    lnk_key: LinkKey<E>,
}

impl<E: Pairing> KeyMaterial<E> {
    /// Run setup for `cs` against the commitment key `ck`. The toxic waste
    /// is sampled here and zeroed before returning, on success and failure.
    #[tracing::instrument(
        name = "LegoGroth16 key generator",
        skip_all,
        fields(x_size = cs.x_size(), opn_size = cs.opn_size())
    )]
    pub fn generate<R: Rng + CryptoRng>(
        ck: &CommitmentKey<E>,
        cs: &LegoConstraintSystem<E::ScalarField>,
        rng: &mut R,
    ) -> LegoResult<Self> {
        if ck.len() != cs.opn_size() {
            return Err(LegoError::length("commitment key", cs.opn_size(), ck.len()));
        }

        let mut toxic = ToxicWaste::<E>::new(rng);
        let gro16pk = snark::setup(cs.r1cs(), &toxic, rng);
        let corrections = E::G1::normalize_batch(&[toxic.eta_gamma_inv_g1(), toxic.eta_delta_inv_g1()]);
        toxic.destroy();
        let gro16pk = gro16pk?;
        let (eta_gamma_inv_g1, eta_delta_inv_g1) = (corrections[0], corrections[1]);

        let gamma_abc = &gro16pk.vk.gamma_abc_g1;
        if gamma_abc.len() != cs.primary_input_size() + 1 {
            return Err(LegoError::InconsistentPartition(format!(
                "base SNARK exposes {} input bases, partition expects {}",
                gamma_abc.len(),
                cs.primary_input_size() + 1
            )));
        }
        let (x_bases, u_bases) = gamma_abc.split_at(cs.x_size() + 1);

        let mut proof_bases = u_bases.to_vec();
        proof_bases.push(eta_gamma_inv_g1);
        let lnk_key = cplink::setup::<E, R>(ck.bases(), &proof_bases, rng).map_err(LegoError::setup)?;

        Ok(Self {
            cs: cs.clone(),
            ck: ck.clone(),
            eta_gamma_inv_g1,
            eta_delta_inv_g1,
            gamma_abc_g1_x: x_bases.to_vec().into(),
            gamma_abc_g1_u: u_bases.to_vec().into(),
            lnk_key,
            gro16pk,
        })
    }

    /// Check the material is internally consistent and prepare the
    /// verification key.
    pub fn preprocess(self) -> LegoResult<KeyPair<E>> {
        let cs = &self.cs;
        if self.ck.len() != cs.opn_size() {
            return Err(LegoError::length("commitment key", cs.opn_size(), self.ck.len()));
        }
        if self.gamma_abc_g1_x.len() != cs.x_size() + 1 {
            return Err(LegoError::length(
                "public input bases",
                cs.x_size() + 1,
                self.gamma_abc_g1_x.len(),
            ));
        }
        if self.gamma_abc_g1_u.len() != cs.opn_size() {
            return Err(LegoError::length(
                "committed input bases",
                cs.opn_size(),
                self.gamma_abc_g1_u.len(),
            ));
        }
        if self.lnk_key.opn_size() != cs.opn_size() {
            return Err(LegoError::length("linking key", cs.opn_size(), self.lnk_key.opn_size()));
        }
        let split_matches = self
            .gamma_abc_g1_x
            .iter()
            .chain(self.gamma_abc_g1_u.iter())
            .eq(self.gro16pk.vk.gamma_abc_g1.iter());
        if !split_matches {
            return Err(LegoError::InconsistentPartition(
                "input bases do not match the verification key".into(),
            ));
        }

        let gro16pvk = snark::preprocess_vk(&self.gro16pk.vk)?;
        Ok(KeyPair {
            material: self,
            gro16pvk,
        })
    }

    /// The partitioned system the keys were generated for
    pub fn cs(&self) -> &LegoConstraintSystem<E::ScalarField> {
        &self.cs
    }

    /// The commitment key the linking key is bound to
    pub fn ck(&self) -> &CommitmentKey<E> {
        &self.ck
    }

    /// Groth16 proving key over the unsplit primary input
    pub fn gro16pk(&self) -> &ProvingKey<E> {
        &self.gro16pk
    }

    /// Unprepared Groth16 verification key, as embedded in [`Self::gro16pk`]
    pub fn gro16vk(&self) -> &VerifyingKey<E> {
        &self.gro16pk.vk
    }

    /// `(η/γ)·G1`, the blinding base of the proof term
    pub fn eta_gamma_inv_g1(&self) -> &E::G1Affine {
        &self.eta_gamma_inv_g1
    }

    /// `(η/δ)·G1`, subtracted from the Groth16 `C` to cancel the blinding
    pub fn eta_delta_inv_g1(&self) -> &E::G1Affine {
        &self.eta_delta_inv_g1
    }

    /// Leading `1 + x_size` input bases, starting with the constant term
    pub fn gamma_abc_g1_x(&self) -> &[E::G1Affine] {
        &self.gamma_abc_g1_x
    }

    /// Trailing `opn_size` input bases for the committed slice
    pub fn gamma_abc_g1_u(&self) -> &[E::G1Affine] {
        &self.gamma_abc_g1_u
    }

    /// Links `cm` under [`Self::ck`] to the proof term `g_D`
    pub fn lnk_key(&self) -> &LinkKey<E> {
        &self.lnk_key
    }

    /// Number of public inputs, excluding the constant one
    pub fn x_size(&self) -> usize {
        self.cs.x_size()
    }

    pub fn opn_size(&self) -> usize {
        self.cs.opn_size()
    }
}

/// Key material together with the prepared Groth16 verification key.
///
/// Persist a key pair by serializing [`KeyPair::material`]; reload it with
/// `KeyMaterial::deserialize_*` followed by [`KeyMaterial::preprocess`].
#[derive(Clone, Debug)]
pub struct KeyPair<E: Pairing> {
    material: KeyMaterial<E>,
    gro16pvk: PreparedVerifyingKey<E>,
}

impl<E: Pairing> KeyPair<E> {
    /// The serializable half of the pair
    pub fn material(&self) -> &KeyMaterial<E> {
        &self.material
    }

    pub fn into_material(self) -> KeyMaterial<E> {
        self.material
    }

    /// Prepared form of [`KeyMaterial::gro16vk`]
    pub fn gro16pvk(&self) -> &PreparedVerifyingKey<E> {
        &self.gro16pvk
    }
}

impl<E: Pairing> Deref for KeyPair<E> {
    type Target = KeyMaterial<E>;

    fn deref(&self) -> &KeyMaterial<E> {
        &self.material
    }
}

/// `kg(ck, cs) -> (ek, vk)`
pub fn kg<E, R>(
    ck: &CommitmentKey<E>,
    cs: &LegoConstraintSystem<E::ScalarField>,
    rng: &mut R,
) -> LegoResult<KeyPair<E>>
where
    E: Pairing,
    R: Rng + CryptoRng,
{
    KeyMaterial::generate(ck, cs, rng)?.preprocess()
}
