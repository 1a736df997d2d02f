//! Base proof system adapter: Groth16 over an [`R1CS`].
//!
//! The partitioned system is synthesized into an `ark-relations` constraint
//! system with variable 0 mapped to the constant one, the primary inputs
//! mapped to instance variables in order, and the auxiliary inputs mapped to
//! witness variables. Setup takes its toxic waste from the caller so that the
//! key generator can derive values that depend on `gamma` and `delta`.

use crate::{ExternalError, LegoError, LegoResult};
use ark_ec::pairing::Pairing;
use ark_ff::{Field, UniformRand, Zero};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystemRef, LinearCombination as ArkLinearCombination,
    SynthesisError, Variable as ArkVariable,
};
use ark_std::{
    rand::{CryptoRng, Rng},
    vec::Vec,
};
use r1cs::{LinearCombination, R1CS};

/// Secret randomness fixed during setup. Must be destroyed afterwards.
pub(crate) struct ToxicWaste<E: Pairing> {
    pub alpha: E::ScalarField,
    pub beta: E::ScalarField,
    pub gamma: E::ScalarField,
    pub delta: E::ScalarField,
    /// Blinding exponent for the committed slice
    pub eta: E::ScalarField,
    pub gamma_inv: E::ScalarField,
    pub delta_inv: E::ScalarField,
    pub g1: E::G1,
    pub g2: E::G2,
}

impl<E: Pairing> ToxicWaste<E> {
    pub fn new<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let (gamma, gamma_inv) = invertible(rng);
        let (delta, delta_inv) = invertible(rng);
        Self {
            alpha: invertible(rng).0,
            beta: invertible(rng).0,
            gamma,
            delta,
            eta: invertible(rng).0,
            gamma_inv,
            delta_inv,
            g1: E::G1::rand(rng),
            g2: E::G2::rand(rng),
        }
    }

    /// `(η/γ)·G1`
    pub fn eta_gamma_inv_g1(&self) -> E::G1 {
        self.g1 * (self.eta * self.gamma_inv)
    }

    /// `(η/δ)·G1`
    pub fn eta_delta_inv_g1(&self) -> E::G1 {
        self.g1 * (self.eta * self.delta_inv)
    }

    /// Zero out the trapdoor (best effort)
    pub fn destroy(&mut self) {
        self.alpha = E::ScalarField::zero();
        self.beta = E::ScalarField::zero();
        self.gamma = E::ScalarField::zero();
        self.delta = E::ScalarField::zero();
        self.eta = E::ScalarField::zero();
        self.gamma_inv = E::ScalarField::zero();
        self.delta_inv = E::ScalarField::zero();
    }

    #[cfg(test)]
    pub fn is_destroyed(&self) -> bool {
        [
            self.alpha,
            self.beta,
            self.gamma,
            self.delta,
            self.eta,
            self.gamma_inv,
            self.delta_inv,
        ]
            .iter()
            .all(Zero::is_zero)
    }
}

/// A uniformly random nonzero scalar together with its inverse
fn invertible<F: Field, R: Rng + ?Sized>(rng: &mut R) -> (F, F) {
    loop {
        let value = F::rand(rng);
        if let Some(inverse) = value.inverse() {
            return (value, inverse);
        }
    }
}

/// An [`R1CS`] presented to the Groth16 backend, optionally with an assignment
pub(crate) struct R1CSCircuit<'a, F: Field> {
    cs: &'a R1CS<F>,
    assignment: Option<(&'a [F], &'a [F])>,
}

impl<'a, F: Field> R1CSCircuit<'a, F> {
    pub fn for_setup(cs: &'a R1CS<F>) -> Self {
        Self {
            cs,
            assignment: None,
        }
    }

    pub fn with_assignment(cs: &'a R1CS<F>, primary: &'a [F], auxiliary: &'a [F]) -> Self {
        Self {
            cs,
            assignment: Some((primary, auxiliary)),
        }
    }
}

impl<F: Field> ConstraintSynthesizer<F> for R1CSCircuit<'_, F> {
    fn generate_constraints(self, ark_cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let mut vars = Vec::with_capacity(self.cs.num_variables());
        vars.push(ArkVariable::One);

        for i in 0..self.cs.primary_input_size() {
            let value = self.assignment.map(|(primary, _)| primary[i]);
            vars.push(ark_cs.new_input_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?);
        }
        for i in 0..self.cs.auxiliary_input_size() {
            let value = self.assignment.map(|(_, auxiliary)| auxiliary[i]);
            vars.push(ark_cs.new_witness_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?);
        }

        let lower = |lc: &LinearCombination<F>| {
            ArkLinearCombination(
                lc.terms
                    .iter()
                    .map(|term| (term.coefficient, vars[term.variable.index]))
                    .collect(),
            )
        };
        for constraint in self.cs.constraints() {
            ark_cs.enforce_constraint(lower(&constraint.a), lower(&constraint.b), lower(&constraint.c))?;
        }
        Ok(())
    }
}

/// `setup(cs) -> (pk, vk)` with caller-provided toxic waste
pub(crate) fn setup<E, R>(
    cs: &R1CS<E::ScalarField>,
    toxic: &ToxicWaste<E>,
    rng: &mut R,
) -> LegoResult<ProvingKey<E>>
where
    E: Pairing,
    R: Rng + CryptoRng,
{
    let _span = tracing::info_span!("Groth16 setup", constraints = cs.num_constraints()).entered();
    Groth16::<E>::generate_parameters_with_qap(
        R1CSCircuit::for_setup(cs),
        toxic.alpha,
        toxic.beta,
        toxic.gamma,
        toxic.delta,
        toxic.g1,
        toxic.g2,
        rng,
    )
    .map_err(LegoError::setup)
}

/// `preprocess_vk(vk) -> pvk`
pub(crate) fn preprocess_vk<E: Pairing>(vk: &VerifyingKey<E>) -> LegoResult<PreparedVerifyingKey<E>> {
    let _span = tracing::info_span!("Preprocess verification key").entered();
    Ok(ark_groth16::prepare_verifying_key(vk))
}

/// `prove(pk, primary, auxiliary) -> proof`. The assignment is checked
/// against `cs` first so an unsatisfied witness is reported, not proven.
pub(crate) fn prove<E, R>(
    pk: &ProvingKey<E>,
    cs: &R1CS<E::ScalarField>,
    primary: &[E::ScalarField],
    auxiliary: &[E::ScalarField],
    rng: &mut R,
) -> LegoResult<Proof<E>>
where
    E: Pairing,
    R: Rng + CryptoRng,
{
    if let Some(index) = cs
        .first_unsatisfied(primary, auxiliary)
        .map_err(LegoError::proving)?
    {
        return Err(LegoError::ProofGenerationFailure(ExternalError::Unsatisfied(index)));
    }

    let _span = tracing::info_span!("Groth16 prover").entered();
    Groth16::<E>::create_random_proof_with_reduction(
        R1CSCircuit::with_assignment(cs, primary, auxiliary),
        pk,
        rng,
    )
    .map_err(LegoError::proving)
}

/// `verify(pvk, prepared_inputs, proof)`. Backend errors count as rejection.
pub(crate) fn verify_with_prepared_inputs<E: Pairing>(
    pvk: &PreparedVerifyingKey<E>,
    proof: &Proof<E>,
    prepared_inputs: &E::G1,
) -> bool {
    match Groth16::<E>::verify_proof_with_prepared_inputs(pvk, proof, prepared_inputs) {
        Ok(valid) => valid,
        Err(err) => {
            tracing::debug!(%err, "base verifier error");
            false
        }
    }
}
