//! Ready-to-prove instances for tests, benchmarks and the CLI

use crate::{
    commitment::{gen_ck, Commitment, CommitmentKey},
    constraint_system::LegoConstraintSystem,
    LegoError, LegoResult,
};
use ark_ec::pairing::Pairing;
use ark_std::{
    rand::{CryptoRng, Rng},
    vec::Vec,
};
use r1cs::{generate_r1cs_example_with_field_input, R1CS};

/// A partitioned constraint system, a satisfying assignment split into
/// `(x, opn, omega)`, and a commitment to `opn` under a fresh key.
#[derive(Clone, Debug)]
pub struct LegoExample<E: Pairing> {
    pub lego_cs: LegoConstraintSystem<E::ScalarField>,
    pub x: Vec<E::ScalarField>,
    pub opn: Vec<E::ScalarField>,
    pub omega: Vec<E::ScalarField>,
    pub ck: CommitmentKey<E>,
    pub cm: Commitment<E>,
}

impl<E: Pairing> LegoExample<E> {
    pub fn is_satisfied(&self) -> LegoResult<bool> {
        let primary = self.lego_cs.primary_input(&self.x, &self.opn)?;
        Ok(self.lego_cs.r1cs().is_satisfied(&primary, &self.omega)?)
    }
}

/// Wrap an existing system and assignment. The committable slice is the last
/// `opn.len()` primary inputs.
pub fn gen_lego_example<E, R>(
    cs: R1CS<E::ScalarField>,
    x: Vec<E::ScalarField>,
    opn: Vec<E::ScalarField>,
    omega: Vec<E::ScalarField>,
    rng: &mut R,
) -> LegoResult<LegoExample<E>>
where
    E: Pairing,
    R: Rng + CryptoRng + ?Sized,
{
    let lego_cs = LegoConstraintSystem::new(cs, opn.len())?;
    if x.len() != lego_cs.x_size() {
        return Err(LegoError::length("public input", lego_cs.x_size(), x.len()));
    }
    let ck = gen_ck::<E, R>(opn.len(), rng);
    let cm = ck.commit(&opn)?;
    Ok(LegoExample {
        lego_cs,
        x,
        opn,
        omega,
        ck,
        cm,
    })
}

/// A random satisfiable instance with `x_size` public and `comm_size`
/// committed primary inputs.
pub fn generate_lego_example_with_field_input<E, R>(
    num_constraints: usize,
    x_size: usize,
    comm_size: usize,
    rng: &mut R,
) -> LegoResult<LegoExample<E>>
where
    E: Pairing,
    R: Rng + CryptoRng + ?Sized,
{
    let example = generate_r1cs_example_with_field_input::<E::ScalarField, R>(
        num_constraints,
        x_size + comm_size,
        rng,
    )?;
    let mut x = example.primary_input;
    let opn = x.split_off(x_size);
    gen_lego_example(example.constraint_system, x, opn, example.auxiliary_input, rng)
}
