//! LegoGroth16: Groth16 with a committed slice of the public input.
//!
//! The primary input of an R1CS is split into a public part `x` and a
//! committable part `opn`. The verifier sees `x` and a Pedersen commitment
//! `cm` to `opn`, never `opn` itself. A proof consists of
//!
//! - a Groth16 proof whose `C` element is shifted by a blinding correction,
//! - a proof term `g_D` that replaces the committed part of the Groth16
//!   public-input accumulation, blinded with fresh randomness,
//! - a linking proof showing that `cm` and `g_D` open to the same `opn`.
//!
//! ```text
//! ck      = gen_ck(opn_size)
//! cm      = commit(ck, opn)
//! kp      = kg(ck, cs)
//! π       = prv(kp, x, cm, opn, omega)
//! accept  = vfy(kp, x, cm, π)
//! ```
//!
//! Key pairs and commitment keys are immutable once built and can be shared
//! across threads. Multi-scalar multiplications run in parallel through
//! `ark-ec`'s `parallel` feature.

#![forbid(unsafe_code)]

pub mod bases;
pub mod commitment;
pub mod constraint_system;
pub mod correction;
pub mod error;
pub mod example;
pub mod keys;
pub mod prover;
mod snark;
pub mod verifier;

pub use commitment::{commit, gen_ck, Commitment, CommitmentKey};
pub use constraint_system::LegoConstraintSystem;
pub use correction::{CorrectionTerm, EtaBlinding};
pub use error::*;
pub use example::{gen_lego_example, generate_lego_example_with_field_input, LegoExample};
pub use keys::{kg, KeyMaterial, KeyPair};
pub use prover::{prove_with, prv, Proof};
pub use verifier::{verify_with, vfy};

pub use ark_groth16::Proof as Groth16Proof;
pub use cplink::{LinkKey, LinkProof};

/// Deterministic CSPRNG shared by the unit tests
#[cfg(test)]
pub(crate) fn test_rng() -> rand_chacha::ChaCha20Rng {
    use rand_chacha::rand_core::SeedableRng;
    rand_chacha::ChaCha20Rng::seed_from_u64(0x1e60)
}
