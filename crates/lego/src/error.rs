//! Error types for key generation and proving

use ark_relations::r1cs::SynthesisError;
use cplink::LinkError;
use r1cs::R1CSError;
use thiserror::Error;

/// Errors surfaced by commitment, key generation and proving.
///
/// Verification never fails with an error; it returns `false`.
#[derive(Error, Debug)]
pub enum LegoError {
    /// A vector does not have the length its key or partition declares
    #[error("Invalid length for {what}: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The committable slice does not fit the primary input, or the
    /// partition changed between setup and a later call
    #[error("Inconsistent partition: {0}")]
    InconsistentPartition(String),

    /// The base SNARK or linking-argument setup failed
    #[error("Setup failed: {0}")]
    SetupFailure(#[source] ExternalError),

    /// The base prover or linking prover failed
    #[error("Proof generation failed: {0}")]
    ProofGenerationFailure(#[source] ExternalError),

    /// The constraint system or its example generator rejected its inputs
    #[error("Constraint system error: {0}")]
    ConstraintSystem(#[from] R1CSError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] ark_serialize::SerializationError),
}

/// Failures reported by the collaborators this layer composes
#[derive(Error, Debug)]
pub enum ExternalError {
    #[error("base SNARK: {0}")]
    Snark(#[from] SynthesisError),

    #[error("linking argument: {0}")]
    Link(#[from] LinkError),

    #[error("constraint system: {0}")]
    R1CS(#[from] R1CSError),

    #[error("assignment violates constraint {0}")]
    Unsatisfied(usize),
}

pub type LegoResult<T> = Result<T, LegoError>;

impl LegoError {
    pub(crate) fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        LegoError::InvalidLength {
            what,
            expected,
            actual,
        }
    }

    pub(crate) fn setup(err: impl Into<ExternalError>) -> Self {
        LegoError::SetupFailure(err.into())
    }

    pub(crate) fn proving(err: impl Into<ExternalError>) -> Self {
        LegoError::ProofGenerationFailure(err.into())
    }
}
