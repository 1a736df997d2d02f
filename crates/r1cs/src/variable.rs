//! Variable handles

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt;
use serde::{Deserialize, Serialize};

/// Index into the full variable assignment `[1, primary.., auxiliary..]`.
///
/// Index 0 is reserved for the constant one. Indices `1..=primary_input_size`
/// are primary (public) inputs, everything after them is auxiliary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct Variable {
    pub index: usize,
}

impl Variable {
    /// The constant-one variable
    pub const ONE: Variable = Variable { index: 0 };

    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_one(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            write!(f, "one")
        } else {
            write!(f, "v{}", self.index)
        }
    }
}
