//! Exported keys, statement and proof.
//!
//! A run directory holds `key.bin` (the serialized key material),
//! `proof.bin` and `statement.json` (public input and commitment as hex, plus
//! the encoding mode used for the binary files).

use crate::Result;
use ark_bls12_381::{Bls12_381, Fr};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use lego_groth16::{Commitment, KeyMaterial, Proof};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const KEY_FILE: &str = "key.bin";
pub const PROOF_FILE: &str = "proof.bin";
pub const STATEMENT_FILE: &str = "statement.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub compress: bool,
    pub x: Vec<String>,
    pub cm: String,
}

/// Everything a verifier needs, in memory
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub material: KeyMaterial<Bls12_381>,
    pub x: Vec<Fr>,
    pub cm: Commitment<Bls12_381>,
    pub proof: Proof<Bls12_381>,
}

fn mode(compress: bool) -> Compress {
    if compress {
        Compress::Yes
    } else {
        Compress::No
    }
}

fn encode<T: CanonicalSerialize>(value: &T, compress: bool) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(value.serialized_size(mode(compress)));
    value.serialize_with_mode(&mut bytes, mode(compress))?;
    Ok(bytes)
}

fn decode<T: CanonicalDeserialize>(bytes: &[u8], compress: bool) -> Result<T> {
    Ok(T::deserialize_with_mode(bytes, mode(compress), Validate::Yes)?)
}

impl Artifacts {
    pub fn export(&self, dir: &Path, compress: bool) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(KEY_FILE), encode(&self.material, compress)?)?;
        fs::write(dir.join(PROOF_FILE), encode(&self.proof, compress)?)?;

        let statement = Statement {
            compress,
            x: self
                .x
                .iter()
                .map(|value| encode(value, compress).map(hex::encode))
                .collect::<Result<_>>()?,
            cm: hex::encode(encode(&self.cm, compress)?),
        };
        fs::write(dir.join(STATEMENT_FILE), serde_json::to_vec_pretty(&statement)?)?;
        tracing::info!(dir = %dir.display(), "exported artifacts");
        Ok(())
    }

    pub fn import(dir: &Path) -> Result<Self> {
        let statement: Statement = serde_json::from_slice(&fs::read(dir.join(STATEMENT_FILE))?)?;
        let compress = statement.compress;

        let x = statement
            .x
            .iter()
            .map(|value| decode(&hex::decode(value)?, compress))
            .collect::<Result<_>>()?;
        let cm = decode(&hex::decode(&statement.cm)?, compress)?;
        let material = decode(&fs::read(dir.join(KEY_FILE))?, compress)?;
        let proof = decode(&fs::read(dir.join(PROOF_FILE))?, compress)?;
        Ok(Self {
            material,
            x,
            cm,
            proof,
        })
    }
}
