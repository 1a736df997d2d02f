//! Subcommand bodies

use crate::{artifacts::Artifacts, config::LegoConfig, Result};
use ark_bls12_381::Bls12_381;
use lego_groth16::{generate_lego_example_with_field_input, kg, prv, vfy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::Path;

/// Generate an instance, set up keys, prove and verify. Returns the verdict.
pub fn run(config: &LegoConfig, out_dir: Option<&Path>) -> Result<bool> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        num_constraints = config.num_constraints,
        x_size = config.x_size(),
        opn_size = config.comm_input_size,
        "starting run"
    );
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let example = generate_lego_example_with_field_input::<Bls12_381, _>(
        config.num_constraints,
        config.x_size(),
        config.comm_input_size,
        &mut rng,
    )?;
    let kp = kg(&example.ck, &example.lego_cs, &mut rng)?;
    let proof = prv(&kp, &example.x, &example.cm, &example.opn, &example.omega, &mut rng)?;
    let accepted = vfy(&kp, &example.x, &example.cm, &proof);
    tracing::info!(accepted, "verified fresh proof");

    if let Some(dir) = out_dir {
        Artifacts {
            material: kp.into_material(),
            x: example.x,
            cm: example.cm,
            proof,
        }
        .export(dir, config.compress)?;
    }
    Ok(accepted)
}

/// Reload exported artifacts and verify them again
pub fn verify(dir: &Path) -> Result<bool> {
    let artifacts = Artifacts::import(dir)?;
    let kp = artifacts.material.preprocess()?;
    let accepted = vfy(&kp, &artifacts.x, &artifacts.cm, &artifacts.proof);
    tracing::info!(accepted, dir = %dir.display(), "verified exported proof");
    Ok(accepted)
}
