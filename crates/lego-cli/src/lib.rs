//! Command-line driver for LegoGroth16 over BLS12-381

pub mod artifacts;
pub mod commands;
pub mod config;

use lego_groth16::LegoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Encoding error: {0}")]
    Encoding(#[from] ark_serialize::SerializationError),
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("LegoGroth16 error: {0}")]
    Lego(#[from] LegoError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
