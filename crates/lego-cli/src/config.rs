//! Run configuration, stored as JSON

use crate::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Parameters of a generated LegoGroth16 instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegoConfig {
    /// Number of constraints in the generated R1CS
    pub num_constraints: usize,
    /// Number of primary inputs, public and committed together
    pub primary_input_size: usize,
    /// How many of the trailing primary inputs are committed
    pub comm_input_size: usize,
    /// Fixed RNG seed; a random one is drawn and logged when absent
    pub seed: Option<u64>,
    /// Use compressed point encodings for exported artifacts
    pub compress: bool,
}

impl Default for LegoConfig {
    fn default() -> Self {
        Self {
            num_constraints: 1024,
            primary_input_size: 8,
            comm_input_size: 4,
            seed: None,
            compress: true,
        }
    }
}

impl LegoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn x_size(&self) -> usize {
        self.primary_input_size - self.comm_input_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_constraints == 0 {
            return Err(CliError::InvalidConfig("num_constraints must be positive".into()));
        }
        if self.comm_input_size > self.primary_input_size {
            return Err(CliError::InvalidConfig(format!(
                "comm_input_size {} exceeds primary_input_size {}",
                self.comm_input_size, self.primary_input_size
            )));
        }
        // The example generator has num_constraints + 2 variables to hand out.
        if self.primary_input_size > self.num_constraints + 2 {
            return Err(CliError::InvalidConfig(format!(
                "primary_input_size {} needs at least {} constraints",
                self.primary_input_size,
                self.primary_input_size - 2
            )));
        }
        Ok(())
    }
}
