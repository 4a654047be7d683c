//! JSON loading for [`SimConfig`].
//!
//! ```json
//! { "max_packages": 3, "algorithm": "dijkstra", "chain_pickups": true }
//! ```
//!
//! Every field is optional; unknown fields are rejected.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use wb_core::SimConfig;

use crate::{SimError, SimResult};

/// Read and validate a config file.
pub fn load_config_json(path: &Path) -> SimResult<SimConfig> {
    let file = File::open(path)?;
    let config = load_config_reader(BufReader::new(file))?;
    log::info!("loaded sim config from {}", path.display());
    Ok(config)
}

/// Parse and validate a config from any reader.
pub fn load_config_reader<R: Read>(reader: R) -> SimResult<SimConfig> {
    let config: SimConfig =
        serde_json::from_reader(reader).map_err(|e| SimError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
