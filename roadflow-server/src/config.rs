//! Server configuration, read from a TOML file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address to bind, e.g. "127.0.0.1:8080"
    pub listen: SocketAddr,
    /// JSON network snapshot to load at startup
    pub network_path: PathBuf,
    /// How many congested paths the analytics endpoint ranks
    #[serde(default = "default_top_congested")]
    pub top_congested: usize,
}

fn default_top_congested() -> usize {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("config {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&raw)?)
    }
}
