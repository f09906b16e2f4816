//! Operational configuration. The EIP-712 domain is fixed by spec (see
//! [`crate::eip712`]) and is not loaded from the environment — this
//! registry only recovers and stores signatures, it never signs, so there
//! is no private key here.

use anyhow::Result;

pub struct Config {
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4001);

        Ok(Self { port })
    }
}
