//! Runtime configuration.

use anyhow::Result;

/// Settings for both listening sockets and the injected-failure switch.
///
/// Values come from the command line or the environment (`SMSC_PORT`,
/// `WEB_PORT`, `FAILED_SUBMITS`); see the binary's argument parser.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMPP listening port
    pub smsc_port: u16,

    /// Web UI listening port
    pub web_port: u16,

    /// Answer even-sequence submit_sm requests with a system error
    pub failed_submits: bool,
}

impl Config {
    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.smsc_port == 0 {
            anyhow::bail!("smsc port must be nonzero");
        }
        if self.web_port == 0 {
            anyhow::bail!("web port must be nonzero");
        }
        if self.smsc_port == self.web_port {
            anyhow::bail!("smsc and web ports must differ");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smsc_port: 2775,
            web_port: 8080,
            failed_submits: false,
        }
    }
}
