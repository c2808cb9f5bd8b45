//! Process wiring for the two servers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use crate::config::Config;
use crate::listener::SmppListener;
use crate::smsc::Smsc;
use crate::web::WebServer;

use super::shutdown::Shutdown;

/// Main smscsim server.
///
/// Owns the shared `Smsc` state and runs the SMPP listener and the web UI
/// until a shutdown signal arrives.
pub struct Server {
    config: Config,
    smsc: Arc<Smsc>,
    shutdown: Arc<Shutdown>,
}

impl Server {
    /// Create a new server instance.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let smsc = Smsc::new(config.failed_submits);

        Ok(Self {
            config,
            smsc,
            shutdown: Shutdown::new(),
        })
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> Result<()> {
        info!(
            smsc_port = self.config.smsc_port,
            web_port = self.config.web_port,
            failed_submits = self.config.failed_submits,
            "starting smscsim"
        );

        let smpp = SmppListener::bind(
            self.smsc.clone(),
            any_addr(self.config.smsc_port),
            self.shutdown.clone(),
        )
        .await
        .context("failed to bind the smsc port")?;

        let web = WebServer::bind(
            self.smsc.clone(),
            any_addr(self.config.web_port),
            self.shutdown.clone(),
        )
        .await
        .context("failed to bind the web port")?;

        let smpp_handle = tokio::spawn(async move {
            if let Err(e) = smpp.run().await {
                error!(error = %e, "smsc listener failed");
            }
        });
        let web_handle = tokio::spawn(async move {
            if let Err(e) = web.run().await {
                error!(error = %e, "web server failed");
            }
        });

        signal::ctrl_c()
            .await
            .context("failed to listen for the shutdown signal")?;
        info!("shutdown signal received");
        self.shutdown.trigger();

        let _ = smpp_handle.await;
        let _ = web_handle.await;

        info!("smscsim stopped");
        Ok(())
    }
}

fn any_addr(port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
}
