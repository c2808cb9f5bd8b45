use anyhow::Result;
use clap::Parser;
use tracing::info;

use smscsim::bootstrap::Server;
use smscsim::config::Config;
use smscsim::telemetry::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(name = "smscsim")]
#[command(author, version, about = "SMPP v3.4 SMSC simulator for testing ESME clients")]
struct Args {
    /// SMPP listening port
    #[arg(long, env = "SMSC_PORT", default_value_t = 2775)]
    smsc_port: u16,

    /// Web UI listening port
    #[arg(long, env = "WEB_PORT", default_value_t = 8080)]
    web_port: u16,

    /// Answer every submit_sm with an even sequence number with a system
    /// error, and report UNDELIV in requested delivery receipts
    #[arg(long, env = "FAILED_SUBMITS")]
    failed_submits: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit JSON logs
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&TracingConfig {
        log_level: args.log_level.clone(),
        json_logs: args.json_logs,
    })?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting smscsim");

    let config = Config {
        smsc_port: args.smsc_port,
        web_port: args.web_port,
        failed_submits: args.failed_submits,
    };

    let server = Server::new(config)?;
    server.run().await
}
