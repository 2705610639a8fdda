use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_POLL_SECS: u64 = 30;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the saved .mhtml listing files.
    pub listing_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let listing_dir = env::var("HOUSEPINS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let bind_addr: SocketAddr = env::var("HOUSEPINS_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|e| format!("HOUSEPINS_ADDR is not a socket address: {e}"))?;

        let poll_secs: u64 = match env::var("HOUSEPINS_POLL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| format!("HOUSEPINS_POLL_SECS is not a number: {e}"))?,
            Err(_) => DEFAULT_POLL_SECS,
        };

        Ok(Config {
            listing_dir,
            bind_addr,
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}
