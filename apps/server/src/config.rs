use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub settings_path: PathBuf,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CALCAE_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CALCAE_LISTEN_ADDR")?;
        let settings_path = std::env::var("CALCAE_SETTINGS_PATH")
            .unwrap_or_else(|_| "./data/settings.json".into())
            .into();
        let cors_allow = parse_origins(
            &std::env::var("CALCAE_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("CALCAE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Ok(Self {
            listen_addr,
            settings_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        assert_eq!(
            parse_origins(" http://localhost:3000 ,, https://calc.example "),
            vec!["http://localhost:3000", "https://calc.example"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert!(parse_origins("").is_empty());
    }
}
