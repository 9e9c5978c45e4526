use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::{Context, Result};

/// Which Entity Store backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE {other:?}, expected `sqlite` or `memory`"),
        }
    }
}

/// Server settings read from the environment.
///
/// | Env Var        | Default             |
/// |----------------|---------------------|
/// | `DATABASE_URL` | `sqlite://todos.db` |
/// | `STORE`        | `sqlite`            |
/// | `HOST`         | `127.0.0.1`         |
/// | `PORT`         | `8080`              |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub store: StoreKind,
    pub addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://todos.db".to_string());
        let store = lookup("STORE").as_deref().unwrap_or("sqlite").parse()?;
        let host: IpAddr = lookup("HOST")
            .as_deref()
            .unwrap_or("127.0.0.1")
            .parse()
            .context("HOST must be an IP address")?;
        let port: u16 = lookup("PORT")
            .as_deref()
            .unwrap_or("8080")
            .parse()
            .context("PORT must be a valid u16")?;
        Ok(Self { database_url, store, addr: SocketAddr::new(host, port) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.database_url, "sqlite://todos.db");
        assert_eq!(cfg.store, StoreKind::Sqlite);
        assert_eq!(cfg.addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn overrides() {
        let cfg = config(&[("STORE", "Memory"), ("HOST", "0.0.0.0"), ("PORT", "3000")]).unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.addr, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("HOST", "localhost:1")]).is_err());
        assert!(config(&[("STORE", "postgres")]).is_err());
    }
}
