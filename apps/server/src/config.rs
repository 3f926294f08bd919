use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use pacfolio_core::{
    constants::{DEFAULT_LEDGER_PATH, DEFAULT_PRICE_CACHE_TTL_SECS, DEFAULT_TARGETS},
    goals::parse_targets,
    instruments::InstrumentCatalog,
    AllocationBasis, BucketGranularity, ValuationOptions,
};
use rust_decimal::Decimal;

/// Where live prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceProviderKind {
    Yahoo,
    Manual,
}

impl FromStr for PriceProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "manual" => Ok(Self::Manual),
            other => Err(anyhow!(
                "unknown price provider '{}', expected 'yahoo' or 'manual'",
                other
            )),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub ledger_path: PathBuf,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub targets: Vec<Decimal>,
    pub valuation: ValuationOptions,
    pub instruments: InstrumentCatalog,
    pub price_provider: PriceProviderKind,
    /// `SYMBOL=price` pairs for the manual provider
    pub manual_prices: String,
    pub price_cache_ttl: Duration,
    /// Budget for one provider request
    pub price_request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("PAC_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid PAC_LISTEN_ADDR")?;
        let ledger_path = PathBuf::from(var("PAC_LEDGER_PATH", DEFAULT_LEDGER_PATH));
        let cors_allow = var("PAC_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("PAC_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);

        let targets = match lookup("PAC_TARGETS") {
            Some(spec) => parse_targets(&spec).context("Invalid PAC_TARGETS")?,
            None => DEFAULT_TARGETS.to_vec(),
        };
        let basis: AllocationBasis = var("PAC_ALLOCATION_BASIS", "current_value")
            .parse()
            .context("Invalid PAC_ALLOCATION_BASIS")?;
        let granularity: BucketGranularity = var("PAC_BUCKET", "day")
            .parse()
            .context("Invalid PAC_BUCKET")?;
        let instruments = match lookup("PAC_INSTRUMENTS") {
            Some(spec) => InstrumentCatalog::parse(&spec).context("Invalid PAC_INSTRUMENTS")?,
            None => InstrumentCatalog::default(),
        };
        let price_provider: PriceProviderKind = var("PAC_PRICE_PROVIDER", "yahoo")
            .parse()
            .context("Invalid PAC_PRICE_PROVIDER")?;
        let ttl_secs: u64 = var(
            "PAC_PRICE_CACHE_TTL_SECS",
            &DEFAULT_PRICE_CACHE_TTL_SECS.to_string(),
        )
        .parse()
        .context("Invalid PAC_PRICE_CACHE_TTL_SECS")?;
        let price_timeout_secs: u64 = var("PAC_PRICE_TIMEOUT_SECS", "10")
            .parse()
            .context("Invalid PAC_PRICE_TIMEOUT_SECS")?;

        Ok(Self {
            listen_addr,
            ledger_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            targets,
            valuation: ValuationOptions { basis, granularity },
            instruments,
            price_provider,
            manual_prices: var("PAC_MANUAL_PRICES", ""),
            price_cache_ttl: Duration::from_secs(ttl_secs),
            price_request_timeout: Duration::from_secs(price_timeout_secs.max(1)),
            log_format: var("PAC_LOG_FORMAT", "text"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_dashboard() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.ledger_path, PathBuf::from("transazioni_pac.csv"));
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.targets, DEFAULT_TARGETS.to_vec());
        assert_eq!(config.valuation, ValuationOptions::default());
        assert_eq!(config.instruments.len(), 3);
        assert_eq!(config.price_provider, PriceProviderKind::Yahoo);
        assert_eq!(config.price_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.price_request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PAC_TARGETS", "50_000, 75000"),
            ("PAC_ALLOCATION_BASIS", "invested"),
            ("PAC_BUCKET", "month"),
            ("PAC_INSTRUMENTS", "VWCE=VWCE.DE"),
            ("PAC_PRICE_PROVIDER", "manual"),
            ("PAC_MANUAL_PRICES", "VWCE.DE=110.2"),
            ("PAC_REQUEST_TIMEOUT_MS", "not-a-number"),
            ("PAC_PRICE_TIMEOUT_SECS", "4"),
        ])
        .unwrap();
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.valuation.basis, AllocationBasis::Invested);
        assert_eq!(config.valuation.granularity, BucketGranularity::Month);
        assert!(config.instruments.contains("VWCE"));
        assert_eq!(config.price_provider, PriceProviderKind::Manual);
        assert_eq!(config.manual_prices, "VWCE.DE=110.2");
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
        assert_eq!(config.price_request_timeout, Duration::from_secs(4));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("PAC_TARGETS", "100000,-5")]).is_err());
        assert!(config_from(&[("PAC_BUCKET", "week")]).is_err());
        assert!(config_from(&[("PAC_LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("PAC_PRICE_PROVIDER", "bloomberg")]).is_err());
        assert!(config_from(&[("PAC_PRICE_TIMEOUT_SECS", "soon")]).is_err());
    }
}
