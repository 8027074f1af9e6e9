use {
    crate::{errors::MarketError, utils::units::parse_ether_str},
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    std::{env, str::FromStr, time::Duration},
};

pub const DEFAULT_LISTING_FEE: &str = "0.025";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";
const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub marketplace_address: Address,
    pub private_key: String,
    /// Wei attached to every `placeNftOnSale`.
    pub listing_fee: U256,
    pub ipfs_gateway: String,
    pub metadata_timeout: Duration,
    pub tx_timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Config> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch
    /// the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| MarketError::Config(format!("missing {key} environment variable")))
        };

        let rpc_url = required("RPC_URL")?;
        let address = required("MARKETPLACE_ADDRESS")?;
        let marketplace_address = Address::from_str(address.trim())
            .with_context(|| format!("MARKETPLACE_ADDRESS is not an address: {}", address))?;
        let private_key = required("PRIVATE_KEY")?;

        let listing_fee = parse_ether_str(
            &lookup("LISTING_FEE").unwrap_or_else(|| DEFAULT_LISTING_FEE.to_string()),
        )
        .context("LISTING_FEE must be an ether amount")?;
        let ipfs_gateway =
            lookup("IPFS_GATEWAY").unwrap_or_else(|| DEFAULT_IPFS_GATEWAY.to_string());

        let seconds = |key: &str, default: u64| -> Result<Duration> {
            let secs = match lookup(key) {
                Some(v) => v
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{key} must be a whole number of seconds"))?,
                None => default,
            };
            Ok(Duration::from_secs(secs))
        };

        Ok(Config {
            rpc_url,
            marketplace_address,
            private_key,
            listing_fee,
            ipfs_gateway,
            metadata_timeout: seconds("METADATA_TIMEOUT_SECS", DEFAULT_METADATA_TIMEOUT_SECS)?,
            tx_timeout: seconds("TX_TIMEOUT_SECS", DEFAULT_TX_TIMEOUT_SECS)?,
        })
    }
}
