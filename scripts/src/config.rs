//! Resolution of the network profile the scripts run against

use std::{
    env,
    fmt::{self, Debug, Display},
    fs::File,
    io::BufReader,
    path::Path,
};

use clap::ValueEnum;
use serde::{de::DeserializeOwned, Deserialize};
use starknet::core::{chain_id, types::Felt};
use tracing::warn;
use url::Url;

use crate::{
    calldata::{short_string, Currency, Pair},
    constants::{
        ACCOUNT_ADDRESS_ENV_VAR, DEFAULT_LOCAL_PORT, LOCAL_HOST, LOCAL_RPC_PATH, MAINNET_RPC_URL,
        PRIVATE_KEY_ENV_VAR, SEPOLIA_RPC_URL,
    },
    errors::ScriptError,
    types::{felt_hex, parse_felt},
};

/// The networks the scripts can target
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// Starknet mainnet
    Mainnet,
    /// Starknet sepolia testnet
    Sepolia,
    /// A local starknet-devnet node
    Devnet,
    /// A local katana node
    Katana,
}

impl Network {
    /// The name of the network, also used as its manifest directory
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Devnet => "devnet",
            Network::Katana => "katana",
        }
    }

    /// Whether the network is an ephemeral node on this machine
    pub fn is_local(&self) -> bool {
        matches!(self, Network::Devnet | Network::Katana)
    }

    /// The chain ID transactions are signed for
    pub fn chain_id(&self) -> Felt {
        match self {
            Network::Mainnet => chain_id::MAINNET,
            _ => chain_id::SEPOLIA,
        }
    }

    /// The RPC endpoint of the network, using `port` for local networks
    pub fn rpc_url(&self, port: Option<u16>) -> Result<Url, ScriptError> {
        let url = match self {
            Network::Mainnet => MAINNET_RPC_URL.to_string(),
            Network::Sepolia => SEPOLIA_RPC_URL.to_string(),
            Network::Devnet => local_rpc_url(port.unwrap_or(DEFAULT_LOCAL_PORT)),
            Network::Katana => {
                let port = port.ok_or_else(|| {
                    ScriptError::Config("`--port` must be set for katana".to_string())
                })?;
                local_rpc_url(port)
            }
        };

        Url::parse(&url).map_err(|e| ScriptError::Config(format!("invalid RPC url {url}: {e}")))
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The RPC url of a node listening locally on the given port
fn local_rpc_url(port: u16) -> String {
    format!("{LOCAL_HOST}:{port}/{LOCAL_RPC_PATH}")
}

/// Everything needed to connect & sign for one network, fixed for the
/// lifetime of the process
#[derive(Clone)]
pub struct NetworkProfile {
    /// The target network
    pub network: Network,
    /// The JSON-RPC endpoint
    pub rpc_url: Url,
    /// The chain ID transactions are signed for
    pub chain_id: Felt,
    /// The address of the account sending transactions
    pub account_address: Felt,
    /// The private key of the account
    pub private_key: Felt,
}

impl NetworkProfile {
    /// Build the profile from the process environment.
    ///
    /// `rpc_url` overrides the network's default endpoint when given.
    pub fn from_env(
        network: Network,
        port: Option<u16>,
        rpc_url: Option<&str>,
    ) -> Result<Self, ScriptError> {
        Self::from_lookup(network, port, rpc_url, |key| env::var(key).ok())
    }

    /// Build the profile, reading credentials through `lookup`
    pub fn from_lookup(
        network: Network,
        port: Option<u16>,
        rpc_url: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ScriptError> {
        let rpc_url = match rpc_url {
            Some(url) => Url::parse(url)
                .map_err(|e| ScriptError::Config(format!("invalid RPC url {url}: {e}")))?,
            None => network.rpc_url(port)?,
        };

        let account_address = resolve_felt(&lookup, network, ACCOUNT_ADDRESS_ENV_VAR)?;
        let private_key = resolve_felt(&lookup, network, PRIVATE_KEY_ENV_VAR)?;

        Ok(NetworkProfile {
            network,
            rpc_url,
            chain_id: network.chain_id(),
            account_address,
            private_key,
        })
    }
}

impl Debug for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkProfile")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url.as_str())
            .field("chain_id", &self.chain_id.to_hex_string())
            .field("account_address", &self.account_address.to_hex_string())
            .finish_non_exhaustive()
    }
}

/// Resolve `<NETWORK>_<var>`, falling back to `<var>`, and parse it as a felt
fn resolve_felt(
    lookup: &impl Fn(&str) -> Option<String>,
    network: Network,
    var: &str,
) -> Result<Felt, ScriptError> {
    let scoped = format!("{}_{}", network.name().to_uppercase(), var);
    let value = match lookup(&scoped) {
        Some(value) => value,
        None => {
            warn!("{scoped} not set, defaulting to {var}");
            lookup(var).ok_or_else(|| {
                ScriptError::Config(format!("neither {scoped} nor {var} is set"))
            })?
        }
    };

    parse_felt(&value).map_err(|e| ScriptError::Config(format!("{scoped}: {e}")))
}

// ----------------------
// | SCRIPT INPUT FILES |
// ----------------------

/// Read a JSON configuration file
pub fn read_json_config<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let file = File::open(path)
        .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))
}

/// The currencies & pairs the oracle is deployed with or extended by
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OracleConfig {
    /// Currencies to register
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
    /// Pairs to register
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
    /// Already registered pairs whose definition changes
    #[serde(default)]
    pub pairs_to_update: Vec<PairConfig>,
}

/// A currency entry of an [`OracleConfig`]
#[derive(Clone, Debug, Deserialize)]
pub struct CurrencyConfig {
    /// The ticker, e.g. `ETH`
    pub id: String,
    /// The number of decimals
    pub decimals: u32,
    /// Whether the currency has no token contract
    #[serde(default)]
    pub is_abstract_currency: bool,
    /// The token address on Starknet
    #[serde(default = "zero_felt", with = "felt_hex")]
    pub starknet_address: Felt,
    /// The token address on Ethereum
    #[serde(default = "zero_felt", with = "felt_hex")]
    pub ethereum_address: Felt,
}

impl TryFrom<&CurrencyConfig> for Currency {
    type Error = ScriptError;

    fn try_from(config: &CurrencyConfig) -> Result<Self, Self::Error> {
        Ok(Currency {
            id: short_string(&config.id)?,
            decimals: config.decimals,
            is_abstract_currency: config.is_abstract_currency,
            starknet_address: config.starknet_address,
            ethereum_address: config.ethereum_address,
        })
    }
}

/// The default for optional token addresses
fn zero_felt() -> Felt {
    Felt::ZERO
}

/// A pair entry of an [`OracleConfig`]
#[derive(Clone, Debug, Deserialize)]
pub struct PairConfig {
    /// The pair identifier, e.g. `ETH/USD`
    pub id: String,
    /// The first currency, e.g. `ETH`
    pub quote_currency: String,
    /// The second currency, e.g. `USD`
    pub base_currency: String,
}

impl TryFrom<&PairConfig> for Pair {
    type Error = ScriptError;

    fn try_from(config: &PairConfig) -> Result<Self, Self::Error> {
        Ok(Pair {
            id: short_string(&config.id)?,
            quote_currency_id: short_string(&config.quote_currency)?,
            base_currency_id: short_string(&config.base_currency)?,
        })
    }
}

/// The publishers to register in the publisher registry
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PublishersConfig {
    /// The publishers, registered in order
    pub publishers: Vec<PublisherConfig>,
}

/// A publisher entry of a [`PublishersConfig`]
#[derive(Clone, Debug, Deserialize)]
pub struct PublisherConfig {
    /// The publisher name, e.g. `PRAGMA`
    pub name: String,
    /// The address the publisher signs with
    #[serde(with = "felt_hex")]
    pub address: Felt,
    /// The sources the publisher may publish for
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The tokenized vaults to register in the oracle
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenizedVaultsConfig {
    /// The vaults, registered in order
    pub vaults: Vec<TokenizedVaultConfig>,
}

/// A vault entry of a [`TokenizedVaultsConfig`]
#[derive(Clone, Debug, Deserialize)]
pub struct TokenizedVaultConfig {
    /// The vault's conversion rate identifier, e.g. `CONVERSION_XLBTC`
    pub name: String,
    /// The ticker of the underlying token, e.g. `BTC`
    pub underlying_token: String,
    /// The vault's token address
    #[serde(with = "felt_hex")]
    pub address: Felt,
}
