//! Client configuration, loaded from TOML.
//!
//! ```toml
//! cluster = "mainnet-beta"
//! endpoint = "https://my-rpc.example.com"   # optional, overrides cluster
//! commitment = "confirmed"
//! skip_preflight = false
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

/// Public clusters plus a local test validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[serde(alias = "mainnet")]
    MainnetBeta,
    #[default]
    Devnet,
    Testnet,
    #[serde(alias = "localhost")]
    Localnet,
}

impl Cluster {
    pub fn api_url(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Localnet => "localnet",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(ClientError::Config(format!("unknown cluster {other:?}"))),
        }
    }
}

/// How settled a block must be before the node reports on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    #[default]
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub cluster: Cluster,
    /// Explicit RPC URL; takes precedence over `cluster`.
    pub endpoint: Option<String>,
    pub commitment: Commitment,
    pub skip_preflight: bool,
}

impl ClientConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ClientError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            cluster = %config.cluster,
            commitment = %config.commitment,
            "loaded client config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };
        let url = Url::parse(endpoint)
            .map_err(|err| ClientError::Config(format!("invalid endpoint {endpoint:?}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
            return Err(ClientError::Config(format!(
                "endpoint must be an http(s) url with a host, got {endpoint:?}"
            )));
        }
        Ok(())
    }

    /// The URL requests go to.
    pub fn endpoint_url(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(self.cluster.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.commitment, Commitment::Finalized);
        assert!(!config.skip_preflight);
        assert_eq!(config.endpoint_url(), "https://api.devnet.solana.com");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = ClientConfig::from_toml_str(
            r#"
            cluster = "mainnet"
            commitment = "confirmed"
            skip_preflight = true
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster, Cluster::MainnetBeta);
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert!(config.skip_preflight);
        assert_eq!(config.endpoint_url(), "https://api.mainnet-beta.solana.com");
    }

    #[test]
    fn endpoint_overrides_cluster() {
        let config = ClientConfig::from_toml_str(
            r#"
            cluster = "localhost"
            endpoint = "http://10.0.0.5:8899"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster, Cluster::Localnet);
        assert_eq!(config.endpoint_url(), "http://10.0.0.5:8899");
    }

    #[test]
    fn rejects_bad_endpoint() {
        for endpoint in [
            "ftp://example.com",
            "http://",
            "https://exa mple.com",
            "http://:::",
            "not a url",
        ] {
            let toml = format!("endpoint = {endpoint:?}");
            assert!(
                matches!(ClientConfig::from_toml_str(&toml), Err(ClientError::Config(_))),
                "accepted {endpoint:?}"
            );
        }
    }

    #[test]
    fn accepts_endpoint_with_port_and_path() {
        let config =
            ClientConfig::from_toml_str(r#"endpoint = "http://127.0.0.1:8899/rpc""#).unwrap();
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:8899/rpc");
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(matches!(
            ClientConfig::from_toml_str(r#"cluster = "moonnet""#),
            Err(ClientError::ConfigParse(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str(r#"retries = 3"#),
            Err(ClientError::ConfigParse(_))
        ));
    }

    #[test]
    fn cluster_from_str() {
        assert_eq!("mainnet-beta".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert_eq!("mainnet".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert_eq!("devnet".parse::<Cluster>().unwrap(), Cluster::Devnet);
        assert_eq!("testnet".parse::<Cluster>().unwrap(), Cluster::Testnet);
        assert_eq!("localhost".parse::<Cluster>().unwrap(), Cluster::Localnet);
        assert!("moonnet".parse::<Cluster>().is_err());
    }

    #[test]
    fn cluster_urls() {
        assert_eq!(Cluster::Testnet.api_url(), "https://api.testnet.solana.com");
        assert_eq!(Cluster::Localnet.api_url(), "http://127.0.0.1:8899");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "cluster = \"testnet\"\n").unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap().cluster, Cluster::Testnet);

        assert!(matches!(
            ClientConfig::load(dir.path().join("missing.toml")),
            Err(ClientError::Io(_))
        ));
    }
}
