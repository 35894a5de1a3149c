use std::collections::BTreeMap;

/// Block-explorer API endpoint of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Network {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
        }
    }
}

/// Maps network identifiers to explorer endpoints. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkTable {
    networks: BTreeMap<String, Network>,
}

impl NetworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The supported public networks, with API keys read from the environment.
    pub fn from_env() -> Self {
        Self::with_keys(|var| std::env::var(var).ok())
    }

    /// The supported public networks, with API keys supplied by `key`, which receives the name
    /// of the environment variable conventionally holding each key.
    pub fn with_keys(key: impl Fn(&str) -> Option<String>) -> Self {
        const ARBISCAN: &str = "ARBISCAN_API_KEY";
        const ETHERSCAN: &str = "ETHERSCAN_API_KEY";
        const POLYGONSCAN: &str = "POLYGONSCAN_API_KEY";
        const OPTIMISM: &str = "OPTIMISM_SCAN_API_KEY";

        [
            ("arbitrum", "https://api.arbiscan.io/api", ARBISCAN),
            ("arbitrum-sepolia", "https://api-sepolia.arbiscan.io/api", ARBISCAN),
            ("mainnet", "https://api.etherscan.io/api", ETHERSCAN),
            ("sepolia", "https://api-sepolia.etherscan.io/api", ETHERSCAN),
            ("goerli", "https://api-goerli.etherscan.io/api", ETHERSCAN),
            ("polygon", "https://api.polygonscan.com/api", POLYGONSCAN),
            ("optimism", "https://api-optimistic.etherscan.io/api", OPTIMISM),
        ]
        .into_iter()
        .fold(Self::new(), |table, (id, url, var)| {
            table.with(id, Network::new(url, key(var)))
        })
    }

    pub fn with(mut self, id: &str, network: Network) -> Self {
        self.insert(id, network);
        self
    }

    pub fn insert(&mut self, id: &str, network: Network) {
        self.networks.insert(id.to_lowercase(), network);
    }

    pub fn get(&self, id: &str) -> Option<&Network> {
        self.networks.get(&id.to_lowercase())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }
}
