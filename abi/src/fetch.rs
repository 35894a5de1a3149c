use std::time::Duration;

use govgen_config::Address;
use serde::{Deserialize, Serialize};

use crate::{AbiError, NetworkTable};

const UNKNOWN_CONTRACT: &str = "Unknown Contract";

// INTERFACE DESCRIPTIONS
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

/// One entry of a contract interface description: a function, event, constructor or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<AbiInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

impl AbiEntry {
    pub fn is_function(&self) -> bool {
        self.kind == "function"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAbi {
    pub name: String,
    pub network: String,
    pub abi: Vec<AbiEntry>,
}

impl ContractAbi {
    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.abi.iter().filter(|entry| entry.is_function())
    }
}

/// Anything that can describe the interface of a deployed contract.
pub trait AbiSource {
    fn fetch(&self, network: &str, address: &str) -> Result<ContractAbi, AbiError>;
}

// TRANSPORT
// ================================================================================================

/// Performs a GET request and returns the response body.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, AbiError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self, AbiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, AbiError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

// EXPLORER CLIENT
// ================================================================================================

/// Response envelope shared by the Etherscan family of explorer APIs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status: String,
    message: String,
    result: serde_json::Value,
    #[serde(default)]
    contract_name: Option<String>,
}

/// Fetches verified contract interfaces from block explorers.
pub struct ExplorerClient<T = HttpTransport> {
    networks: NetworkTable,
    transport: T,
}

impl ExplorerClient<HttpTransport> {
    pub fn new(networks: NetworkTable) -> Result<Self, AbiError> {
        Ok(Self::with_transport(networks, HttpTransport::new()?))
    }
}

impl<T: Transport> ExplorerClient<T> {
    pub fn with_transport(networks: NetworkTable, transport: T) -> Self {
        Self {
            networks,
            transport,
        }
    }

    fn parse(network: &str, body: &str) -> Result<ContractAbi, AbiError> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|err| AbiError::MalformedAbi(format!("unexpected response: {err}")))?;

        if envelope.status == "0" || envelope.message == "NOTOK" {
            let reason = match envelope.result {
                serde_json::Value::String(text) if !text.is_empty() => text,
                _ => "failed to fetch contract ABI".to_string(),
            };
            return Err(AbiError::Api(reason));
        }

        let abi = match &envelope.result {
            serde_json::Value::String(text) => serde_json::from_str(text),
            other => Vec::<AbiEntry>::deserialize(other),
        }
        .map_err(|err| AbiError::MalformedAbi(err.to_string()))?;

        Ok(ContractAbi {
            name: envelope
                .contract_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_CONTRACT.to_string()),
            network: network.to_string(),
            abi,
        })
    }
}

impl<T: Transport> AbiSource for ExplorerClient<T> {
    fn fetch(&self, network: &str, address: &str) -> Result<ContractAbi, AbiError> {
        let endpoint = self
            .networks
            .get(network)
            .ok_or_else(|| AbiError::UnsupportedNetwork(network.to_string()))?;
        if !Address::is_valid(address) {
            return Err(AbiError::InvalidAddress(address.to_string()));
        }

        let mut query = vec![
            ("module", "contract"),
            ("action", "getabi"),
            ("address", address),
        ];
        if let Some(key) = &endpoint.api_key {
            query.push(("apikey", key.as_str()));
        }

        log::debug!("fetching the interface of {address} from {}", endpoint.api_url);
        let body = self.transport.get(&endpoint.api_url, &query)?;
        let abi = Self::parse(network, &body)?;
        log::info!("fetched {} entries for {} on {network}", abi.abi.len(), abi.name);
        Ok(abi)
    }
}
