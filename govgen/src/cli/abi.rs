use anyhow::Context;
use clap::Args;
use govgen::abi::{AbiSource, ExplorerClient, NetworkTable};

use super::print_json;

#[derive(Args)]
pub struct Abi {
    /// Network the contract is deployed on, e.g. mainnet or arbitrum
    #[arg(long)]
    network: String,

    /// Address of the verified contract
    #[arg(long)]
    address: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Abi {
    pub fn execute(&self) -> anyhow::Result<()> {
        let client = ExplorerClient::new(NetworkTable::from_env())
            .context("failed to initialize the explorer client")?;
        let abi = client
            .fetch(&self.network, &self.address)
            .with_context(|| format!("failed to fetch the interface of {}", self.address))?;
        print_json(&abi, self.pretty)
    }
}
