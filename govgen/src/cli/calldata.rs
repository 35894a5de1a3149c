use anyhow::Context;
use clap::Args;
use govgen::abi::encode_call;

use super::print_json;

#[derive(Args)]
pub struct Calldata {
    /// Address of the contract the proposal calls
    #[arg(long)]
    contract: String,

    /// Name of the function to call
    #[arg(long)]
    function: String,

    /// Parameter type, optionally followed by its name; repeat once per parameter
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Argument value, in parameter order; arrays are given as JSON
    #[arg(long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Calldata {
    pub fn execute(&self) -> anyhow::Result<()> {
        let call = encode_call(&self.contract, &self.function, &self.types, &self.args)
            .with_context(|| format!("failed to encode a call to `{}`", self.function))?;
        print_json(&call, self.pretty)
    }
}
