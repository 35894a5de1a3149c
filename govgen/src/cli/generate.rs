use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context};
use clap::Args;
use govgen::{generate, persist, ErrorResponse, GenerateError, GenerateResponse};
use govgen_config::ConfigError;

use super::print_json;

#[derive(Args)]
pub struct Generate {
    /// Path to the JSON configuration document
    config: PathBuf,

    #[arg(
        short,
        long,
        env = "CONTRACT_OUTPUT_DIR",
        help = "Directory to write the generated .sol files to; nothing is written when unset"
    )]
    out_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Generate {
    pub fn execute(&self) -> anyhow::Result<()> {
        let source = fs::read_to_string(&self.config)
            .with_context(|| format!("failed to read {}", self.config.display()))?;

        let (config, artifacts) = match generate(&source) {
            Ok(generated) => generated,
            Err(err @ GenerateError::Config(ConfigError::Malformed(_))) => {
                return Err(err).with_context(|| format!("failed to parse {}", self.config.display()));
            }
            Err(err) => {
                print_json(&ErrorResponse { errors: err.field_errors() }, self.pretty)?;
                return Err(anyhow!("{} could not be generated", self.config.display()));
            }
        };

        let file_paths = match &self.out_dir {
            Some(dir) => Some(
                persist(dir, &config, &artifacts)
                    .with_context(|| format!("failed to write contracts to {}", dir.display()))?,
            ),
            None => None,
        };

        let response = GenerateResponse::new(&artifacts, file_paths)
            .context("generation produced no token or governance contract")?;
        print_json(&response, self.pretty)
    }
}
