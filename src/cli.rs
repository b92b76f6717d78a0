//! Command line handling for the `ipcalc` binary.

use crate::config::{Config, OutputFormat};
use crate::models::Network;
use crate::output::NetworkSummary;
use clap::Parser;
use std::error::Error;

/// IP address and CIDR network calculator.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "ipcalc")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Address, optionally with `/prefix` or `/netmask` (e.g. 10.0.0.0/8)
    pub address: String,

    /// Prefix length or netmask, overrides a `/suffix` on the address
    pub netmask: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Output format after combining the flag with the configuration.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            config.output
        }
    }

    /// Build the network named on the command line.
    pub fn network(&self) -> Result<Network, Box<dyn Error>> {
        let network = match &self.netmask {
            Some(netmask) => Network::with_netmask(self.address.as_str(), netmask.as_str())?,
            None => Network::new(self.address.as_str())?,
        };
        log::info!("Calculating {network}");
        Ok(network)
    }
}

/// Summarize the network named on the command line.
pub fn summarize(cli: &CliArgs, config: &Config) -> Result<NetworkSummary, Box<dyn Error>> {
    let network = cli.network()?;
    Ok(NetworkSummary::new(&network, config.host_limit))
}
