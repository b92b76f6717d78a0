//! Domain models for IP address calculations.
//!
//! This module contains the core value types:
//! - [`Address`] - IP address with a CIDR prefix length
//! - [`Network`] - CIDR network with derived netmask, broadcast and hosts
//! - [`Hosts`] - cursor over the addresses of a network
//! - netmask helpers for validity checks and prefix conversion

mod address;
mod hosts;
mod netmask;
mod network;
mod version;

// Re-export public types
pub use address::{Address, AddressInput, NetmaskInput};
pub use hosts::Hosts;
pub use netmask::{mask_text_to_prefix, mask_to_prefix, prefix_to_mask, valid_netmask};
pub use network::Network;
pub use version::IpVersion;
