//! IP address and CIDR network calculations.
//!
//! The library is built around two value types:
//! - [`models::Address`] - an IP address with a prefix length, built from
//!   dotted-quad, CIDR, integer or dotted netmask input
//! - [`models::Network`] - netmask, network, broadcast, host bounds, overlap
//!   tests and host enumeration on top of an address
//!
//! # Example
//! ```
//! use ipcalc::models::Network;
//!
//! let net = Network::new("192.168.1.0/24").unwrap();
//! assert_eq!(net.broadcast().dq(), "192.168.1.255");
//! assert_eq!(net.size(), 256);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;

pub use error::ValueError;
pub use models::{Address, IpVersion, Network};
