//! CIDR network built on top of [`Address`].
//!
//! Provides [`Network`] with netmask, network, broadcast and host bound
//! calculations, plus the overlap test and host enumeration.

use super::hosts::Hosts;
use super::netmask::mask_bits;
use super::{Address, AddressInput, IpVersion, NetmaskInput};
use crate::error::ValueError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A network given by an address and prefix length.
///
/// The address does not have to be the network address: `192.168.1.10/24`
/// is kept as is and [`Network::network`] derives `192.168.1.0`.
#[derive(Debug, Copy, Clone)]
pub struct Network {
    address: Address,
}

impl Network {
    /// Create a new [`Network`] from a CIDR string (e.g. "10.0.0.0/24"), an
    /// integer or an existing address.
    pub fn new(input: impl Into<AddressInput>) -> Result<Network, ValueError> {
        Ok(Network {
            address: Address::new(input)?,
        })
    }

    /// Create a network with an explicit netmask or prefix length.
    pub fn with_netmask(
        input: impl Into<AddressInput>,
        netmask: impl Into<NetmaskInput>,
    ) -> Result<Network, ValueError> {
        Ok(Network {
            address: Address::with_netmask(input, netmask)?,
        })
    }

    /// Create a network for an explicit version.
    pub fn build(
        input: impl Into<AddressInput>,
        netmask: Option<NetmaskInput>,
        version: IpVersion,
    ) -> Result<Network, ValueError> {
        Ok(Network {
            address: Address::build(input, netmask, version)?,
        })
    }

    /// The address this network was built from.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn value(&self) -> u128 {
        self.address.value()
    }

    pub fn dq(&self) -> String {
        self.address.dq()
    }

    pub fn prefix_len(&self) -> u8 {
        self.address.prefix_len()
    }

    pub fn subnet(&self) -> u8 {
        self.address.subnet()
    }

    pub fn version(&self) -> IpVersion {
        self.address.version()
    }

    fn width(&self) -> u8 {
        self.version().width()
    }

    /// Wrap a derived value as a single host address.
    fn host(&self, value: u128) -> Address {
        Address::from_parts(value, self.width(), self.version())
    }

    pub fn netmask_value(&self) -> u128 {
        mask_bits(self.prefix_len(), self.version())
    }

    /// The netmask as an address (e.g. `255.255.255.0`).
    pub fn netmask(&self) -> Address {
        self.host(self.netmask_value())
    }

    pub fn network_value(&self) -> u128 {
        self.value() & self.netmask_value()
    }

    /// The network address, all host bits cleared.
    pub fn network(&self) -> Address {
        self.host(self.network_value())
    }

    pub fn broadcast_value(&self) -> u128 {
        self.network_value() | (self.version().max_value() - self.netmask_value())
    }

    /// The broadcast address, all host bits set.
    pub fn broadcast(&self) -> Address {
        self.host(self.broadcast_value())
    }

    /// Number of addresses in the block, network and broadcast included.
    ///
    /// Saturates at `u128::MAX` for an IPv6 `/0`.
    pub fn size(&self) -> u128 {
        let host_bits = (self.width() - self.prefix_len()) as u32;
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// First usable host.
    ///
    /// Point to point (`/31`) and single host (`/32`) networks return their
    /// own address.
    pub fn first_host(&self) -> Address {
        if self.prefix_len() > self.width() - 2 {
            self.address
        } else {
            self.host(self.network_value() + 1)
        }
    }

    /// Last usable host.
    ///
    /// A `/32` returns its own address and a `/31` the address after it. This
    /// fails only for a `/31` at the very top of the address space.
    pub fn last_host(&self) -> Result<Address, ValueError> {
        let width = self.width();
        if self.prefix_len() == width {
            Ok(self.address)
        } else if self.prefix_len() == width - 1 {
            Ok(self.address.add(1)?.with_prefix_len(width)?)
        } else {
            Ok(self.host(self.broadcast_value() - 1))
        }
    }

    /// True when `other` overlaps this network in either direction.
    ///
    /// Networks that share only a boundary address also collide. Networks of
    /// different versions never do.
    pub fn check_collision(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        let other = Network::new(other)?;
        if other.version() != self.version() {
            log::debug!("{} and {} differ in version, no collision", self, other);
            return Ok(false);
        }
        let (net, bcast) = (self.network_value(), self.broadcast_value());
        let (other_net, other_bcast) = (other.network_value(), other.broadcast_value());

        Ok((net <= other_net && other_net <= bcast) || (other_net <= net && net <= other_bcast))
    }

    /// Same as [`Network::check_collision`]: overlap, not strict containment.
    pub fn contains(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.check_collision(other)
    }

    /// True when `other` lies entirely inside this network.
    pub fn is_supernet_of(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        let other = Network::new(other)?;
        Ok(other.version() == self.version()
            && self.network_value() <= other.network_value()
            && other.broadcast_value() <= self.broadcast_value())
    }

    /// Fresh cursor over offsets `1..=size()` from the network address.
    pub fn hosts(&self) -> Hosts {
        Hosts::new(self)
    }

    pub fn is_lt(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.address.is_lt(other)
    }

    pub fn is_le(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.address.is_le(other)
    }

    pub fn is_gt(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.address.is_gt(other)
    }

    pub fn is_ge(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.address.is_ge(other)
    }

    pub fn is_eq(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        self.address.is_eq(other)
    }

    pub fn add(&self, offset: i128) -> Result<Address, ValueError> {
        self.address.add(offset)
    }

    pub fn sub(&self, offset: i128) -> Result<Address, ValueError> {
        self.address.sub(offset)
    }
}

impl From<Address> for Network {
    fn from(address: Address) -> Self {
        Network { address }
    }
}

impl From<Network> for AddressInput {
    fn from(network: Network) -> Self {
        AddressInput::Value(network.address)
    }
}

impl From<&Network> for AddressInput {
    fn from(network: &Network) -> Self {
        AddressInput::Value(network.address)
    }
}

impl AsRef<Address> for Network {
    fn as_ref(&self) -> &Address {
        &self.address
    }
}

impl<'a> IntoIterator for &'a Network {
    type Item = Address;
    type IntoIter = Hosts;

    fn into_iter(self) -> Hosts {
        self.hosts()
    }
}

impl FromStr for Network {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::new(s)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len())
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Network) -> bool {
        self.value() == other.value() && self.prefix_len() == other.prefix_len()
    }
}

impl Eq for Network {}

impl Hash for Network {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
        self.prefix_len().hash(state);
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Network {
    fn cmp(&self, other: &Network) -> Ordering {
        self.value()
            .cmp(&other.value())
            .then_with(|| self.prefix_len().cmp(&other.prefix_len()))
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::new(s.as_str())
            .map_err(|e| de::Error::custom(format!("invalid CIDR format {s}: {e}")))
    }
}
