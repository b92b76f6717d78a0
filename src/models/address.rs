//! IP address with an associated prefix length.
//!
//! Provides [`Address`] plus the tagged inputs it is built from
//! ([`AddressInput`], [`NetmaskInput`]).

use super::netmask::{checked_prefix_len, mask_bits, resolve_netmask_text};
use super::IpVersion;
use crate::error::ValueError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex splitting `address[/suffix]` literals.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| Regex::new(r"^([^/\s]+)(?:/([^/\s]+))?$").expect("Invalid Regex"))
}

/// Split a literal into its address part and optional `/suffix`.
fn split_literal(text: &str) -> Result<(&str, Option<&str>), ValueError> {
    let caps = get_cidr_regex()
        .captures(text)
        .ok_or_else(|| ValueError::new(format!("Invalid IP address specified: {text}")))?;
    let addr = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let suffix = caps.get(2).map(|m| m.as_str());
    Ok((addr, suffix))
}

/// Parse an address literal (no suffix) to its numeric value.
fn parse_value(text: &str, version: IpVersion) -> Result<u128, ValueError> {
    let parsed = match version {
        IpVersion::V4 => Ipv4Addr::from_str(text).map(|ip| u32::from(ip) as u128),
        IpVersion::V6 => Ipv6Addr::from_str(text).map(u128::from),
    };
    parsed.map_err(|_| ValueError::new(format!("Invalid IP address specified: {text}")))
}

/// Anything an [`Address`] can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressInput {
    /// Raw numeric address.
    Integer(u128),
    /// `a.b.c.d`, `a.b.c.d/len` or `a.b.c.d/netmask` (colon-hex for IPv6).
    Text(String),
    /// Copy of an existing address, prefix length included.
    Value(Address),
}

impl From<u32> for AddressInput {
    fn from(value: u32) -> Self {
        AddressInput::Integer(value as u128)
    }
}

impl From<u128> for AddressInput {
    fn from(value: u128) -> Self {
        AddressInput::Integer(value)
    }
}

impl From<&str> for AddressInput {
    fn from(text: &str) -> Self {
        AddressInput::Text(text.to_string())
    }
}

impl From<String> for AddressInput {
    fn from(text: String) -> Self {
        AddressInput::Text(text)
    }
}

impl From<&String> for AddressInput {
    fn from(text: &String) -> Self {
        AddressInput::Text(text.clone())
    }
}

impl From<Address> for AddressInput {
    fn from(address: Address) -> Self {
        AddressInput::Value(address)
    }
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        AddressInput::Value(*address)
    }
}

impl From<IpAddr> for AddressInput {
    fn from(ip: IpAddr) -> Self {
        AddressInput::Value(Address::from(ip))
    }
}

impl From<Ipv4Addr> for AddressInput {
    fn from(ip: Ipv4Addr) -> Self {
        AddressInput::Value(Address::from(ip))
    }
}

/// Explicit netmask argument: a prefix length or a netmask literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetmaskInput {
    PrefixLen(u8),
    /// Dotted netmask, or a decimal prefix length as text.
    Text(String),
}

impl From<u8> for NetmaskInput {
    fn from(len: u8) -> Self {
        NetmaskInput::PrefixLen(len)
    }
}

impl From<&str> for NetmaskInput {
    fn from(text: &str) -> Self {
        NetmaskInput::Text(text.to_string())
    }
}

impl From<String> for NetmaskInput {
    fn from(text: String) -> Self {
        NetmaskInput::Text(text)
    }
}

impl NetmaskInput {
    fn prefix_len(&self, version: IpVersion) -> Result<u8, ValueError> {
        match self {
            NetmaskInput::PrefixLen(len) => checked_prefix_len(*len as u32, version),
            NetmaskInput::Text(text) => resolve_netmask_text(text, version),
        }
    }
}

/// IP address with a CIDR prefix length.
///
/// Equality, ordering and hashing only look at the numeric value, so
/// `10.0.0.1/24` and `10.0.0.1/8` are equal.
#[derive(Debug, Copy, Clone)]
pub struct Address {
    value: u128,
    prefix_len: u8,
    version: IpVersion,
}

impl Address {
    /// Build an address, inferring the version from the input.
    ///
    /// Integers are IPv4; text containing `:` is IPv6.
    ///
    /// # Examples
    /// ```
    /// use ipcalc::models::Address;
    /// let a = Address::new("192.168.1.10/24").unwrap();
    /// assert_eq!(a.dq(), "192.168.1.10");
    /// assert_eq!(a.prefix_len(), 24);
    /// ```
    pub fn new(input: impl Into<AddressInput>) -> Result<Address, ValueError> {
        Self::resolve(input.into(), None, None)
    }

    /// Build an address with an explicit netmask, which overrides any `/suffix`.
    pub fn with_netmask(
        input: impl Into<AddressInput>,
        netmask: impl Into<NetmaskInput>,
    ) -> Result<Address, ValueError> {
        Self::resolve(input.into(), Some(netmask.into()), None)
    }

    /// Build an address for an explicit version.
    pub fn build(
        input: impl Into<AddressInput>,
        netmask: Option<NetmaskInput>,
        version: IpVersion,
    ) -> Result<Address, ValueError> {
        Self::resolve(input.into(), netmask, Some(version))
    }

    /// Netmask of the given prefix length as an address.
    pub fn netmask_of(prefix_len: u8, version: IpVersion) -> Result<Address, ValueError> {
        let len = checked_prefix_len(prefix_len as u32, version)?;
        Ok(Address::from_parts(
            mask_bits(len, version),
            version.width(),
            version,
        ))
    }

    /// Assemble an address whose value is already known to fit the version.
    pub(crate) fn from_parts(value: u128, prefix_len: u8, version: IpVersion) -> Address {
        debug_assert!(value <= version.max_value());
        debug_assert!(prefix_len <= version.width());
        Address {
            value,
            prefix_len,
            version,
        }
    }

    fn resolve(
        input: AddressInput,
        netmask: Option<NetmaskInput>,
        version: Option<IpVersion>,
    ) -> Result<Address, ValueError> {
        let mut address = match input {
            AddressInput::Value(address) => address,
            AddressInput::Integer(value) => {
                let version = version.unwrap_or_default();
                if value > version.max_value() {
                    return Err(ValueError::new(format!(
                        "Integer {value} is out of range for {version}"
                    )));
                }
                Address::from_parts(value, version.width(), version)
            }
            AddressInput::Text(text) => Self::parse_text(&text, version, netmask.is_none())?,
        };

        if let Some(netmask) = netmask {
            address.prefix_len = netmask.prefix_len(address.version)?;
        }

        log::trace!(
            "Resolved address {}/{} ({})",
            address.dq(),
            address.prefix_len,
            address.version
        );
        Ok(address)
    }

    /// Parse `address[/suffix]`. With `use_suffix` off the suffix is skipped
    /// unchecked, as an explicit netmask replaces it.
    fn parse_text(
        text: &str,
        version: Option<IpVersion>,
        use_suffix: bool,
    ) -> Result<Address, ValueError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValueError::new("Invalid IP address specified"));
        }
        let (addr_text, suffix) = split_literal(text)?;
        let version = version.unwrap_or(if addr_text.contains(':') {
            IpVersion::V6
        } else {
            IpVersion::V4
        });

        let value = parse_value(addr_text, version)?;
        // No netmask given: assume a single host.
        let prefix_len = match suffix {
            Some(suffix) if use_suffix => resolve_netmask_text(suffix, version)?,
            _ => version.width(),
        };
        Ok(Address::from_parts(value, prefix_len, version))
    }

    /// The address as an unsigned integer.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// The canonical text form (dotted-quad for IPv4).
    pub fn dq(&self) -> String {
        self.to_ip_addr().to_string()
    }

    /// The CIDR prefix length.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Alias of [`Address::prefix_len`].
    pub fn subnet(&self) -> u8 {
        self.prefix_len
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.version {
            IpVersion::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            IpVersion::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }

    /// Same address with a different prefix length.
    pub fn with_prefix_len(&self, prefix_len: u8) -> Result<Address, ValueError> {
        let prefix_len = checked_prefix_len(prefix_len as u32, self.version)?;
        Ok(Address::from_parts(self.value, prefix_len, self.version))
    }

    pub fn is_lt(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        Ok(self.value < Address::new(other)?.value)
    }

    pub fn is_le(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        Ok(self.value <= Address::new(other)?.value)
    }

    pub fn is_gt(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        Ok(self.value > Address::new(other)?.value)
    }

    pub fn is_ge(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        Ok(self.value >= Address::new(other)?.value)
    }

    pub fn is_eq(&self, other: impl Into<AddressInput>) -> Result<bool, ValueError> {
        Ok(self.value == Address::new(other)?.value)
    }

    /// Address `offset` steps above this one, same prefix length and version.
    ///
    /// Fails when the result leaves the address space of the version.
    pub fn add(&self, offset: i128) -> Result<Address, ValueError> {
        self.offset_by(offset)
    }

    /// Address `offset` steps below this one, same prefix length and version.
    pub fn sub(&self, offset: i128) -> Result<Address, ValueError> {
        let offset = offset
            .checked_neg()
            .ok_or_else(|| ValueError::new("Address offset out of range"))?;
        self.offset_by(offset)
    }

    fn offset_by(&self, offset: i128) -> Result<Address, ValueError> {
        let value = if offset >= 0 {
            self.value.checked_add(offset as u128)
        } else {
            self.value.checked_sub(offset.unsigned_abs())
        };
        match value.filter(|v| *v <= self.version.max_value()) {
            Some(value) => Ok(Address::from_parts(value, self.prefix_len, self.version)),
            None => {
                log::warn!("Offset {offset} from {} leaves the {} range", self, self.version);
                Err(ValueError::new("Address offset out of range"))
            }
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::from_parts(u32::from(ip) as u128, 32, IpVersion::V4)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::from_parts(u128::from(ip), 128, IpVersion::V6)
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(ip) => Address::from(ip),
            IpAddr::V6(ip) => Address::from(ip),
        }
    }
}

impl FromStr for Address {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::new(s)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        self.value == other.value
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.dq(), self.prefix_len);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::new(s.as_str())
            .map_err(|e| de::Error::custom(format!("invalid address {s}: {e}")))
    }
}
