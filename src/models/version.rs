//! IP protocol version.

use crate::error::ValueError;
use serde::Serialize;
use std::fmt;

/// IP protocol version of an [`Address`](super::Address).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IpVersion {
    #[default]
    V4,
    V6,
}

impl IpVersion {
    /// Width of an address in bits (32 or 128).
    pub const fn width(self) -> u8 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }

    /// Largest numeric value an address of this version can hold.
    pub const fn max_value(self) -> u128 {
        match self {
            IpVersion::V4 => u32::MAX as u128,
            IpVersion::V6 => u128::MAX,
        }
    }

    /// Protocol number, 4 or 6.
    pub const fn number(self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

impl TryFrom<u8> for IpVersion {
    type Error = ValueError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            4 => Ok(IpVersion::V4),
            6 => Ok(IpVersion::V6),
            other => Err(ValueError::new(format!(
                "Invalid IP version specified: {other}"
            ))),
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_try_from() {
        assert_eq!(IpVersion::try_from(4u8).unwrap(), IpVersion::V4);
        assert_eq!(IpVersion::try_from(6u8).unwrap(), IpVersion::V6);
        assert_eq!(
            IpVersion::try_from(5u8).unwrap_err().to_string(),
            "Invalid IP version specified: 5"
        );
    }

    #[test]
    fn test_version_bounds() {
        assert_eq!(IpVersion::V4.width(), 32);
        assert_eq!(IpVersion::V6.width(), 128);
        assert_eq!(IpVersion::V4.max_value(), 4294967295);
        assert_eq!(IpVersion::V6.max_value(), u128::MAX);
        assert_eq!(IpVersion::default().to_string(), "IPv4");
    }
}
