//! Netmask validation and netmask / prefix length conversion.
//!
//! All values are carried as `u128` so the same functions serve IPv4 (low 32
//! bits used) and IPv6.

use super::IpVersion;
use crate::error::ValueError;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::num::IntErrorKind;

/// Error returned for a prefix length outside the version bound.
pub(crate) fn prefix_len_error(version: IpVersion) -> ValueError {
    ValueError::new(format!(
        "{version} subnet size must be between 0 and {}",
        version.width()
    ))
}

/// Check that `len` fits the version and narrow it to `u8`.
pub(crate) fn checked_prefix_len(len: u32, version: IpVersion) -> Result<u8, ValueError> {
    if len > version.width() as u32 {
        Err(prefix_len_error(version))
    } else {
        Ok(len as u8)
    }
}

/// Convert a prefix length to a netmask value.
///
/// # Examples
/// ```
/// use ipcalc::models::{prefix_to_mask, IpVersion};
/// assert_eq!(prefix_to_mask(24, IpVersion::V4).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_to_mask(len: u8, version: IpVersion) -> Result<u128, ValueError> {
    checked_prefix_len(len as u32, version)?;
    Ok(mask_bits(len, version))
}

/// Netmask for a prefix length already known to be in range.
pub(crate) fn mask_bits(len: u8, version: IpVersion) -> u128 {
    let right_len = (version.width() - len) as u32;
    let all_bits = version.max_value();

    all_bits
        .checked_shr(right_len)
        .and_then(|bits| bits.checked_shl(right_len))
        .unwrap_or(0)
}

/// True when the one bits of `mask` form a single run from the top bit.
///
/// The complement of a contiguous mask is `2^k - 1`, so adding one to it
/// leaves no bit in common with it. `0` and all-ones are both valid.
pub fn valid_netmask(mask: u128, version: IpVersion) -> bool {
    let max = version.max_value();
    if mask > max {
        return false;
    }
    let neg = !mask & max;
    (neg.wrapping_add(1) & neg) == 0
}

/// Parse `text` as a netmask literal of the given version.
///
/// Returns `None` unless the text is an address literal that is also a
/// contiguous mask.
pub(crate) fn parse_netmask(text: &str, version: IpVersion) -> Option<u128> {
    let text = text.trim();
    let mask = match version {
        IpVersion::V4 => text.parse::<Ipv4Addr>().ok().map(|m| u32::from(m) as u128),
        IpVersion::V6 => text.parse::<Ipv6Addr>().ok().map(u128::from),
    }?;
    valid_netmask(mask, version).then_some(mask)
}

/// Count set bits in a 32 bit value with a parallel reduction.
pub(crate) fn count_set_bits(int: u32) -> u32 {
    let mut int = int;
    int = (int & 0x5555_5555) + ((int >> 1) & 0x5555_5555);
    int = (int & 0x3333_3333) + ((int >> 2) & 0x3333_3333);
    int = (int & 0x0f0f_0f0f) + ((int >> 4) & 0x0f0f_0f0f);
    int = (int & 0x00ff_00ff) + ((int >> 8) & 0x00ff_00ff);
    int = (int & 0x0000_ffff) + ((int >> 16) & 0x0000_ffff);
    int & 0x0000_003f
}

/// Count set bits in a 128 bit value, one 32 bit lane at a time.
pub(crate) fn count_set_bits_wide(value: u128) -> u32 {
    (0..4)
        .map(|lane| count_set_bits((value >> (lane * 32)) as u32))
        .sum()
}

/// Convert a netmask value to its prefix length.
pub fn mask_to_prefix(mask: u128, version: IpVersion) -> Result<u8, ValueError> {
    if !valid_netmask(mask, version) {
        return Err(ValueError::new("Invalid netmask"));
    }
    let bits = match version {
        IpVersion::V4 => count_set_bits(mask as u32),
        IpVersion::V6 => count_set_bits_wide(mask),
    };
    Ok(bits as u8)
}

/// Convert a netmask literal (e.g. `255.255.240.0`) to its prefix length.
pub fn mask_text_to_prefix(text: &str, version: IpVersion) -> Result<u8, ValueError> {
    match parse_netmask(text, version) {
        Some(mask) => mask_to_prefix(mask, version),
        None => {
            log::debug!("Rejecting netmask '{text}' for {version}");
            Err(ValueError::new("Invalid netmask"))
        }
    }
}

/// Resolve a netmask argument given as text.
///
/// A netmask literal wins; otherwise the text must be a decimal prefix length.
/// Decimals too large for `u32` are still out of range prefix lengths.
pub(crate) fn resolve_netmask_text(text: &str, version: IpVersion) -> Result<u8, ValueError> {
    let text = text.trim();
    if let Some(mask) = parse_netmask(text, version) {
        return mask_to_prefix(mask, version);
    }
    match text.parse::<u32>() {
        Ok(len) => checked_prefix_len(len, version),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(prefix_len_error(version)),
        Err(_) => mask_text_to_prefix(text, version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(0, IpVersion::V4).unwrap(), 0x00000000);
        assert_eq!(prefix_to_mask(8, IpVersion::V4).unwrap(), 0xFF000000);
        assert_eq!(prefix_to_mask(16, IpVersion::V4).unwrap(), 0xFFFF0000);
        assert_eq!(prefix_to_mask(24, IpVersion::V4).unwrap(), 0xFFFFFF00);
        assert_eq!(prefix_to_mask(32, IpVersion::V4).unwrap(), 0xFFFFFFFF);
        assert!(prefix_to_mask(33, IpVersion::V4).is_err());
    }

    #[test]
    fn test_prefix_to_mask_v6() {
        assert_eq!(prefix_to_mask(0, IpVersion::V6).unwrap(), 0);
        assert_eq!(prefix_to_mask(128, IpVersion::V6).unwrap(), u128::MAX);
        assert_eq!(prefix_to_mask(64, IpVersion::V6).unwrap(), u128::MAX << 64);
        assert_eq!(
            prefix_to_mask(129, IpVersion::V6).unwrap_err().to_string(),
            "IPv6 subnet size must be between 0 and 128"
        );
    }

    #[test]
    fn test_valid_netmask_accepts_every_prefix() {
        for len in 0..=32 {
            let mask = prefix_to_mask(len, IpVersion::V4).unwrap();
            assert!(valid_netmask(mask, IpVersion::V4), "/{len} should be valid");
        }
        for len in 0..=128 {
            let mask = prefix_to_mask(len, IpVersion::V6).unwrap();
            assert!(valid_netmask(mask, IpVersion::V6), "/{len} should be valid");
        }
    }

    #[test]
    fn test_valid_netmask_rejects_holes() {
        // Flipping any single bit of a standard mask only yields another
        // standard mask when the flipped bit sits on the boundary.
        let standard: Vec<u128> = (0..=32)
            .map(|len| prefix_to_mask(len, IpVersion::V4).unwrap())
            .collect();
        for mask in &standard {
            for bit in 0..32 {
                let candidate = mask ^ (1u128 << bit);
                assert_eq!(
                    valid_netmask(candidate, IpVersion::V4),
                    standard.contains(&candidate),
                    "mask {candidate:#x}"
                );
            }
        }
        assert!(parse_netmask("255.0.255.0", IpVersion::V4).is_none());
        assert!(parse_netmask("255.255.255.1", IpVersion::V4).is_none());
        assert!(!valid_netmask(1u128 << 32, IpVersion::V4));
    }

    #[test]
    fn test_parse_netmask() {
        assert_eq!(
            parse_netmask("255.255.240.0", IpVersion::V4),
            Some(0xFFFFF000)
        );
        assert_eq!(parse_netmask("0.0.0.0", IpVersion::V4), Some(0));
        assert_eq!(parse_netmask("24", IpVersion::V4), None);
        assert_eq!(
            parse_netmask("ffff:ffff::", IpVersion::V6),
            Some(u128::MAX << 96)
        );
        assert_eq!(parse_netmask("ffff:ffff::", IpVersion::V4), None);
    }

    #[test]
    fn test_count_set_bits() {
        assert_eq!(count_set_bits(0), 0);
        assert_eq!(count_set_bits(u32::MAX), 32);
        assert_eq!(count_set_bits(0xFFFFF000), 20);
        assert_eq!(count_set_bits(0x8000_0001), 2);
        assert_eq!(count_set_bits_wide(u128::MAX), 128);
        assert_eq!(count_set_bits_wide(u128::MAX << 64), 64);
    }

    #[test]
    fn test_mask_prefix_round_trip() {
        for len in 0..=32 {
            let mask = prefix_to_mask(len, IpVersion::V4).unwrap();
            assert_eq!(mask_to_prefix(mask, IpVersion::V4).unwrap(), len);
        }
        for len in 0..=128 {
            let mask = prefix_to_mask(len, IpVersion::V6).unwrap();
            assert_eq!(mask_to_prefix(mask, IpVersion::V6).unwrap(), len);
        }
    }

    #[test]
    fn test_mask_to_prefix_invalid() {
        assert_eq!(
            mask_to_prefix(0xFF00FF00, IpVersion::V4)
                .unwrap_err()
                .to_string(),
            "Invalid netmask"
        );
        assert_eq!(
            mask_text_to_prefix("255.0.255.0", IpVersion::V4)
                .unwrap_err()
                .to_string(),
            "Invalid netmask"
        );
        assert_eq!(
            mask_text_to_prefix("255.255.255.128", IpVersion::V4).unwrap(),
            25
        );
    }

    #[test]
    fn test_resolve_netmask_text() {
        assert_eq!(resolve_netmask_text("255.255.240.0", IpVersion::V4).unwrap(), 20);
        assert_eq!(resolve_netmask_text("24", IpVersion::V4).unwrap(), 24);
        assert_eq!(resolve_netmask_text(" 0 ", IpVersion::V4).unwrap(), 0);
        assert_eq!(
            resolve_netmask_text("56", IpVersion::V4)
                .unwrap_err()
                .to_string(),
            "IPv4 subnet size must be between 0 and 32"
        );
        assert_eq!(
            resolve_netmask_text("255.0.255.0", IpVersion::V4)
                .unwrap_err()
                .to_string(),
            "Invalid netmask"
        );
        assert!(resolve_netmask_text("abc", IpVersion::V4).is_err());
        assert_eq!(resolve_netmask_text("64", IpVersion::V6).unwrap(), 64);
    }

    #[test]
    fn test_resolve_netmask_text_huge_prefix() {
        assert_eq!(
            resolve_netmask_text("99999999999", IpVersion::V4)
                .unwrap_err()
                .to_string(),
            "IPv4 subnet size must be between 0 and 32"
        );
        assert_eq!(
            resolve_netmask_text("340282366920938463463374607431768211456", IpVersion::V6)
                .unwrap_err()
                .to_string(),
            "IPv6 subnet size must be between 0 and 128"
        );
    }
}
