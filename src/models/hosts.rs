//! Host enumeration over a [`Network`].

use super::{Address, IpVersion, Network};
use std::iter::FusedIterator;

/// Cursor over the addresses of a network.
///
/// Offsets run from 1 to [`Network::size`] inclusive, each yielding
/// `network + offset` at the network's prefix length. Offset 0 (the network
/// address) is never visited. Every call to [`Network::hosts`] returns an
/// independent cursor.
#[derive(Debug, Clone)]
pub struct Hosts {
    network_value: u128,
    prefix_len: u8,
    version: IpVersion,
    /// Highest valid offset: `size()`, cut short at the top of the address space.
    last_offset: u128,
    position: u128,
}

impl Hosts {
    pub(crate) fn new(network: &Network) -> Hosts {
        let network_value = network.network_value();
        let room = network.version().max_value() - network_value;
        Hosts {
            network_value,
            prefix_len: network.prefix_len(),
            version: network.version(),
            last_offset: network.size().min(room),
            position: 1,
        }
    }

    /// Current offset from the network address.
    pub fn key(&self) -> u128 {
        self.position
    }

    /// True while the cursor points at an offset in `1..=size()`.
    pub fn valid(&self) -> bool {
        self.position >= 1 && self.position <= self.last_offset
    }

    /// Address under the cursor, `None` once exhausted.
    pub fn current(&self) -> Option<Address> {
        self.valid().then(|| {
            Address::from_parts(
                self.network_value + self.position,
                self.prefix_len,
                self.version,
            )
        })
    }

    /// Move the cursor back to offset 1.
    pub fn rewind(&mut self) {
        self.position = 1;
    }

    fn remaining(&self) -> u128 {
        if self.valid() {
            self.last_offset - self.position + 1
        } else {
            0
        }
    }
}

impl Iterator for Hosts {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        let host = self.current()?;
        self.position += 1;
        Some(host)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Hosts {}
