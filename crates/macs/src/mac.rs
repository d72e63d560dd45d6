//! Hardware address type with safe parsing and formatting.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest address the parser recognizes (20-octet IP over InfiniBand).
const MAX_OCTETS: usize = 20;

/// A hardware address of 6, 8 or 20 octets.
///
/// The [`Default`] value holds no octets at all and stands for "no address
/// assigned"; see [`MacAddress::is_zero_value`]. It is distinct from
/// `00:00:00:00:00:00`, which is a real 6-octet address.
///
/// # Examples
///
/// ```
/// use macs::MacAddress;
///
/// let mac: MacAddress = "78:4F:43:87:9E:F4".parse().unwrap();
/// assert_eq!(mac.to_string(), "78:4f:43:87:9e:f4");
///
/// // Also supports hyphen-separated and dotted formats
/// let mac2: MacAddress = "78-4f-43-87-9e-f4".parse().unwrap();
/// let mac3: MacAddress = "784f.4387.9ef4".parse().unwrap();
/// assert_eq!(mac, mac2);
/// assert_eq!(mac, mac3);
///
/// assert!(MacAddress::default().is_zero_value());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress {
    // Octets past `len` are always zero so the derived impls only see the address.
    octets: [u8; MAX_OCTETS],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl MacAddress {
    /// The broadcast MAC address (ff:ff:ff:ff:ff:ff).
    pub const BROADCAST: MacAddress = MacAddress::new([0xff; 6]);

    /// Creates a 6-octet MAC address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        let mut octets = [0u8; MAX_OCTETS];
        let mut i = 0;
        while i < bytes.len() {
            octets[i] = bytes[i];
            i += 1;
        }
        MacAddress { octets, len: 6 }
    }

    /// Parses an address in colon, hyphen or dotted hexadecimal notation.
    ///
    /// Accepted forms, for 6, 8 or 20 octets:
    ///
    /// - `00:00:5e:00:53:01`
    /// - `00-00-5e-00-53-01`
    /// - `0000.5e00.5301`
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidMacAddress`] if `s` matches none of them.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_octets(s.as_bytes()).ok_or_else(|| ParseError::InvalidMacAddress(s.to_string()))
    }

    /// Parses `s` or panics.
    ///
    /// Only meant for literals known to be valid, such as constants and test
    /// fixtures. Use [`MacAddress::parse`] for anything read from outside.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid address.
    #[track_caller]
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(mac) => mac,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an address from raw octets, bypassing text parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidLength`] unless `bytes` holds 6, 8 or 20 octets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        if !is_valid_len(bytes.len()) {
            return Err(ParseError::InvalidLength(bytes.len()));
        }
        Ok(Self::from_octets(bytes))
    }

    fn from_octets(bytes: &[u8]) -> Self {
        let mut octets = [0u8; MAX_OCTETS];
        octets[..bytes.len()].copy_from_slice(bytes);
        MacAddress {
            octets,
            len: bytes.len() as u8,
        }
    }

    /// Returns the raw octets. Empty for the zero value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.octets[..self.len as usize]
    }

    /// Returns the number of octets (0, 6, 8 or 20).
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if no address has been assigned.
    pub const fn is_zero_value(&self) -> bool {
        self.len == 0
    }

    /// Returns true if this is a multicast address.
    ///
    /// A multicast address has the least significant bit of the first octet set.
    pub fn is_multicast(&self) -> bool {
        self.as_bytes().first().is_some_and(|b| b & 0x01 != 0)
    }

    /// Returns true if this is a unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_zero_value() && !self.is_multicast()
    }

    /// Returns true if this is a locally administered address.
    ///
    /// Locally administered addresses have the second least significant bit
    /// of the first octet set.
    pub fn is_local(&self) -> bool {
        self.as_bytes().first().is_some_and(|b| b & 0x02 != 0)
    }

    /// Returns true if this is a universally administered address.
    pub fn is_universal(&self) -> bool {
        !self.is_zero_value() && !self.is_local()
    }

    /// Returns true if every octet is `ff`.
    pub fn is_broadcast(&self) -> bool {
        !self.is_zero_value() && self.as_bytes().iter().all(|&b| b == 0xff)
    }

    /// Encodes the address as a JSON string literal.
    pub fn to_json(&self) -> String {
        serde_json::Value::String(self.to_string()).to_string()
    }

    /// Decodes an address from a JSON string literal.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if `json` is not a JSON string and
    /// [`ParseError::InvalidMacAddress`] if the string does not parse.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let text: String = serde_json::from_str(json)?;
        Self::parse(&text)
    }
}

fn is_valid_len(n: usize) -> bool {
    matches!(n, 6 | 8 | 20)
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn hex_octet(hi: u8, lo: u8) -> Option<u8> {
    Some((hex_digit(hi)? << 4) | hex_digit(lo)?)
}

fn parse_octets(s: &[u8]) -> Option<MacAddress> {
    // Shortest valid input is "xxxx.xxxx.xxxx".
    if s.len() < 14 {
        return None;
    }

    let mut octets = [0u8; MAX_OCTETS];
    let n = if s[2] == b':' || s[2] == b'-' {
        if (s.len() + 1) % 3 != 0 {
            return None;
        }
        let n = (s.len() + 1) / 3;
        if !is_valid_len(n) {
            return None;
        }
        let separator = s[2];
        for (i, group) in s.chunks(3).enumerate() {
            if group.len() == 3 && group[2] != separator {
                return None;
            }
            octets[i] = hex_octet(group[0], group[1])?;
        }
        n
    } else if s[4] == b'.' {
        if (s.len() + 1) % 5 != 0 {
            return None;
        }
        let n = 2 * (s.len() + 1) / 5;
        if !is_valid_len(n) {
            return None;
        }
        for (i, group) in s.chunks(5).enumerate() {
            if group.len() == 5 && group[4] != b'.' {
                return None;
            }
            octets[2 * i] = hex_octet(group[0], group[1])?;
            octets[2 * i + 1] = hex_octet(group[2], group[3])?;
        }
        n
    } else {
        return None;
    };

    Some(MacAddress {
        octets,
        len: n as u8,
    })
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> String {
        mac.to_string()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddress::new(bytes)
    }
}

impl From<[u8; 8]> for MacAddress {
    fn from(bytes: [u8; 8]) -> Self {
        MacAddress::from_octets(&bytes)
    }
}

impl From<[u8; 20]> for MacAddress {
    fn from(bytes: [u8; 20]) -> Self {
        MacAddress::from_octets(&bytes)
    }
}

impl From<MacAddress> for Vec<u8> {
    fn from(mac: MacAddress) -> Vec<u8> {
        mac.as_bytes().to_vec()
    }
}
