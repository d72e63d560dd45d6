//! Set of hardware addresses.

use crate::{MacAddress, ParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_set;
use std::collections::HashSet;
use tracing::debug;

/// An unordered set of unique [`MacAddress`] values.
///
/// Members are keyed by their octets, so `78:4F:43:87:9E:F4` and
/// `78-4f-43-87-9e-f4` are the same member. The zero value is never a member.
///
/// Iteration order is unspecified. The JSON encoding is an array of canonical
/// strings; it happens to be sorted, but callers must not depend on that.
///
/// # Examples
///
/// ```
/// use macs::{MacAddress, MacSet};
///
/// let mut set = MacSet::new();
/// set.add(MacAddress::must_parse("78:4f:43:87:9e:f4"));
/// set.add(MacAddress::must_parse("78:4F:43:87:9E:F4"));
/// assert_eq!(set.len(), 1);
///
/// let json = set.to_json();
/// assert_eq!(json, r#"["78:4f:43:87:9e:f4"]"#);
/// assert_eq!(MacSet::from_json(&json).unwrap(), set);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacSet {
    macs: HashSet<MacAddress>,
}

impl MacSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        MacSet {
            macs: HashSet::with_capacity(capacity),
        }
    }

    /// Returns true if `mac` is a member.
    pub fn contains(&self, mac: &MacAddress) -> bool {
        self.macs.contains(mac)
    }

    /// Inserts `mac`, returning true if it was not already present.
    ///
    /// The zero value is ignored.
    pub fn add(&mut self, mac: MacAddress) -> bool {
        if mac.is_zero_value() {
            debug!("ignoring zero-value MAC address");
            return false;
        }
        self.macs.insert(mac)
    }

    /// Removes `mac`, returning true if it was present.
    pub fn remove(&mut self, mac: &MacAddress) -> bool {
        self.macs.remove(mac)
    }

    /// Returns a snapshot of every member, in no particular order.
    pub fn all(&self) -> Vec<MacAddress> {
        self.macs.iter().copied().collect()
    }

    /// Iterates over the members, in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, MacAddress> {
        self.macs.iter()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.macs.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.macs.is_empty()
    }

    /// Inserts every member of `other` into this set.
    pub fn add_all_from(&mut self, other: &MacSet) {
        let before = self.len();
        self.macs.extend(other.iter().copied());
        debug!(
            added = self.len() - before,
            len = self.len(),
            "merged MAC set"
        );
    }

    /// Returns a new set holding the members of both `a` and `b`.
    pub fn union(a: &MacSet, b: &MacSet) -> MacSet {
        let mut result = MacSet::with_capacity(a.len().max(b.len()));
        result.add_all_from(a);
        result.add_all_from(b);
        result
    }

    /// Returns a new set holding the members present in both `a` and `b`.
    pub fn intersection(a: &MacSet, b: &MacSet) -> MacSet {
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        small
            .iter()
            .filter(|mac| large.contains(mac))
            .copied()
            .collect()
    }

    /// Returns the members sorted by octets.
    fn sorted(&self) -> Vec<MacAddress> {
        let mut members = self.all();
        members.sort_unstable();
        members
    }

    /// Encodes the set as a JSON array of canonical address strings.
    ///
    /// An empty set encodes as `[]`.
    pub fn to_json(&self) -> String {
        let members: Vec<String> = self.sorted().into_iter().map(String::from).collect();
        serde_json::Value::from(members).to_string()
    }

    /// Decodes a set from a JSON array of address strings.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if `json` is not an array of strings and
    /// [`ParseError::InvalidMacAddress`] for the first element that does not
    /// parse. Nothing is returned on error, so a half-filled set cannot leak.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let texts: Vec<String> = serde_json::from_str(json)?;
        let mut set = MacSet::with_capacity(texts.len());
        for text in &texts {
            set.add(MacAddress::parse(text)?);
        }
        debug!(len = set.len(), "decoded MAC set from JSON");
        Ok(set)
    }
}

impl FromIterator<MacAddress> for MacSet {
    fn from_iter<I: IntoIterator<Item = MacAddress>>(iter: I) -> Self {
        let mut set = MacSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<MacAddress> for MacSet {
    fn extend<I: IntoIterator<Item = MacAddress>>(&mut self, iter: I) {
        for mac in iter {
            self.add(mac);
        }
    }
}

impl IntoIterator for MacSet {
    type Item = MacAddress;
    type IntoIter = hash_set::IntoIter<MacAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.macs.into_iter()
    }
}

impl<'a> IntoIterator for &'a MacSet {
    type Item = &'a MacAddress;
    type IntoIter = hash_set::Iter<'a, MacAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.macs.iter()
    }
}

impl Serialize for MacSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

impl<'de> Deserialize<'de> for MacSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<MacAddress>::deserialize(deserializer)?;
        Ok(members.into_iter().collect())
    }
}
