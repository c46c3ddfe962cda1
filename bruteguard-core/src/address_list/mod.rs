//! Administrator-curated allow and deny lists of network prefixes.

mod file;
mod memory;

use std::{fmt, net::IpAddr, str::FromStr};

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use file::FileAddressList;
pub use memory::InMemoryAddressList;

use crate::error::GuardError;

/// A network prefix with its host bits cleared.
///
/// Parsed from CIDR notation or from a bare address, which becomes a /32 (IPv4)
/// or /128 (IPv6) prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(IpNetwork);

impl Prefix {
    pub fn new(network: IpNetwork) -> Self {
        // Re-creating from the network address with the same length cannot fail.
        match IpNetwork::new(network.network(), network.prefix()) {
            Ok(normalized) => Prefix(normalized),
            Err(_) => Prefix(network),
        }
    }

    pub fn parse(s: &str) -> Result<Self, GuardError> {
        let s = s.trim();
        let network = if s.contains('/') {
            IpNetwork::from_str(s).map_err(|e| GuardError::InvalidPrefix(format!("{s}: {e}")))?
        } else {
            let addr = IpAddr::from_str(s)
                .map_err(|e| GuardError::InvalidPrefix(format!("{s}: {e}")))?;
            IpNetwork::from(addr)
        };
        Ok(Prefix::new(network))
    }

    pub fn network(&self) -> IpAddr {
        self.0.network()
    }

    pub fn prefix_len(&self) -> u8 {
        self.0.prefix()
    }

    /// CIDR containment. An IPv4-mapped IPv6 address is matched as the IPv4
    /// address it carries; otherwise never true across address families.
    pub fn contains(&self, addr: IpAddr) -> bool {
        self.0.contains(addr.to_canonical())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.network(), self.0.prefix())
    }
}

impl FromStr for Prefix {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::parse(s)
    }
}

impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Prefix::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Allow,
    Deny,
}

impl ListKind {
    pub fn opposite(self) -> ListKind {
        match self {
            ListKind::Allow => ListKind::Deny,
            ListKind::Deny => ListKind::Allow,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Allow => write!(f, "allow list"),
            ListKind::Deny => write!(f, "deny list"),
        }
    }
}

/// Storage backend of the two lists.
///
/// Implementations must reject a prefix that is already present in either
/// list, comparing normalized prefixes literally (no containment check).
#[async_trait]
pub trait AddressList: Send + Sync {
    async fn add_to_allow(&self, prefix: Prefix) -> Result<(), GuardError>;
    async fn add_to_deny(&self, prefix: Prefix) -> Result<(), GuardError>;
    async fn remove_from_allow(&self, prefix: Prefix) -> Result<(), GuardError>;
    async fn remove_from_deny(&self, prefix: Prefix) -> Result<(), GuardError>;
    async fn is_in_allow(&self, addr: IpAddr) -> Result<bool, GuardError>;
    async fn is_in_deny(&self, addr: IpAddr) -> Result<bool, GuardError>;
    async fn allow_count(&self) -> Result<usize, GuardError>;
    async fn deny_count(&self) -> Result<usize, GuardError>;
    async fn allow_entries(&self) -> Result<Vec<Prefix>, GuardError>;
    async fn deny_entries(&self) -> Result<Vec<Prefix>, GuardError>;
}

/// The pair of lists shared by the backends. Also the on-disk document shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLists {
    #[serde(default)]
    pub allow: Vec<Prefix>,
    #[serde(default)]
    pub deny: Vec<Prefix>,
}

impl AddressLists {
    fn list(&self, kind: ListKind) -> &Vec<Prefix> {
        match kind {
            ListKind::Allow => &self.allow,
            ListKind::Deny => &self.deny,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Prefix> {
        match kind {
            ListKind::Allow => &mut self.allow,
            ListKind::Deny => &mut self.deny,
        }
    }

    pub fn insert(&mut self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        if self.list(kind).contains(&prefix) {
            return Err(GuardError::AlreadyExists(prefix.to_string()));
        }
        let opposite = kind.opposite();
        if self.list(opposite).contains(&prefix) {
            return Err(GuardError::AlreadyExistsIn {
                prefix: prefix.to_string(),
                list: opposite,
            });
        }
        self.list_mut(kind).push(prefix);
        Ok(())
    }

    pub fn remove(&mut self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        let list = self.list_mut(kind);
        match list.iter().position(|p| *p == prefix) {
            Some(idx) => {
                list.remove(idx);
                Ok(())
            }
            None => Err(GuardError::NotFound(format!("{prefix} in {kind}"))),
        }
    }

    pub fn contains(&self, kind: ListKind, addr: IpAddr) -> bool {
        self.list(kind).iter().any(|p| p.contains(addr))
    }

    pub fn count(&self, kind: ListKind) -> usize {
        self.list(kind).len()
    }

    pub fn entries(&self, kind: ListKind) -> Vec<Prefix> {
        self.list(kind).clone()
    }
}
