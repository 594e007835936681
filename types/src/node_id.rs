use std::cmp::Ordering;
use std::fmt;

pub type NamespaceIndex = u16;

/// A 128-bit globally unique identifier, used by the `Guid` identifier variant of a `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Guid(pub u128);

/// The value half of a `NodeId`. OPC UA permits four encodings; this crate keeps all four
/// since the Browse engine's class-array tie-break and `is_subtype`'s "numeric 0 means any"
/// rule both depend on being able to tell a numeric identifier apart from the others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Guid),
    Opaque(Vec<u8>),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Identifier::Numeric(v) => write!(f, "i={}", v),
            Identifier::String(v) => write!(f, "s={}", v),
            Identifier::Guid(v) => write!(f, "g={:x}", v.0),
            Identifier::Opaque(v) => write!(f, "b={}", base16(v)),
        }
    }
}

fn base16(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// A node identifier: a namespace index paired with one of the four identifier encodings.
/// Total ordering and component-wise equality, as the spec requires for use as a map key
/// and for the Browse engine's class-precedence tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId {
    pub namespace: NamespaceIndex,
    pub identifier: Identifier,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ns={};{}", self.namespace, self.identifier)
    }
}

impl NodeId {
    pub fn new_numeric(namespace: NamespaceIndex, value: u32) -> NodeId {
        NodeId { namespace, identifier: Identifier::Numeric(value) }
    }

    pub fn new_string<S: Into<String>>(namespace: NamespaceIndex, value: S) -> NodeId {
        NodeId { namespace, identifier: Identifier::String(value.into()) }
    }

    pub fn new_guid(namespace: NamespaceIndex, value: Guid) -> NodeId {
        NodeId { namespace, identifier: Identifier::Guid(value) }
    }

    pub fn new_opaque(namespace: NamespaceIndex, value: Vec<u8>) -> NodeId {
        NodeId { namespace, identifier: Identifier::Opaque(value) }
    }

    /// The null node id: namespace 0, numeric identifier 0. Used as a sentinel in several
    /// places (e.g. an unset `TypeDefinition`).
    pub fn null() -> NodeId {
        NodeId::new_numeric(0, 0)
    }

    pub fn is_null(&self) -> bool {
        self.namespace == 0 && matches!(self.identifier, Identifier::Numeric(0))
    }

    /// True when the identifier is numeric and equal to 0, regardless of namespace. This is
    /// the "any"/"all" sentinel used by the reference-type filter in Browse and by
    /// `is_subtype`'s ancestor argument; it is deliberately independent of namespace index,
    /// which is asymmetric with every other NodeId comparison in this crate but matches how
    /// the sentinel is meant to behave regardless of which namespace happens to hold node 0.
    pub fn is_numeric_zero(&self) -> bool {
        matches!(self.identifier, Identifier::Numeric(0))
    }

    pub fn as_numeric(&self) -> Option<u32> {
        match self.identifier {
            Identifier::Numeric(v) => Some(v),
            _ => None,
        }
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace.cmp(&other.namespace).then_with(|| self.identifier.cmp(&other.identifier))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::null()
    }
}
