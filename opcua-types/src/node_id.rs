use std::fmt;

/// The identifier half of a [`NodeId`]. OPC UA allows four encodings;
/// numeric and string cover everything this engine's tests and samples need.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Identifier {
    Numeric(u32),
    String(String),
}

/// A node identifier: a namespace index plus an identifier unique within
/// that namespace. Used both for address-space nodes and, per the OPC UA
/// convention this engine follows, as the session token type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    pub fn new_numeric(namespace: u16, id: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(id),
        }
    }

    pub fn new_string(namespace: u16, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(id.into()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Identifier::Numeric(id) => write!(f, "ns={};i={}", self.namespace, id),
            Identifier::String(id) => write!(f, "ns={};s={}", self.namespace, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_node_id_displays_in_opc_ua_notation() {
        let node = NodeId::new_numeric(2, 100);
        assert_eq!(node.to_string(), "ns=2;i=100");
    }

    #[test]
    fn string_node_id_displays_in_opc_ua_notation() {
        let node = NodeId::new_string(1, "Boiler.Temperature");
        assert_eq!(node.to_string(), "ns=1;s=Boiler.Temperature");
    }

    #[test]
    fn equal_namespace_and_identifier_compare_equal() {
        assert_eq!(NodeId::new_numeric(1, 5), NodeId::new_numeric(1, 5));
        assert_ne!(NodeId::new_numeric(1, 5), NodeId::new_numeric(2, 5));
        assert_ne!(NodeId::new_numeric(1, 5), NodeId::new_string(1, "5"));
    }
}
