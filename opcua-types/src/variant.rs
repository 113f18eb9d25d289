use crate::NodeId;

/// A dynamically typed value, as carried by [`crate::DataValue`] and event
/// fields. The real specification supports dozens of built-in types plus
/// arrays and matrices of each; this engine only needs enough variety to
/// exercise data-change and event notifications in its own tests.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    Empty,
    Boolean(bool),
    Int32(i32),
    UInt32(u32),
    Double(f64),
    String(String),
    ByteString(Vec<u8>),
    NodeId(Box<NodeId>),
    Array(Vec<Variant>),
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Int32(v)
    }
}

impl From<u32> for Variant {
    fn from(v: u32) -> Self {
        Variant::UInt32(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Double(v)
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<Vec<u8>> for Variant {
    fn from(v: Vec<u8>) -> Self {
        Variant::ByteString(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(Variant::from(7i32), Variant::Int32(7));
        assert_eq!(Variant::from(7u32), Variant::UInt32(7));
        assert_eq!(Variant::from(1.5f64), Variant::Double(1.5));
        assert_eq!(Variant::from("hi"), Variant::String("hi".into()));
        assert_eq!(Variant::from(vec![1u8, 2, 3]), Variant::ByteString(vec![1, 2, 3]));
    }

    #[test]
    fn array_nests_arbitrary_variants() {
        let array = Variant::Array(vec![Variant::Int32(1), Variant::Boolean(true)]);
        match array {
            Variant::Array(items) => assert_eq!(items.len(), 2),
            other => panic!("expected an array, got {other:?}"),
        }
    }
}
