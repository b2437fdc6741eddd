use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;
use netchart_error::{Error, Result};

/// Identifier of a graph node.
///
/// Node-link documents carry either integer or string ids, so both are
/// accepted and kept distinct: `1` and `"1"` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    /// Read an id from a JSON value (integer or string).
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Int).ok_or_else(|| {
                Error::invalid_format(format!("node id {n} is not an integer"))
            }),
            other => Err(Error::invalid_format(format!(
                "node id must be an integer or string, got {other}"
            ))),
        }
    }

    /// Read an id from a JSON object key. Keys that parse as integers
    /// become `Int`, mirroring how integer ids are written out.
    pub fn from_key(key: &str) -> Self {
        key.parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Str(key.to_string()))
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&NodeId> for Value {
    fn from(id: &NodeId) -> Self {
        id.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(NodeId::from_value(&json!(3)).unwrap(), NodeId::Int(3));
        assert_eq!(NodeId::from_value(&json!("a")).unwrap(), NodeId::from("a"));
        assert!(NodeId::from_value(&json!(1.5)).is_err());
        assert!(NodeId::from_value(&json!(null)).is_err());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(NodeId::from_key("7"), NodeId::Int(7));
        assert_eq!(NodeId::from_key("x7"), NodeId::from("x7"));
    }

    #[test]
    fn test_int_and_str_are_distinct() {
        assert_ne!(NodeId::from(1), NodeId::from("1"));
        assert_eq!(NodeId::from(1).to_value(), json!(1));
        assert_eq!(NodeId::from("1").to_value(), json!("1"));
    }
}
