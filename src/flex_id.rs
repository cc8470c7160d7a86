use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A match identifier that can deserialize from a number, a string, or null.
/// The upstream feed has shipped all three over time, sometimes within one
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlexId {
    Number(i64),
    String(String),
    Null,
}

impl Default for FlexId {
    fn default() -> Self {
        FlexId::Null
    }
}

impl FlexId {
    /// Synthesized id for records the feed shipped without one. Position in
    /// the snapshot keeps it unique within a single normalization pass.
    pub fn fallback(index: usize) -> Self {
        FlexId::String(format!("idx-{}", index))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlexId::Number(n) => Some(*n),
            FlexId::String(s) => s.parse().ok(),
            FlexId::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FlexId::Null)
    }
}

impl fmt::Display for FlexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexId::Number(n) => write!(f, "{}", n),
            FlexId::String(s) => write!(f, "{}", s),
            FlexId::Null => write!(f, "null"),
        }
    }
}

impl Serialize for FlexId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FlexId::Number(n) => serializer.serialize_i64(*n),
            FlexId::String(s) => serializer.serialize_str(s),
            FlexId::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FlexId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct FlexIdVisitor;

        impl<'de> Visitor<'de> for FlexIdVisitor {
            type Value = FlexId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, string, or null")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexId::Number(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexId::Number(v as i64))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // Numeric strings collapse to numbers so "123" and 123 compare equal
                if let Ok(n) = v.parse::<i64>() {
                    Ok(FlexId::Number(n))
                } else {
                    Ok(FlexId::String(v.to_string()))
                }
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if let Ok(n) = v.parse::<i64>() {
                    Ok(FlexId::Number(n))
                } else {
                    Ok(FlexId::String(v))
                }
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexId::Null)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexId::Null)
            }
        }

        deserializer.deserialize_any(FlexIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_deserialize() {
        let id: FlexId = serde_json::from_str("67132").unwrap();
        assert_eq!(id, FlexId::Number(67132));
        assert_eq!(id.as_i64(), Some(67132));
    }

    #[test]
    fn test_string_deserialize() {
        let id: FlexId = serde_json::from_str(r#""pro-kabaddi-42""#).unwrap();
        assert_eq!(id, FlexId::String("pro-kabaddi-42".to_string()));
    }

    #[test]
    fn test_numeric_string_deserialize() {
        let id: FlexId = serde_json::from_str(r#""456""#).unwrap();
        assert_eq!(id, FlexId::Number(456));
    }

    #[test]
    fn test_null_deserialize() {
        let id: FlexId = serde_json::from_str("null").unwrap();
        assert_eq!(id, FlexId::Null);
        assert!(id.is_null());
    }

    #[test]
    fn test_fallback_ids_are_distinct() {
        assert_ne!(FlexId::fallback(0), FlexId::fallback(1));
    }
}
