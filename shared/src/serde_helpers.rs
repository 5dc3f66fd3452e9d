//! Serde helpers for loosely typed order store payloads
//!
//! The order store is fed by several front ends and does not normalize
//! `tableNumber`: it arrives either as a JSON number or as a numeric string.

use serde::{Deserializer, Serializer};

/// `tableNumber` accepting `5`, `"5"` and `" 5 "`
pub mod table_number {
    use super::*;
    use serde::de::{self, Visitor};
    use std::fmt;

    pub fn serialize<S>(value: &u32, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_u32(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableNumberVisitor;

        impl<'de> Visitor<'de> for TableNumberVisitor {
            type Value = u32;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative table number or numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map_err(|_| de::Error::custom(format!("table number out of range: {}", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map_err(|_| de::Error::custom(format!("table number out of range: {}", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
                    Ok(value as u32)
                } else {
                    Err(de::Error::custom(format!("invalid table number: {}", value)))
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| de::Error::custom(format!("invalid table number: {:?}", value)))
            }
        }

        deserializer.deserialize_any(TableNumberVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(with = "super::table_number")]
        table: u32,
    }

    #[test]
    fn test_table_number_from_number_and_string() {
        let n: Row = serde_json::from_str(r#"{"table": 7}"#).unwrap();
        assert_eq!(n.table, 7);

        let s: Row = serde_json::from_str(r#"{"table": " 0 "}"#).unwrap();
        assert_eq!(s.table, 0);
    }

    #[test]
    fn test_table_number_rejects_garbage() {
        assert!(serde_json::from_str::<Row>(r#"{"table": "patio"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"table": -1}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"table": 2.5}"#).is_err());
    }
}
