//! Typed view over the backend's environment-variable-style config.
//!
//! The wire format is a flat map of string keys to string values
//! (numbers and booleans are string-encoded). The known CryptoScan key
//! set maps each key to a logical kind so callers can parse values
//! explicitly instead of passing raw strings around; unknown keys pass
//! through unmodified as text.

use crate::error::{CoreError, Result};
use std::collections::BTreeMap;

/// Logical kind of a config value. The wire encoding is always a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Text,
    Int,
    Float,
    Bool,
}

/// Known config keys with integer values.
const INT_KEYS: &[&str] = &[
    "DB_PORT",
    "LOCAL_WS_PORT",
    "WS_PING_INTERVAL",
    "WS_PING_TIMEOUT",
    "WS_CLOSE_TIMEOUT",
    "WS_MAX_SIZE",
    "VOLUME_WINDOW_MINUTES",
    "MIN_VOLUME_USDT",
    "PING_PONG_WINDOW_SEC",
    "RAMPING_WINDOW_SEC",
    "CONSECUTIVE_LONG_COUNT",
    "ALERT_GROUPING_MINUTES",
    "DATA_RETENTION_HOURS",
    "OB_HISTORY_DEPTH",
    "ICEBERG_WINDOW_SEC",
    "ICEBERG_MIN_COUNT",
    "LAYERING_MIN_CHANGE",
    "LAYERING_WINDOW_SEC",
    "ML_DATA_COLLECTOR_INTERVAL_SEC",
    "ML_MODEL_TRAINING_INTERVAL_HOURS",
];

/// Known config keys with float values (detector thresholds and ratios).
const FLOAT_KEYS: &[&str] = &[
    "VOLUME_MULTIPLIER",
    "WASH_TRADE_THRESHOLD_RATIO",
    "ICEBERG_VOLUME_RATIO",
    "LAYERING_DISTANCE_PERCENT",
    "SPOOFING_CANCEL_RATIO",
    "MOMENTUM_IGNITION_THRESHOLD",
    "OB_IMBALANCE_THRESHOLD",
];

/// Known config keys with boolean values.
const BOOL_KEYS: &[&str] = &["ORDERBOOK_ENABLED", "ORDERBOOK_SNAPSHOT_ON_ALERT"];

/// Kind for a config key. Unknown keys are treated as text.
pub fn kind_of(key: &str) -> ConfigKind {
    if INT_KEYS.contains(&key) {
        ConfigKind::Int
    } else if FLOAT_KEYS.contains(&key) {
        ConfigKind::Float
    } else if BOOL_KEYS.contains(&key) {
        ConfigKind::Bool
    } else {
        ConfigKind::Text
    }
}

/// A single config value: logical kind plus its raw string encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    kind: ConfigKind,
    raw: String,
}

impl ConfigValue {
    /// Build a value for `key`, deriving the kind from the known key set.
    pub fn for_key(key: &str, raw: impl Into<String>) -> Self {
        Self {
            kind: kind_of(key),
            raw: raw.into(),
        }
    }

    pub fn kind(&self) -> ConfigKind {
        self.kind
    }

    /// Raw string encoding as it appears on the wire.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse as an integer.
    pub fn as_int(&self, key: &str) -> Result<i64> {
        self.raw
            .trim()
            .parse()
            .map_err(|e| CoreError::InvalidConfigValue {
                key: key.to_string(),
                reason: format!("not an integer ({e}): {:?}", self.raw),
            })
    }

    /// Parse as a float.
    pub fn as_float(&self, key: &str) -> Result<f64> {
        self.raw
            .trim()
            .parse()
            .map_err(|e| CoreError::InvalidConfigValue {
                key: key.to_string(),
                reason: format!("not a number ({e}): {:?}", self.raw),
            })
    }

    /// Parse as a boolean. Accepts the backend's "true"/"false" encoding.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self.raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(CoreError::InvalidConfigValue {
                key: key.to_string(),
                reason: format!("not a boolean: {:?}", self.raw),
            }),
        }
    }

    /// Check the raw encoding parses according to its kind.
    pub fn validate(&self, key: &str) -> Result<()> {
        match self.kind {
            ConfigKind::Text => Ok(()),
            ConfigKind::Int => self.as_int(key).map(|_| ()),
            ConfigKind::Float => self.as_float(key).map(|_| ()),
            ConfigKind::Bool => self.as_bool(key).map(|_| ()),
        }
    }
}

/// In-memory snapshot of the backend config.
///
/// Round-trips the wire map losslessly, including unknown keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from the wire map.
    pub fn from_wire(map: BTreeMap<String, String>) -> Self {
        let values = map
            .into_iter()
            .map(|(key, raw)| {
                let value = ConfigValue::for_key(&key, raw);
                (key, value)
            })
            .collect();
        Self { values }
    }

    /// Encode back to the wire map. Keys and raw values are preserved
    /// exactly as loaded or set.
    pub fn to_wire(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.raw.clone()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Set a key's raw value, deriving its kind from the known key set.
    pub fn set(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        let key = key.into();
        let value = ConfigValue::for_key(&key, raw);
        self.values.insert(key, value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validate every value against its kind, reporting the first failure.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in &self.values {
            value.validate(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn known_keys_get_typed_kinds() {
        assert_eq!(kind_of("DB_PORT"), ConfigKind::Int);
        assert_eq!(kind_of("VOLUME_MULTIPLIER"), ConfigKind::Float);
        assert_eq!(kind_of("ORDERBOOK_ENABLED"), ConfigKind::Bool);
        assert_eq!(kind_of("DB_HOST"), ConfigKind::Text);
    }

    #[test]
    fn unknown_keys_pass_through_as_text() {
        let snap = ConfigSnapshot::from_wire(wire(&[("SOME_FUTURE_FLAG", "whatever")]));
        let value = snap.get("SOME_FUTURE_FLAG").unwrap();
        assert_eq!(value.kind(), ConfigKind::Text);
        assert_eq!(snap.to_wire(), wire(&[("SOME_FUTURE_FLAG", "whatever")]));
    }

    #[test]
    fn wire_round_trip_is_lossless() {
        let input = wire(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("VOLUME_MULTIPLIER", "3.5"),
            ("ORDERBOOK_ENABLED", "true"),
            ("UNKNOWN", "x"),
        ]);
        let snap = ConfigSnapshot::from_wire(input.clone());
        assert_eq!(snap.to_wire(), input);
    }

    #[test]
    fn typed_accessors_parse_raw_strings() {
        let snap = ConfigSnapshot::from_wire(wire(&[
            ("DB_PORT", "5432"),
            ("WASH_TRADE_THRESHOLD_RATIO", "0.88"),
            ("ORDERBOOK_ENABLED", "true"),
        ]));
        assert_eq!(snap.get("DB_PORT").unwrap().as_int("DB_PORT").unwrap(), 5432);
        assert_eq!(
            snap.get("WASH_TRADE_THRESHOLD_RATIO")
                .unwrap()
                .as_float("WASH_TRADE_THRESHOLD_RATIO")
                .unwrap(),
            0.88
        );
        assert!(snap
            .get("ORDERBOOK_ENABLED")
            .unwrap()
            .as_bool("ORDERBOOK_ENABLED")
            .unwrap());
    }

    #[test]
    fn malformed_values_fail_explicitly() {
        let snap = ConfigSnapshot::from_wire(wire(&[("DB_PORT", "not-a-port")]));
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfigValue { ref key, .. } if key == "DB_PORT"));
    }

    #[test]
    fn set_marks_snapshot_different() {
        let base = ConfigSnapshot::from_wire(wire(&[("VOLUME_MULTIPLIER", "3.5")]));
        let mut edited = base.clone();
        edited.set("VOLUME_MULTIPLIER", "4.0");
        assert_ne!(base, edited);
        edited.set("VOLUME_MULTIPLIER", "3.5");
        assert_eq!(base, edited);
    }
}
