//! Result types and their JSON shape.
//!
//! The serialized form of a [`ResultSet`] is:
//!
//! ```json
//! {
//!     "Main-Beach-Anytown": {
//!         "low-tides": { "9:15 AM": "0.4 ft" }
//!     },
//!     "Unknown-Beach-Nowhere": {}
//! }
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::{LowtideError, Result};

/// Key under which a location's readings are serialized.
pub const LOW_TIDES_KEY: &str = "low-tides";

/// Map keyed by string that keeps first-insertion order.
///
/// Re-inserting an existing key replaces its value in place, the way a
/// JSON object built row by row behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserts or overwrites; returns the previous value if the key existed.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Daylight low tides of one table: time string to height string, in row order.
pub type LowTides = OrderedMap<String>;

/// Outcome for one location.
///
/// `low_tides` is `None` when neither the primary nor the fallback page had
/// a tide table; that serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationResult {
    #[serde(rename = "low-tides", skip_serializing_if = "Option::is_none")]
    pub low_tides: Option<LowTides>,
}

impl LocationResult {
    pub fn found(low_tides: LowTides) -> Self {
        Self { low_tides: Some(low_tides) }
    }

    pub fn not_found() -> Self {
        Self { low_tides: None }
    }
}

/// Every successfully scraped location keyed by its primary name, in input order.
pub type ResultSet = OrderedMap<LocationResult>;

/// A location whose pages could not be fetched or understood.
#[derive(Debug)]
pub struct LocationFailure {
    /// The primary name of the location.
    pub location: String,
    pub error: LowtideError,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub results: ResultSet,
    pub failures: Vec<LocationFailure>,
}

impl ScrapeReport {
    /// Renders the result set as JSON indented with four spaces.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_json_pretty(&self.results)
    }
}

/// Renders any serializable value as JSON indented with four spaces.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(LowtideError::Serialization)?;

    String::from_utf8(buf).map_err(|e| LowtideError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tides(pairs: &[(&str, &str)]) -> LowTides {
        let mut map = LowTides::new();
        for (t, h) in pairs {
            map.insert(t.to_string(), h.to_string());
        }
        map
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = tides(&[("9:15 AM", "0.4 ft"), ("3:30 PM", "1.1 ft")]);
        let previous = map.insert("9:15 AM".to_string(), "0.2 ft".to_string());

        assert_eq!(previous, Some("0.4 ft".to_string()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["9:15 AM", "3:30 PM"]);
        assert_eq!(map.get("9:15 AM"), Some(&"0.2 ft".to_string()));
    }

    #[test]
    fn test_location_result_json_shape() {
        let found = LocationResult::found(tides(&[("9:15 AM", "0.4 ft")]));
        let missing = LocationResult::not_found();

        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({ "low-tides": { "9:15 AM": "0.4 ft" } })
        );
        assert_eq!(serde_json::to_value(&missing).unwrap(), serde_json::json!({}));
        assert!(serde_json::to_value(&found).unwrap().get(LOW_TIDES_KEY).is_some());
    }

    #[test]
    fn test_result_set_preserves_order() {
        let mut results = ResultSet::new();
        results.insert("Zuma-Beach-Malibu".to_string(), LocationResult::not_found());
        results.insert("Avila-Beach-Avila".to_string(), LocationResult::not_found());

        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"{"Zuma-Beach-Malibu":{},"Avila-Beach-Avila":{}}"#);
    }

    #[test]
    fn test_pretty_uses_four_spaces() {
        let mut results = ResultSet::new();
        results.insert(
            "Main-Beach-Anytown".to_string(),
            LocationResult::found(tides(&[("9:15 AM", "0.4 ft")])),
        );
        let report = ScrapeReport { results, failures: Vec::new() };

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\n    \"Main-Beach-Anytown\": {\n        \"low-tides\""));
    }
}
