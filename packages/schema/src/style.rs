use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inline CSS declarations applied to a block's render container.
///
/// Keys are CSS property names (`top`, `width`, `background-color`, ...),
/// values are raw CSS values. Declarations keep document order, so later
/// shorthands win the cascade exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(Map<String, Value>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the previous value.
    ///
    /// An existing property keeps its position; a new one is appended.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        match self.0.insert(property.into(), Value::String(value.into())) {
            Some(Value::String(previous)) => Some(previous),
            _ => None,
        }
    }

    /// Remove a property, keeping the order of the others
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let previous = self.get(property).map(str::to_string);
        self.0.retain(|key, _| key != property);
        previous
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
    }

    /// Flatten into an inline `style` attribute value: `key: value; key: value`
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        if let Some((property, _)) = map.iter().find(|(_, value)| !value.is_string()) {
            return Err(de::Error::custom(format!(
                "style value for `{}` must be a string",
                property
            )));
        }
        Ok(Self(map))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (k, v) in iter {
            style.insert(k, v);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_inline_joins_pairs() {
        let style: StyleMap = [("top", "10px"), ("left", "20px")].into_iter().collect();
        assert_eq!(style.to_inline(), "top: 10px; left: 20px");
    }

    #[test]
    fn test_document_order_survives_round_trip() {
        let json = r#"{"background-color":"red","background":"blue"}"#;
        let style: StyleMap = serde_json::from_str(json).unwrap();

        assert_eq!(style.to_inline(), "background-color: red; background: blue");
        assert_eq!(serde_json::to_string(&style).unwrap(), json);
    }

    #[test]
    fn test_insert_and_remove_keep_positions() {
        let mut style: StyleMap = [("top", "1px"), ("left", "2px"), ("width", "3px")]
            .into_iter()
            .collect();

        assert_eq!(style.insert("top", "5px"), Some("1px".to_string()));
        assert_eq!(style.remove("left"), Some("2px".to_string()));
        assert_eq!(style.remove("left"), None);
        assert_eq!(style.to_inline(), "top: 5px; width: 3px");
    }

    #[test]
    fn test_empty_style_is_empty_string() {
        assert_eq!(StyleMap::new().to_inline(), "");
    }

    #[test]
    fn test_deserializes_from_plain_object() {
        let style: StyleMap = serde_json::from_str(r#"{"width": "300px"}"#).unwrap();
        assert_eq!(style.get("width"), Some("300px"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let result = serde_json::from_str::<StyleMap>(r#"{"z-index": 10}"#);
        assert!(result.unwrap_err().to_string().contains("z-index"));
    }
}
