use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Settings of an application, keyed by upper-case setting name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig(Map<String, Value>);

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts `value` only when `key` is absent and returns the value now
    /// stored under `key`.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &Value {
        self.0.entry(key.into()).or_insert_with(|| value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserializes a typed view of the settings. Keys the target type does
    /// not know about are ignored.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AppConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<AppConfig> for Value {
    fn from(config: AppConfig) -> Self {
        Value::Object(config.0)
    }
}
