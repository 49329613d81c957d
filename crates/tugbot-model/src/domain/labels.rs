use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Container label mapping based on [`BTreeMap`].
///
/// Insertion order is irrelevant; iteration is always sorted by key.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub BTreeMap<String, String>);

impl Labels {
    /// Create an empty set of labels.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if no labels are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite a label.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Returns `true` if `key` is present with exactly `"true"` as its value.
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Iterate through all labels as `(&str, &str)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drop every entry whose key and value both appear in `defaults`.
    ///
    /// Entries with the same key but a different value are kept: they override the default.
    pub fn subtract(&self, defaults: &Labels) -> Labels {
        Labels(
            self.0
                .iter()
                .filter(|(k, v)| defaults.0.get(k.as_str()) != Some(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for Labels
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Labels;

    #[test]
    fn is_true_requires_exact_value() {
        let labels: Labels = [("a", "true"), ("b", "TRUE"), ("c", "")].into_iter().collect();

        assert!(labels.is_true("a"));
        assert!(!labels.is_true("b"));
        assert!(!labels.is_true("c"));
        assert!(!labels.is_true("missing"));
    }

    #[test]
    fn subtract_keeps_overridden_and_new_keys() {
        let runtime: Labels = [("maintainer", "me"), ("tier", "prod"), ("extra", "1")]
            .into_iter()
            .collect();
        let image: Labels = [("maintainer", "me"), ("tier", "dev")].into_iter().collect();

        let diff = runtime.subtract(&image);

        assert_eq!(diff.len(), 2);
        assert_eq!(diff.get("tier"), Some("prod"));
        assert_eq!(diff.get("extra"), Some("1"));
        assert!(diff.get("maintainer").is_none());
    }

    #[test]
    fn serde_is_a_plain_object() {
        let mut labels = Labels::new();
        labels.insert("tugbot.test", "true");

        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"tugbot.test":"true"}"#);
    }
}
