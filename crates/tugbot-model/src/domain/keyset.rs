use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::IgnoredAny};

/// Set of declared keys, such as volumes (`"/data"`) or exposed ports (`"8080/tcp"`).
///
/// The runtime API encodes these as objects with empty values (`{"8080/tcp": {}}`);
/// serde follows that shape, so the `Volumes` and `ExposedPorts` sections of a container
/// inspect (or a create request) map onto this type directly.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeySet(pub BTreeSet<String>);

impl KeySet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Insert a key; returns `true` if it was not present yet.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Keys present here but not in `defaults`.
    pub fn subtract(&self, defaults: &KeySet) -> KeySet {
        KeySet(self.0.difference(&defaults.0).cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Serialize)]
struct Empty {}

impl Serialize for KeySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|k| (k, Empty {})))
    }
}

impl<'de> Deserialize<'de> for KeySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, IgnoredAny>::deserialize(deserializer)?;
        Ok(Self(map.into_keys().collect()))
    }
}
