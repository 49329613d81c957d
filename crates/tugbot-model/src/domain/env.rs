use serde::{Deserialize, Serialize};

/// Container environment as the runtime reports it: a list of raw `KEY=VALUE` entries.
///
/// Entries are kept verbatim (an entry without `=` is legal and means "inherit from the host").
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(pub Vec<String>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all raw entries.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Append a `KEY=VALUE` entry.
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.0.push(format!("{}={}", key.as_ref(), value.as_ref()));
    }

    /// Get the value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().rev().find_map(|entry| {
            let (k, v) = entry.split_once('=')?;
            (k == key).then_some(v)
        })
    }

    /// Remove every entry that also appears in `defaults`, regardless of position.
    ///
    /// Remaining entries keep their original relative order.
    pub fn subtract(&self, defaults: &Env) -> Env {
        Env(self
            .0
            .iter()
            .filter(|entry| !defaults.0.contains(entry))
            .cloned()
            .collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Env {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Env;

    #[test]
    fn get_returns_last_match() {
        let mut env = Env::new();
        env.push("FOO", "one");
        env.push("BAR", "x");
        env.push("FOO", "two");

        assert_eq!(env.get("FOO"), Some("two"));
        assert_eq!(env.get("BAR"), Some("x"));
        assert!(env.get("BAZ").is_none());
    }

    #[test]
    fn get_ignores_entries_without_separator() {
        let env: Env = ["HOME", "PATH=/bin"].into_iter().collect();
        assert!(env.get("HOME").is_none());
        assert_eq!(env.get("PATH"), Some("/bin"));
    }

    #[test]
    fn subtract_removes_exact_entries_only() {
        let runtime: Env = ["PATH=/usr/bin", "LANG=C", "MODE=ci"].into_iter().collect();
        let image: Env = ["LANG=C", "PATH=/bin"].into_iter().collect();

        let diff = runtime.subtract(&image);
        assert_eq!(diff.0, vec!["PATH=/usr/bin".to_string(), "MODE=ci".to_string()]);
    }

    #[test]
    fn serde_is_a_plain_array() {
        let env: Env = ["A=1"].into_iter().collect();
        assert_eq!(serde_json::to_string(&env).unwrap(), r#"["A=1"]"#);
    }
}
