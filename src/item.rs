use crate::config::CaseMode;
use crate::errors::Result;
use crate::types::{ID_FIELD, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Conversion used by `get_collection` to wrap reply rows.
pub trait FromRow: Sized {
    fn from_row(row: Row, case: CaseMode) -> Self;
}

impl FromRow for Row {
    fn from_row(row: Row, _case: CaseMode) -> Self {
        row
    }
}

/// A reply row with typed accessors; keys follow the menu's [`CaseMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: BTreeMap<String, String>,
}

impl FromRow for Item {
    fn from_row(row: Row, case: CaseMode) -> Self {
        let fields = row.into_iter().map(|(k, v)| (case.field_name(&k), v)).collect();
        Self { fields }
    }
}

impl Item {
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Parsed value; `None` when missing or unparseable.
    pub fn get_as<V: FromStr>(&self, key: &str) -> Option<V> {
        self.get(key).and_then(|s| s.parse().ok())
    }

    /// Device booleans are spelled `true`/`false` or `yes`/`no`.
    pub fn is_yes(&self, key: &str) -> bool {
        matches!(self.get(key), Some("true" | "yes"))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn into_row(self) -> Row {
        self.fields
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::row;

    #[test]
    fn snake_case_keys() {
        let item = Item::from_row(row(&[(".id", "*1"), ("mac-address", "00:11")]), CaseMode::Snake);
        assert_eq!(item.id(), Some("*1"));
        assert_eq!(item.get("mac_address"), Some("00:11"));
        assert_eq!(item.get("mac-address"), None);
    }

    #[test]
    fn typed_access() {
        let item = Item::from_row(row(&[("mtu", "1500"), ("running", "true"), ("disabled", "no")]), CaseMode::Kebab);
        assert_eq!(item.get_as::<u32>("mtu"), Some(1500));
        assert_eq!(item.get_as::<u32>("running"), None);
        assert!(item.is_yes("running"));
        assert!(!item.is_yes("disabled"));
        assert_eq!(item.to_json().unwrap(), r#"{"disabled":"no","mtu":"1500","running":"true"}"#);
    }
}
