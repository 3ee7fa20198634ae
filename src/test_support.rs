#![cfg(test)]

use crate::types::Row;

/// Build a reply row from literal pairs.
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}
