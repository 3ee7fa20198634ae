use std::collections::BTreeMap;

/// Conversion of a filter value into its wire text.
///
/// Booleans use the device's `yes`/`no` spelling.
pub trait IntoParam {
    fn into_param(self) -> String;
}

impl IntoParam for &str {
    fn into_param(self) -> String {
        self.to_string()
    }
}

impl IntoParam for String {
    fn into_param(self) -> String {
        self
    }
}

impl IntoParam for &String {
    fn into_param(self) -> String {
        self.clone()
    }
}

impl IntoParam for bool {
    fn into_param(self) -> String {
        String::from(if self { "yes" } else { "no" })
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(impl IntoParam for $t {
            fn into_param(self) -> String {
                self.to_string()
            }
        })*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// What a `where`-family call filters on: a single attribute, or an ordered batch
/// of attributes that each become their own condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    Single { name: String, value: String },
    Batch(Vec<(String, String)>),
}

impl Criteria {
    pub fn single(name: impl Into<String>, value: impl IntoParam) -> Self {
        Self::Single { name: name.into(), value: value.into_param() }
    }

    /// Attribute name without a value.
    pub fn key(name: impl Into<String>) -> Self {
        Self::Single { name: name.into(), value: String::new() }
    }

    pub fn batch<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoParam,
    {
        Self::Batch(pairs.into_iter().map(|(k, v)| (k.into(), v.into_param())).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Batch(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Self::Single { name, value } => vec![(name, value)],
            Self::Batch(pairs) => pairs,
        }
    }
}

impl From<&str> for Criteria {
    fn from(name: &str) -> Self {
        Self::key(name)
    }
}

impl From<String> for Criteria {
    fn from(name: String) -> Self {
        Self::key(name)
    }
}

impl<K: Into<String>, V: IntoParam> From<(K, V)> for Criteria {
    fn from((name, value): (K, V)) -> Self {
        Self::single(name, value)
    }
}

impl<K: Into<String>, V: IntoParam> From<Vec<(K, V)>> for Criteria {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::batch(pairs)
    }
}

impl<K: Into<String>, V: IntoParam, const N: usize> From<[(K, V); N]> for Criteria {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::batch(pairs)
    }
}

impl<V: IntoParam> From<BTreeMap<String, V>> for Criteria {
    fn from(map: BTreeMap<String, V>) -> Self {
        Self::batch(map)
    }
}

/// One field name or an ordered list of them.
pub trait IntoFields {
    fn into_fields(self) -> Vec<String>;
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>> IntoFields for Vec<S> {
    fn into_fields(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoFields for [S; N] {
    fn into_fields(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoFields for &[&str] {
    fn into_fields(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}
