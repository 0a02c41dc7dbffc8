//! One row of tabular input.

use std::collections::HashMap;

/// Field name → field value for one input row. The header row defines the names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
