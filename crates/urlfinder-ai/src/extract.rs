//! Heuristic search-query extraction from a JSON value of unknown shape.
//!
//! The model may name the query in a field name (`{"G2 Reviews Query": ...}`)
//! or in a field value (`{"search": "Diebold G2 Reviews"}`). Extraction is a
//! first-match scan: object entries in their original order, and for each entry
//! the rules in list order. Matching is case-sensitive.

use serde_json::Value;

use crate::EmptyRule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The entry's key contains the substring; the key is the candidate.
    KeyContains(String),
    /// The entry's value is a string containing the substring; the value is the candidate.
    ValueContains(String),
}

impl Rule {
    fn needle(&self) -> &str {
        match self {
            Self::KeyContains(s) | Self::ValueContains(s) => s.as_str(),
        }
    }

    fn apply<'v>(&self, key: &'v str, value: &'v Value) -> Option<&'v str> {
        match self {
            Self::KeyContains(needle) => key.contains(needle.as_str()).then_some(key),
            Self::ValueContains(needle) => value.as_str().filter(|v| v.contains(needle.as_str())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryExtractor {
    rules: Vec<Rule>,
}

impl Default for QueryExtractor {
    /// Key containing `Reviews` or `Query`, then value containing `Reviews` or `Query`.
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::KeyContains("Reviews".into()),
                Rule::KeyContains("Query".into()),
                Rule::ValueContains("Reviews".into()),
                Rule::ValueContains("Query".into()),
            ],
        }
    }
}

impl QueryExtractor {
    pub fn new(rules: Vec<Rule>) -> Result<Self, EmptyRule> {
        if rules.iter().any(|r| r.needle().is_empty()) {
            return Err(EmptyRule);
        }
        Ok(Self { rules })
    }

    /// The first key or string value selected by the rules, or `None`.
    ///
    /// Non-object values never yield a candidate.
    pub fn extract(&self, value: &Value) -> Option<String> {
        let object = value.as_object()?;
        object.iter().find_map(|(key, val)| {
            self.rules
                .iter()
                .find_map(|rule| rule.apply(key, val))
                .filter(|candidate| !candidate.is_empty())
                .map(str::to_string)
        })
    }
}
