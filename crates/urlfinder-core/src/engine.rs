//! Search engine identifiers and the fixed, ordered engine configuration.
//!
//! The engine set is closed: every engine urlfinder can cross-check against is a
//! variant of [`Engine`]. Which engines take part in a run, and in what order,
//! is an [`EngineSet`] built once at startup and passed by reference to the
//! validator and the scorer.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Google,
    Bing,
    DuckDuckGo,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Google, Engine::Bing, Engine::DuckDuckGo];

    /// Lower-case identifier used on the command line and in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
        }
    }

    /// Display name used in the verification link list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    fn search_base(&self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search?q=",
            Self::Bing => "https://www.bing.com/search?q=",
            Self::DuckDuckGo => "https://duckduckgo.com/?q=",
        }
    }

    /// Direct search link for `query` on this engine.
    ///
    /// Spaces become `+`; everything but ASCII alphanumerics and `_.-~` is
    /// percent-encoded.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.search_base(), encode_query(query))
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "bing" => Ok(Self::Bing),
            "duckduckgo" => Ok(Self::DuckDuckGo),
            _ => Err(CoreError::UnknownEngine(s.trim().to_string())),
        }
    }
}

// form_urlencoded keeps `*` and escapes `~`; search links use the opposite.
fn encode_query(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    encoded.replace('*', "%2A").replace("%7E", "~")
}

/// Build a search link from an engine identifier (`google`, `bing`, `duckduckgo`).
///
/// The identifier must match exactly. Anything else yields an empty string
/// rather than an error.
pub fn search_url(query: &str, engine: &str) -> String {
    Engine::ALL
        .into_iter()
        .find(|e| e.as_str() == engine)
        .map_or_else(String::new, |e| e.search_url(query))
}

/// Ordered, duplicate-free, non-empty list of engines taking part in validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSet {
    engines: Vec<Engine>,
}

impl EngineSet {
    pub fn new(engines: Vec<Engine>) -> Result<Self, CoreError> {
        if engines.is_empty() {
            return Err(CoreError::EmptyEngineSet);
        }
        for (i, engine) in engines.iter().enumerate() {
            if engines[..i].contains(engine) {
                return Err(CoreError::DuplicateEngine(engine.to_string()));
            }
        }
        Ok(Self { engines })
    }

    /// Parse a comma-separated list such as `google,bing,duckduckgo`.
    pub fn parse_list(list: &str) -> Result<Self, CoreError> {
        let engines = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Engine>())
            .collect::<Result<Vec<Engine>, _>>()?;
        Self::new(engines)
    }

    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Engine> + '_ {
        self.engines.iter().copied()
    }
}

impl Default for EngineSet {
    fn default() -> Self {
        Self {
            engines: Engine::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_spaces_as_plus() {
        assert_eq!(
            search_url("diebold g2 reviews", "google"),
            "https://www.google.com/search?q=diebold+g2+reviews"
        );
        assert_eq!(
            search_url("diebold g2 reviews", "bing"),
            "https://www.bing.com/search?q=diebold+g2+reviews"
        );
        assert_eq!(
            search_url("diebold g2 reviews", "duckduckgo"),
            "https://duckduckgo.com/?q=diebold+g2+reviews"
        );
    }

    #[test]
    fn search_url_escapes_reserved_characters() {
        assert_eq!(
            search_url("AT&T \"reviews\"", "google"),
            "https://www.google.com/search?q=AT%26T+%22reviews%22"
        );
    }

    #[test]
    fn tilde_kept_and_asterisk_escaped() {
        assert_eq!(
            search_url("a~b*c", "bing"),
            "https://www.bing.com/search?q=a~b%2Ac"
        );
    }

    #[test]
    fn unsupported_engine_yields_empty_url() {
        assert_eq!(search_url("diebold", "yahoo"), "");
        assert_eq!(search_url("diebold", ""), "");
    }

    #[test]
    fn engine_identifier_must_match_exactly() {
        assert_eq!(search_url("diebold", "Google"), "");
        assert_eq!(search_url("diebold", " bing"), "");
    }

    #[test]
    fn engine_names_parse_case_insensitively() {
        assert_eq!(" DuckDuckGo ".parse::<Engine>().unwrap(), Engine::DuckDuckGo);
        assert!("altavista".parse::<Engine>().is_err());
    }

    #[test]
    fn default_set_is_google_bing_duckduckgo() {
        let set = EngineSet::default();
        assert_eq!(
            set.engines(),
            &[Engine::Google, Engine::Bing, Engine::DuckDuckGo]
        );
    }

    #[test]
    fn parse_list_keeps_order() {
        let set = EngineSet::parse_list("duckduckgo, google").unwrap();
        assert_eq!(set.engines(), &[Engine::DuckDuckGo, Engine::Google]);
    }

    #[test]
    fn duplicates_rejected() {
        let err = EngineSet::parse_list("google,bing,google").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEngine(name) if name == "google"));
    }

    #[test]
    fn empty_set_rejected() {
        assert!(matches!(
            EngineSet::parse_list(" , "),
            Err(CoreError::EmptyEngineSet)
        ));
    }

    #[test]
    fn unknown_engine_rejected() {
        assert!(matches!(
            EngineSet::parse_list("google,yahoo"),
            Err(CoreError::UnknownEngine(name)) if name == "yahoo"
        ));
    }
}
