//! Tabular input and prompt templates.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use urlfinder_core::Record;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("template '{name}' not found in directory '{}'", .dir.display())]
    TemplateNotFound { name: String, dir: PathBuf },

    #[error("data file '{}' not found", .0.display())]
    DataNotFound(PathBuf),

    #[error("CSV error in '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a headed CSV file into records, one per data row.
///
/// Rows shorter than the header leave the trailing fields absent.
pub fn load_records(path: &Path) -> Result<Vec<Record>, InputError> {
    if !path.is_file() {
        return Err(InputError::DataNotFound(path.to_path_buf()));
    }
    let csv_err = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        records.push(headers.iter().zip(row.iter()).collect::<Record>());
    }
    info!(path = %path.display(), rows = records.len(), "loaded records");
    Ok(records)
}

/// A prompt template with `{{ field }}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: String,
    source: String,
}

impl PromptTemplate {
    /// Load `name` from `dir`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, InputError> {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(InputError::TemplateNotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(&path)?;
        Ok(Self::from_source(name, source))
    }

    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute each `{{ field }}` with the record's value; unknown fields render empty.
    pub fn render(&self, record: &Record) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();
        while let Some(open) = rest.find("{{") {
            let Some(len) = rest[open + 2..].find("}}") else {
                break;
            };
            out.push_str(&rest[..open]);
            let field = rest[open + 2..open + 2 + len].trim();
            out.push_str(record.get(field).unwrap_or_default());
            rest = &rest[open + 2 + len + 2..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn loads_rows_keyed_by_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "company,website").unwrap();
        writeln!(file, "Diebold,dieboldnixdorf.com").unwrap();
        writeln!(file, "\"PACCAR, Inc\",paccar.com").unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("company"), Some("Diebold"));
        assert_eq!(records[1].get("company"), Some("PACCAR, Inc"));
        assert_eq!(records[1].get("website"), Some("paccar.com"));
    }

    #[test]
    fn short_rows_leave_fields_absent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "company,website").unwrap();
        writeln!(file, "Diebold").unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].get("company"), Some("Diebold"));
        assert_eq!(records[0].get("website"), None);
    }

    #[test]
    fn missing_data_file() {
        let err = load_records(Path::new("/nonexistent/businesses.txt")).unwrap_err();
        assert!(matches!(err, InputError::DataNotFound(_)));
        assert!(err.to_string().contains("businesses.txt"));
    }

    #[test]
    fn missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = PromptTemplate::load(dir.path(), "instructions.txt").unwrap_err();
        assert!(matches!(
            err,
            InputError::TemplateNotFound { ref name, .. } if name == "instructions.txt"
        ));
    }

    #[test]
    fn loads_template_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("instructions.txt"), "Company: {{company}}").unwrap();
        let template = PromptTemplate::load(dir.path(), "instructions.txt").unwrap();
        assert_eq!(template.name(), "instructions.txt");
        assert_eq!(
            template.render(&record(&[("company", "Diebold")])),
            "Company: Diebold"
        );
    }

    #[test]
    fn render_substitutes_fields() {
        let template = PromptTemplate::from_source(
            "t",
            "Find the G2 reviews page for {{ company }} ({{website}}). Unknown: [{{ missing }}]",
        );
        let rendered = template.render(&record(&[
            ("company", "Diebold"),
            ("website", "dieboldnixdorf.com"),
        ]));
        assert_eq!(
            rendered,
            "Find the G2 reviews page for Diebold (dieboldnixdorf.com). Unknown: []"
        );
    }

    #[test]
    fn unclosed_placeholder_left_verbatim() {
        let template = PromptTemplate::from_source("t", "Hello {{ company");
        assert_eq!(template.render(&Record::new()), "Hello {{ company");
    }
}
