//! Plain-text report for each processed record.

use urlfinder_core::search_url;

use crate::pipeline::{BatchSummary, Failure, QueryReport, RecordOutcome};

/// Render one record's outcome as the block printed to stdout.
pub fn render_outcome(index: usize, outcome: &RecordOutcome) -> String {
    let mut out = format!("\n--- Processing Business {index} ---\n");
    match outcome {
        RecordOutcome::Reported(report) => render_report(&mut out, report),
        RecordOutcome::Failed(failure) => render_failure(&mut out, failure),
    }
    out
}

fn render_report(out: &mut String, report: &QueryReport) {
    out.push_str(&format!("Extracted Query: {}\n", report.query));
    if report.repaired {
        out.push_str("(model output needed JSON repair)\n");
    }
    out.push_str(&format!("\n[ Confidence: {} ]\n", report.confidence.tier));
    out.push_str(&format!(
        "Validation Summary: {}\n",
        report.confidence.summary()
    ));
    out.push_str("\nVerification Links (Copy & Paste to Check):\n");
    for (engine, _) in &report.confidence.breakdown {
        out.push_str(&format!(
            "  {}: {}\n",
            engine.label(),
            search_url(&report.query, engine.as_str())
        ));
    }
}

fn render_failure(out: &mut String, failure: &Failure) {
    let line = match failure {
        Failure::Invocation(e) => format!("Model invocation failed: {e}"),
        Failure::Parse(e) => format!(
            "Failed to parse or repair JSON. Raw output:\n{}",
            e.raw.trim()
        ),
        Failure::Extraction { parsed } => {
            format!("Could not reliably extract the query. Data received: {parsed}")
        }
    };
    out.push_str(&line);
    out.push('\n');
}

pub fn render_summary(summary: &BatchSummary) -> String {
    format!(
        "\n{} records: {} reported, {} failed",
        summary.total, summary.reported, summary.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use urlfinder_ai::{InvocationError, ParseFailure};
    use urlfinder_core::{EngineSet, MatchResult, score};

    fn report(query: &str, flags: &[bool]) -> RecordOutcome {
        RecordOutcome::Reported(QueryReport {
            query: query.to_string(),
            confidence: score(&MatchResult::from_flags(&EngineSet::default(), flags)),
            repaired: false,
        })
    }

    #[test]
    fn report_lists_tier_summary_and_links() {
        let text = render_outcome(1, &report("diebold g2 reviews", &[true, false, true]));
        assert!(text.contains("--- Processing Business 1 ---"));
        assert!(text.contains("Extracted Query: diebold g2 reviews"));
        assert!(text.contains("[ Confidence: MEDIUM ]"));
        assert!(text.contains(
            "Validation Summary: (2/3 matches) google: MATCH | bing: FAIL | duckduckgo: MATCH"
        ));
        assert!(text.contains("  Google: https://www.google.com/search?q=diebold+g2+reviews"));
        assert!(text.contains("  Bing: https://www.bing.com/search?q=diebold+g2+reviews"));
        assert!(text.contains("  DuckDuckGo: https://duckduckgo.com/?q=diebold+g2+reviews"));
        assert!(!text.contains("repair"));
    }

    #[test]
    fn repaired_report_is_noted_once() {
        let outcome = RecordOutcome::Reported(QueryReport {
            query: "paccar g2 reviews".into(),
            confidence: score(&MatchResult::from_flags(&EngineSet::default(), &[true, true, true])),
            repaired: true,
        });
        let text = render_outcome(4, &outcome);
        assert!(text.contains("Extracted Query: paccar g2 reviews\n(model output needed JSON repair)\n"));
        assert!(text.contains("[ Confidence: HIGH ]"));
        assert!(text.ends_with("  DuckDuckGo: https://duckduckgo.com/?q=paccar+g2+reviews\n"));
    }

    #[test]
    fn invocation_failure_is_one_line() {
        let outcome = RecordOutcome::Failed(Failure::Invocation(InvocationError::Server {
            status: 500,
            body: "out of memory".into(),
        }));
        assert_eq!(
            render_outcome(5, &outcome),
            "\n--- Processing Business 5 ---\nModel invocation failed: model server returned 500: out of memory\n"
        );
    }

    #[test]
    fn parse_failure_shows_raw_output() {
        let outcome = RecordOutcome::Failed(Failure::Parse(ParseFailure {
            raw: "  not json  ".into(),
            reason: "expected value".into(),
        }));
        let text = render_outcome(2, &outcome);
        assert!(text.contains("Failed to parse or repair JSON. Raw output:\nnot json\n"));
    }

    #[test]
    fn extraction_miss_shows_parsed_value() {
        let outcome = RecordOutcome::Failed(Failure::Extraction {
            parsed: json!({"company": "diebold"}),
        });
        let text = render_outcome(3, &outcome);
        assert!(text.contains(r#"Data received: {"company":"diebold"}"#));
    }

    #[test]
    fn summary_line() {
        let summary = BatchSummary {
            total: 3,
            reported: 2,
            failed: 1,
        };
        assert_eq!(render_summary(&summary), "\n3 records: 2 reported, 1 failed");
    }
}
