//! Per-record orchestration: prompt → model → parse → extract → validate → score.
//!
//! Records are independent and processed one at a time. A failure at any stage
//! ends that record only; the batch always runs to completion.

use std::fmt;

use serde_json::Value;
use tracing::{Instrument, debug, info, info_span, warn};
use urlfinder_ai::{InvocationError, ModelClient, ParseFailure, QueryExtractor, parse_response};
use urlfinder_core::{Confidence, Record, score};
use urlfinder_search::SearchValidator;

use crate::input::PromptTemplate;

/// Where a record is in its pass through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rendered,
    ModelInvoked,
    Parsed,
    Extracted,
    Validated,
    Scored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rendered => "rendered",
            Self::ModelInvoked => "model-invoked",
            Self::Parsed => "parsed",
            Self::Extracted => "extracted",
            Self::Validated => "validated",
            Self::Scored => "scored",
        };
        f.write_str(s)
    }
}

/// Why a record was skipped.
#[derive(Debug)]
pub enum Failure {
    Invocation(InvocationError),
    Parse(ParseFailure),
    /// Parsed fine, but no key or value looked like a search query.
    Extraction { parsed: Value },
}

impl Failure {
    /// The last stage the record reached before failing.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Invocation(_) => Stage::Rendered,
            Self::Parse(_) => Stage::ModelInvoked,
            Self::Extraction { .. } => Stage::Parsed,
        }
    }
}

/// A record that made it all the way through.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub query: String,
    pub confidence: Confidence,
    /// The model's JSON needed repair before it parsed.
    pub repaired: bool,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Reported(QueryReport),
    Failed(Failure),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub reported: usize,
    pub failed: usize,
}

pub struct Pipeline {
    model: Box<dyn ModelClient>,
    extractor: QueryExtractor,
    validator: SearchValidator,
}

impl Pipeline {
    pub fn new(
        model: Box<dyn ModelClient>,
        extractor: QueryExtractor,
        validator: SearchValidator,
    ) -> Self {
        Self {
            model,
            extractor,
            validator,
        }
    }

    /// Run one rendered prompt through every stage.
    pub async fn process(&self, prompt: &str) -> RecordOutcome {
        let raw = match self.model.generate(prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(model = %self.model.model(), error = %e, "model invocation failed");
                return RecordOutcome::Failed(Failure::Invocation(e));
            }
        };
        debug!(stage = %Stage::ModelInvoked, chars = raw.len(), "model replied");

        let parsed = match parse_response(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, raw = %e.raw.trim(), "could not parse or repair model output");
                return RecordOutcome::Failed(Failure::Parse(e));
            }
        };
        debug!(stage = %Stage::Parsed, repaired = parsed.repaired, "response parsed");

        let Some(query) = self.extractor.extract(&parsed.value) else {
            warn!(parsed = %parsed.value, "no query-like field in model output");
            return RecordOutcome::Failed(Failure::Extraction {
                parsed: parsed.value,
            });
        };
        debug!(stage = %Stage::Extracted, query = %query, "query extracted");

        let matches = self.validator.check_all(&query).await;
        debug!(stage = %Stage::Validated, matches = matches.match_count(), "query validated");

        let confidence = score(&matches);
        debug!(stage = %Stage::Scored, tier = %confidence.tier, "confidence scored");

        RecordOutcome::Reported(QueryReport {
            query,
            confidence,
            repaired: parsed.repaired,
        })
    }

    /// Render and process every record in order, handing each outcome to `on_outcome`.
    pub async fn run<F>(
        &self,
        template: &PromptTemplate,
        records: &[Record],
        mut on_outcome: F,
    ) -> BatchSummary
    where
        F: FnMut(usize, &RecordOutcome),
    {
        let mut summary = BatchSummary {
            total: records.len(),
            ..Default::default()
        };

        for (i, record) in records.iter().enumerate() {
            let index = i + 1;
            let span = info_span!("record", index);
            let outcome = async {
                let prompt = template.render(record);
                debug!(stage = %Stage::Rendered, chars = prompt.len(), "prompt rendered");
                self.process(&prompt).await
            }
            .instrument(span)
            .await;

            match &outcome {
                RecordOutcome::Reported(_) => summary.reported += 1,
                RecordOutcome::Failed(failure) => {
                    summary.failed += 1;
                    debug!(index, stage = %failure.stage(), "record skipped");
                }
            }
            on_outcome(index, &outcome);
        }

        info!(
            total = summary.total,
            reported = summary.reported,
            failed = summary.failed,
            "batch complete"
        );
        summary
    }
}
