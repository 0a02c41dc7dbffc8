//! Model response handling: strict-then-repair JSON parsing, heuristic query extraction,
//! and the model-invocation client.

mod error;
pub use error::{EmptyRule, InvocationError, ParseFailure};

pub mod extract;
pub mod model;
pub mod repair;
pub mod response;

pub use extract::{QueryExtractor, Rule};
pub use model::ModelClient;
pub use response::{ParsedResponse, parse_response};

#[cfg(feature = "ollama")]
mod ollama;
#[cfg(feature = "ollama")]
pub use ollama::OllamaClient;
