//! Search validation: does each configured engine find the query's target?

mod error;
pub use error::SearchError;

pub mod backend;
pub mod simulated;
pub mod validator;

pub use backend::SearchBackend;
pub use simulated::SimulatedBackend;
pub use validator::SearchValidator;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpBackend, HttpSearchConfig};
