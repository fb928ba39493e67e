//! Request extractors that validate payloads before handlers run.

mod validated;
pub use validated::{ValidatedJson, ValidatedQuery};
