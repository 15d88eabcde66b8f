//! gavel-core: Validation engine for HTTP contract testing
//!
//! Given a real HTTP request or response and an expectation of it, this crate
//! infers media types for headers and body, selects the comparator able to
//! compare each pair, runs it behind a failure boundary, and aggregates the
//! findings into one [`ValidationReport`].

pub mod compare;
pub mod decode;
pub mod engine;
pub mod fixture;
pub mod headers;
pub mod lint;
pub mod media_type;
pub mod message;
pub mod report;
pub mod resolve;
pub mod select;
pub mod status;

pub use compare::{ComparatorError, ComparatorResult, Comparators, Comparison};
pub use engine::{MessageView, PreconditionError};
pub use fixture::{FixtureError, FixtureFormat};
pub use media_type::is_json_content_type;
pub use message::{Expectation, HttpMessage, HttpRequest, HttpResponse, Validatable};
pub use report::{Component, ComponentResult, Finding, Severity, ValidationReport, ValidatorKind};
