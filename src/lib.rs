//! stepline library interface
//!
//! This crate drives scripted chains of HTTP requests ("scenarios"). Each
//! step's request may depend on values extracted from earlier responses,
//! be gated by expectations, and be delayed by a computed expression; an
//! ordered extension pipeline owns the extraction/expectation semantics.
//!
//! # Module Organization
//!
//! - [`errors`] - Error types (SteplineError, Result)
//! - [`scenario`] - Step chain definition, cursor and file loading
//! - [`values`] - Shared value store (ValueBag)
//! - [`exchange`] - Exchange options and request/response types
//! - [`eval`] - Expression evaluator seam and the tera-backed default
//! - [`document`] - Document views over markup response bodies
//! - [`extension`] - Extension pipeline hooks
//! - [`factory`] - Request factory seam
//! - [`client`] - Transport seam and the reqwest adapter
//! - [`runner`] - Scenario execution driver

pub mod client;
pub mod document;
pub mod errors;
pub mod eval;
pub mod exchange;
pub mod extension;
pub mod factory;
pub mod runner;
pub mod scenario;
pub mod values;

pub use client::{ReqwestTransport, Transport};
pub use document::DocumentView;
pub use errors::{Result, SteplineError};
pub use eval::{EvalError, ExpressionEvaluator, TemplateEvaluator};
pub use exchange::{correlation_id, ExchangeOptions, Request, Response, REQUEST_ID_HEADER};
pub use extension::Extension;
pub use factory::RequestFactory;
pub use runner::{ScenarioRunner, ScenarioRunnerBuilder};
pub use scenario::{load_scenario, validate_scenario, Scenario, ScenarioCursor, Step};
pub use values::ValueBag;
