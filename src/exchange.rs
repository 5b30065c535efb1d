//! Exchange options threaded between the caller, the runner and the transport

use std::time::Duration;

use bytes::Bytes;
use indexmap::IndexMap;

use crate::errors::{Result, SteplineError};
use crate::scenario::ScenarioCursor;
use crate::values::ValueBag;

/// Request type dispatched through the transport seam.
pub type Request = http::Request<Bytes>;

/// Response type produced by the transport seam.
pub type Response = http::Response<Bytes>;

/// Header carrying the correlation id used for log correlation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of a request, if the caller set one.
pub fn correlation_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Per-invocation settings threaded between the caller and the transport.
///
/// Expectation and extraction metadata is rebuilt on every step transition;
/// values from a previous step never leak into a step that defines none.
#[derive(Debug, Clone)]
pub struct ExchangeOptions {
    /// Whether the transport may follow redirects. Forced off for every
    /// step dispatch: scenarios model redirects as explicit steps.
    pub allow_redirects: bool,

    /// Computed delay the transport honors before dispatching. Advisory
    /// data for the transport; the runner itself never sleeps.
    pub delay: Duration,

    /// Expectation expressions of the active step, when it defines any.
    pub expectations: Option<Vec<String>>,

    /// Extraction pairs of the active step, when it defines any.
    pub extractions: Option<IndexMap<String, String>>,

    /// Cursor of the active step; absent for plain pass-through calls.
    pub step: Option<ScenarioCursor>,

    /// Shared value store for this invocation.
    pub values: Option<ValueBag>,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            allow_redirects: true,
            delay: Duration::ZERO,
            expectations: None,
            extractions: None,
            step: None,
            values: None,
        }
    }
}

impl ExchangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying an active step cursor.
    pub fn for_scenario(cursor: ScenarioCursor) -> Self {
        Self {
            step: Some(cursor),
            ..Self::default()
        }
    }

    pub fn with_values(mut self, values: ValueBag) -> Self {
        self.values = Some(values);
        self
    }

    /// Fail-fast validation of step invariants, run before any network
    /// activity. Violations surface as `Argument` and are never logged.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref cursor) = self.step {
            let step = cursor.step();
            if step.samples < 1 {
                return Err(SteplineError::Argument(format!(
                    "Step {} ({}): samples must be >= 1",
                    cursor.index(),
                    step.name
                )));
            }
        }
        Ok(())
    }
}
