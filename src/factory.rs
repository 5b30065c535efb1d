//! Request factory seam

use crate::document::DocumentView;
use crate::errors::Result;
use crate::exchange::{Request, Response};
use crate::scenario::Step;
use crate::values::ValueBag;

/// Builds the next step's request from the just-completed exchange.
///
/// Called exactly once per step transition, never for the terminal step,
/// always with the live (already mutated) value store and the previous
/// exchange's artifacts.
pub trait RequestFactory: Send + Sync {
    fn create(
        &self,
        step: &Step,
        values: &ValueBag,
        request: &Request,
        response: &Response,
        document: Option<&DocumentView>,
    ) -> Result<Request>;
}
