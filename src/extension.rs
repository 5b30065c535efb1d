//! Extension pipeline
//!
//! Extensions observe every exchange of a scenario run through two hooks.
//! The pipeline is resolved once when the runner is built and keeps its
//! registration order for the runner's lifetime; changing the pipeline
//! means building a new runner.

use crate::document::DocumentView;
use crate::errors::Result;
use crate::exchange::{ExchangeOptions, Request, Response};
use crate::scenario::Step;
use crate::values::ValueBag;

/// A plugin with a pre-request and a post-response hook.
///
/// Hooks run strictly sequentially in registration order; no two hooks of
/// the same runner ever overlap. An error from either hook aborts the whole
/// chain, leaving value-store mutations made by earlier hooks in place.
pub trait Extension: Send + Sync {
    /// Pre-request hook. Receives the evolving options value and returns
    /// it, possibly mutated; later extensions observe earlier mutations.
    fn prepare_request(
        &self,
        step: &Step,
        values: &ValueBag,
        request: &Request,
        options: ExchangeOptions,
    ) -> Result<ExchangeOptions> {
        let _ = (step, values, request);
        Ok(options)
    }

    /// Post-response hook, run exactly once per completed step. May mutate
    /// the value store and perform side effects. The document view is
    /// present only for markup responses.
    fn process_response(
        &self,
        step: &Step,
        values: &ValueBag,
        request: &Request,
        response: &Response,
        document: Option<&DocumentView>,
    ) -> Result<()> {
        let _ = (step, values, request, response, document);
        Ok(())
    }
}
