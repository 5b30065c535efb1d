//! Scenario execution driver
//!
//! Walks a scenario's step chain: prepares each request (computed delay,
//! expectation/extraction metadata, extension pre-hooks), dispatches it to
//! the transport, then builds the document view, runs extension post-hooks
//! and asks the request factory for the next request until the terminal
//! step's response is returned.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::client::Transport;
use crate::document::DocumentView;
use crate::errors::{Result, SteplineError};
use crate::eval::{ExpressionEvaluator, TemplateEvaluator};
use crate::exchange::{correlation_id, ExchangeOptions, Request, Response};
use crate::extension::Extension;
use crate::factory::RequestFactory;
use crate::scenario::ScenarioCursor;
use crate::values::ValueBag;

/// Drives one scenario chain per invocation.
///
/// Independent invocations may progress concurrently, each with its own
/// value store; within one chain every hook and dispatch is strictly
/// sequential. Collaborators and the extension pipeline are fixed at
/// construction.
pub struct ScenarioRunner {
    transport: Arc<dyn Transport>,
    factory: Arc<dyn RequestFactory>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl ScenarioRunner {
    pub fn builder(
        transport: Arc<dyn Transport>,
        factory: Arc<dyn RequestFactory>,
    ) -> ScenarioRunnerBuilder {
        ScenarioRunnerBuilder::new(transport, factory)
    }

    /// Execute a chain starting from `request`.
    ///
    /// Without an active step cursor this is a plain pass-through to the
    /// transport. With one, the runner walks the chain iteratively (an
    /// explicit loop, so long scenarios cannot grow the stack) and returns
    /// the terminal step's response unmodified.
    pub async fn invoke(&self, request: Request, options: ExchangeOptions) -> Result<Response> {
        let Some(cursor) = options.step.clone() else {
            return self.transport.send(&request, &options).await;
        };

        options.validate()?;

        let values = options.values.clone().unwrap_or_default();

        let mut request = request;
        let mut options = options;
        let mut cursor = cursor;
        options.values = Some(values.clone());

        loop {
            options = self.prepare_request(&cursor, &values, &request, options)?;

            let step = cursor.step();
            info!(
                request_id = correlation_id(&request),
                "Step {}: {} {} {}{}",
                cursor.index(),
                step.name,
                request.method(),
                request.uri(),
                if step.samples > 1 {
                    format!(" ({} samples)", step.samples)
                } else {
                    String::new()
                },
            );

            let response = self.transport.send(&request, &options).await?;

            let document = DocumentView::from_response(&response);

            for extension in &self.extensions {
                extension.process_response(
                    cursor.step(),
                    &values,
                    &request,
                    &response,
                    document.as_ref(),
                )?;
            }

            let Some(next) = cursor.advance() else {
                return Ok(response);
            };

            let next_request =
                self.factory
                    .create(next.step(), &values, &request, &response, document.as_ref())?;

            options.step = Some(next.clone());
            cursor = next;
            request = next_request;
        }
    }

    fn prepare_request(
        &self,
        cursor: &ScenarioCursor,
        values: &ValueBag,
        request: &Request,
        mut options: ExchangeOptions,
    ) -> Result<ExchangeOptions> {
        let step = cursor.step();

        // Scenarios model redirects as explicit steps.
        options.allow_redirects = false;

        options.delay = match step.delay {
            None => Duration::ZERO,
            Some(ref expression) => self.compute_delay(expression, values, request)?,
        };

        // Metadata from a previous step must not leak into this one.
        options.expectations = step.has_expectations().then(|| step.expectations.clone());
        options.extractions = step.has_extractions().then(|| step.extractions.clone());

        for extension in &self.extensions {
            options = extension.prepare_request(step, values, request, options)?;
        }

        Ok(options)
    }

    fn compute_delay(
        &self,
        expression: &str,
        values: &ValueBag,
        request: &Request,
    ) -> Result<Duration> {
        let evaluated = match self.evaluator.evaluate(expression, &values.all()) {
            Ok(value) => value,
            Err(err) => {
                let msg = format!("Delay syntax error in \"{}\": {}", expression, err);
                error!(request_id = correlation_id(request), "{}", msg);
                return Err(SteplineError::Argument(msg));
            }
        };

        match delay_millis(&evaluated) {
            Some(millis) => Ok(Duration::from_millis(millis)),
            None => {
                let msg = format!(
                    "Delay syntax error in \"{}\": expected a non-negative number, got {}",
                    expression, evaluated
                );
                error!(request_id = correlation_id(request), "{}", msg);
                Err(SteplineError::Argument(msg))
            }
        }
    }
}

/// Millisecond delay from an evaluated expression value.
fn delay_millis(value: &JsonValue) -> Option<u64> {
    let number = value.as_number()?;
    if let Some(int) = number.as_u64() {
        return Some(int);
    }
    let float = number.as_f64()?;
    (float >= 0.0).then(|| float.round() as u64)
}

/// Assembles a [`ScenarioRunner`].
///
/// Extensions registered here run in registration order and are fixed for
/// the runner's lifetime.
pub struct ScenarioRunnerBuilder {
    transport: Arc<dyn Transport>,
    factory: Arc<dyn RequestFactory>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl ScenarioRunnerBuilder {
    pub fn new(transport: Arc<dyn Transport>, factory: Arc<dyn RequestFactory>) -> Self {
        Self {
            transport,
            factory,
            evaluator: Arc::new(TemplateEvaluator),
            extensions: Vec::new(),
        }
    }

    /// Replace the default expression evaluator.
    pub fn evaluator(mut self, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Append an extension to the pipeline.
    pub fn extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn build(self) -> ScenarioRunner {
        ScenarioRunner {
            transport: self.transport,
            factory: self.factory,
            evaluator: self.evaluator,
            extensions: self.extensions,
        }
    }
}
