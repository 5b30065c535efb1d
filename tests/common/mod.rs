//! Common test doubles for stepline integration tests
//!
//! This module provides shared test infrastructure including:
//! - A scripted transport that serves canned responses without a network
//! - Recording extensions and a failing extension
//! - A request factory that builds requests from step names
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use bytes::Bytes;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use stepline::{
    DocumentView, ExchangeOptions, Extension, Request, RequestFactory, Response, Result, Step,
    SteplineError, Transport, ValueBag,
};

/// Build a request with an empty body.
pub fn request(method: &str, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}

/// Build a response with the given content type and body.
pub fn response(status: u16, content_type: &str, body: &str) -> Response {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(Bytes::from(body.to_string()))
        .unwrap()
}

/// Transport double that serves scripted responses in order and records
/// the options of every dispatch.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Response>>,
    pub options_seen: Mutex<Vec<ExchangeOptions>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            options_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatch_count(&self) -> usize {
        self.options_seen.lock().unwrap().len()
    }

    pub fn option_at(&self, index: usize) -> ExchangeOptions {
        self.options_seen.lock().unwrap()[index].clone()
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(
        &'a self,
        _request: &'a Request,
        options: &'a ExchangeOptions,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(async move {
            self.options_seen.lock().unwrap().push(options.clone());
            self.responses.lock().unwrap().pop_front().ok_or_else(|| {
                SteplineError::Argument("scripted transport ran out of responses".to_string())
            })
        })
    }
}

/// What a factory call observed.
#[derive(Debug, Clone)]
pub struct CreateRecord {
    pub step_name: String,
    pub values_snapshot: IndexMap<String, JsonValue>,
    pub document_present: bool,
}

/// Factory double that builds GET requests from the step name and records
/// every call.
pub struct NamedFactory {
    base: String,
    pub created: Mutex<Vec<CreateRecord>>,
}

impl NamedFactory {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.step_name.clone())
            .collect()
    }
}

impl RequestFactory for NamedFactory {
    fn create(
        &self,
        step: &Step,
        values: &ValueBag,
        _request: &Request,
        _response: &Response,
        document: Option<&DocumentView>,
    ) -> Result<Request> {
        self.created.lock().unwrap().push(CreateRecord {
            step_name: step.name.clone(),
            values_snapshot: values.all(),
            document_present: document.is_some(),
        });
        Ok(request("GET", &format!("{}/{}", self.base, step.name)))
    }
}

/// Extension double that records hook invocations and optionally writes a
/// fixed key into the value store on every processed response.
pub struct RecordingExtension {
    pub write: Option<(String, JsonValue)>,
    pub prepared: Mutex<Vec<String>>,
    pub processed: Mutex<Vec<(String, bool)>>,
}

impl RecordingExtension {
    pub fn new() -> Self {
        Self {
            write: None,
            prepared: Mutex::new(Vec::new()),
            processed: Mutex::new(Vec::new()),
        }
    }

    pub fn writing(key: impl Into<String>, value: JsonValue) -> Self {
        Self {
            write: Some((key.into(), value)),
            ..Self::new()
        }
    }

    pub fn prepared_count(&self) -> usize {
        self.prepared.lock().unwrap().len()
    }

    pub fn processed_steps(&self) -> Vec<(String, bool)> {
        self.processed.lock().unwrap().clone()
    }
}

impl Extension for RecordingExtension {
    fn prepare_request(
        &self,
        step: &Step,
        _values: &ValueBag,
        _request: &Request,
        options: ExchangeOptions,
    ) -> Result<ExchangeOptions> {
        self.prepared.lock().unwrap().push(step.name.clone());
        Ok(options)
    }

    fn process_response(
        &self,
        step: &Step,
        values: &ValueBag,
        _request: &Request,
        _response: &Response,
        document: Option<&DocumentView>,
    ) -> Result<()> {
        self.processed
            .lock()
            .unwrap()
            .push((step.name.clone(), document.is_some()));
        if let Some((ref key, ref value)) = self.write {
            values.put(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Extension double whose post-response hook always fails.
pub struct FailingExtension {
    pub message: String,
}

impl FailingExtension {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Extension for FailingExtension {
    fn process_response(
        &self,
        _step: &Step,
        _values: &ValueBag,
        _request: &Request,
        _response: &Response,
        _document: Option<&DocumentView>,
    ) -> Result<()> {
        Err(SteplineError::Extension(self.message.clone()))
    }
}
