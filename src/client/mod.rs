//! Transport seam between the runner and the HTTP client

pub mod http;

pub use self::http::ReqwestTransport;

use futures::future::BoxFuture;

use crate::errors::Result;
use crate::exchange::{ExchangeOptions, Request, Response};

/// Asynchronous transport the runner dispatches prepared requests to.
///
/// Implementations own delay and redirect handling: `options.delay` and
/// `options.allow_redirects` are advisory data set by the runner, which
/// itself never sleeps and never follows redirects.
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: &'a Request,
        options: &'a ExchangeOptions,
    ) -> BoxFuture<'a, Result<Response>>;
}
