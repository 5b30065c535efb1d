//! reqwest-backed transport adapter

use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::redirect::Policy;
use url::Url;

use crate::errors::Result;
use crate::exchange::{ExchangeOptions, Request, Response};

use super::Transport;

/// Transport over pooled [`reqwest::Client`]s.
///
/// Keeps one redirect-following client and one direct client so the
/// per-dispatch redirect policy does not rebuild a connection pool.
pub struct ReqwestTransport {
    following: reqwest::Client,
    direct: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Ok(Self {
            following: reqwest::Client::builder().build()?,
            direct: reqwest::Client::builder().redirect(Policy::none()).build()?,
        })
    }

    fn client_for(&self, options: &ExchangeOptions) -> &reqwest::Client {
        if options.allow_redirects {
            &self.following
        } else {
            &self.direct
        }
    }

    async fn dispatch(&self, request: &Request, options: &ExchangeOptions) -> Result<Response> {
        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let url = Url::parse(&request.uri().to_string())?;

        let mut builder = self
            .client_for(options)
            .request(request.method().clone(), url)
            .headers(request.headers().clone());

        if !request.body().is_empty() {
            builder = builder.body(request.body().clone());
        }

        let upstream = builder.send().await?;

        let status = upstream.status();
        let headers = upstream.headers().clone();
        let body: Bytes = upstream.bytes().await?;

        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

impl Transport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: &'a Request,
        options: &'a ExchangeOptions,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(self.dispatch(request, options))
    }
}
