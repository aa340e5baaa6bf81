//! Observational middleware around a request transport.
//!
//! DESIGN
//! ======
//! `InterceptedClient` forwards every request to the wrapped transport and
//! hands each outcome to its interceptors in registration order. Interceptors
//! observe only: the caller always receives the transport's own response or
//! error, untouched.

#[cfg(test)]
#[path = "intercept_test.rs"]
mod intercept_test;

use std::fmt::Debug;
use std::future::Future;
use std::rc::Rc;

/// Anything that carries an HTTP status code.
pub trait ResponseStatus {
    fn status(&self) -> Option<u16>;
}

/// The real request-issuing function being wrapped.
pub trait Transport {
    type Request;
    type Response: ResponseStatus;
    type Error: Debug;

    fn send(&self, request: Self::Request) -> impl Future<Output = Result<Self::Response, Self::Error>>;
}

/// Stateless classification of one settled request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exchange {
    /// 403 or 404: rights revoked or resource deleted mid-session.
    AccessLost(u16),
    Normal(Option<u16>),
    /// The request rejected before any response arrived.
    Failed,
}

pub fn classify_status(status: Option<u16>) -> Exchange {
    match status {
        Some(code @ (403 | 404)) => Exchange::AccessLost(code),
        other => Exchange::Normal(other),
    }
}

pub trait Interceptor {
    fn on_exchange(&self, exchange: Exchange);
}

pub struct InterceptedClient<T> {
    inner: T,
    interceptors: Vec<Rc<dyn Interceptor>>,
}

impl<T: Transport> InterceptedClient<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor; it runs after those already registered.
    #[must_use]
    pub fn with(mut self, interceptor: Rc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Send through the wrapped transport and notify interceptors.
    ///
    /// # Errors
    ///
    /// Returns exactly the error the wrapped transport produced.
    pub async fn send(&self, request: T::Request) -> Result<T::Response, T::Error> {
        let result = self.inner.send(request).await;
        let exchange = match &result {
            Ok(response) => classify_status(response.status()),
            Err(e) => {
                log::debug!("request failed: {e:?}");
                Exchange::Failed
            }
        };
        for interceptor in &self.interceptors {
            interceptor.on_exchange(exchange);
        }
        result
    }
}
