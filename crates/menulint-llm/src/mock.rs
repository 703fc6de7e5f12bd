//! Deterministic transport for tests
//!
//! Replies come from a closure or a script and every attempt is recorded
//! with the tokio instant it was made, so backoff delays can be measured
//! under a paused clock.

use crate::transport::{HttpReply, HttpRequest, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

type Responder = dyn Fn(&HttpRequest) -> Result<HttpReply, TransportError> + Send + Sync;

/// A recorded attempt
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The request as sent
    pub request: HttpRequest,
    /// When the attempt was made
    pub at: Instant,
}

/// Mock transport returning pre-configured replies without network calls
///
/// # Examples
///
/// ```
/// use menulint_llm::{HttpReply, MockTransport};
///
/// let transport = MockTransport::always(HttpReply::new(503, ""));
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    /// Answer every request with the given closure
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpReply, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with the same reply
    pub fn always(reply: HttpReply) -> Self {
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Fail every request at the transport level
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(TransportError::new(message.clone())))
    }

    /// Answer requests in order; the last entry repeats once the script runs out
    pub fn sequence(script: Vec<Result<HttpReply, TransportError>>) -> Self {
        let script = Mutex::new(VecDeque::from(script));
        Self::new(move |_| {
            let mut script = script.lock().unwrap();
            match script.len() {
                0 => Err(TransportError::new("mock script is empty")),
                1 => script[0].clone(),
                _ => script.pop_front().unwrap(),
            }
        })
    }

    /// Number of attempts made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded attempts
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests in the order they were sent
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.calls().into_iter().map(|c| c.request).collect()
    }

    /// Elapsed time between consecutive attempts
    pub fn delays(&self) -> Vec<Duration> {
        let calls = self.calls();
        calls
            .windows(2)
            .map(|pair| pair[1].at.duration_since(pair[0].at))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });
        (self.responder)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> HttpRequest {
        HttpRequest::post("http://mock.test", json!({}))
    }

    #[tokio::test]
    async fn test_always() {
        let transport = MockTransport::always(HttpReply::new(200, "ok"));
        let reply = transport.send(&request()).await.unwrap();
        assert_eq!(reply.body, "ok");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_sequence_repeats_last() {
        let transport = MockTransport::sequence(vec![
            Ok(HttpReply::new(503, "")),
            Ok(HttpReply::new(200, "done")),
        ]);
        assert_eq!(transport.send(&request()).await.unwrap().status, 503);
        assert_eq!(transport.send(&request()).await.unwrap().status, 200);
        assert_eq!(transport.send(&request()).await.unwrap().status, 200);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failing() {
        let transport = MockTransport::failing("connection refused");
        let err = transport.send(&request()).await.unwrap_err();
        assert_eq!(err.message, "connection refused");
    }

    #[tokio::test]
    async fn test_clone_shares_calls() {
        let transport1 = MockTransport::always(HttpReply::new(200, ""));
        let transport2 = transport1.clone();
        transport1.send(&request()).await.unwrap();
        assert_eq!(transport2.call_count(), 1);
    }
}
