//! Scripted test doubles for the transport seam.

use crate::errors::{WhoopError, WhoopResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Response};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// One scripted transport outcome.
pub(crate) enum ScriptedReply {
    /// Resolve with the given result.
    Respond(WhoopResult<Response<Bytes>>),
    /// Never resolve; used to exercise cancellation during the send.
    Hang,
}

/// A request captured by the scripted transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// Transport double that replays a queue of scripted replies and records
/// every call it receives.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, headers: &[(&str, &str)], body: &str) {
        let mut builder = Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = builder.body(Bytes::from(body.to_string())).unwrap();
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Respond(Ok(response)));
    }

    pub fn push_error(&self, err: WhoopError) {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Respond(Err(err)));
    }

    pub fn push_hang(&self) {
        self.replies.lock().unwrap().push_back(ScriptedReply::Hang);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> WhoopResult<Response<Bytes>> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url,
            headers,
            body,
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(ScriptedReply::Respond(result)) => result,
            Some(ScriptedReply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(WhoopError::Transport {
                    message: "hung reply resolved unexpectedly".to_string(),
                })
            }
            None => Err(WhoopError::Transport {
                message: "scripted transport exhausted".to_string(),
            }),
        }
    }
}
