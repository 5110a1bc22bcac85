//! Webhook verification and decoding.
//!
//! WHOOP signs each webhook delivery with HMAC-SHA256 over the raw body,
//! base64-standard-encoded in the `X-Whoop-Signature` header. The verifier
//! authenticates the payload before decoding it, reads at most 1 MiB of
//! body, and compares signatures in constant time.
//!
//! Handlers should respond 401 on any [`WebhookError`] without
//! distinguishing which check failed, and should push follow-up processing
//! through a bounded queue (for example a `tokio::sync::mpsc` channel with
//! fixed capacity, logging and dropping on overflow) rather than spawning an
//! unbounded task per delivery.

use crate::errors::WebhookError;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use http::{HeaderMap, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use std::io::Read;
use tracing::{debug, warn};

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "X-Whoop-Signature";

/// Maximum number of body bytes read from an inbound delivery. Bytes past
/// the cap are dropped from the read, which makes signature verification or
/// decoding fail downstream instead of exhausting memory.
pub const MAX_BODY_BYTES: u64 = 1_048_576;

/// A "skinny webhook" event payload from WHOOP.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookEvent {
    /// The WHOOP user the event concerns.
    pub user_id: i64,
    /// Identifier of the affected resource.
    pub id: i64,
    /// Event type, e.g. `workout.updated`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Trace identifier for support correlation.
    pub trace_id: String,
}

/// Verifies and decodes inbound WHOOP webhook deliveries.
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a verifier with the shared webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies an inbound request and decodes its event payload.
    ///
    /// The checks run in order: POST method, signature header presence,
    /// bounded body read, constant-time signature comparison, JSON decode.
    /// Decoding happens only after the signature proves the payload
    /// authentic; a decode failure at that point is reported as
    /// [`WebhookError::MalformedPayload`].
    ///
    /// A body that was already consumed by an earlier handler reads as
    /// empty and fails verification cleanly. An empty body is valid input
    /// to the signature algorithm but cannot decode into an event.
    pub fn verify_and_decode<R: Read>(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: R,
    ) -> Result<WebhookEvent, WebhookError> {
        if method != Method::POST {
            return Err(WebhookError::MethodNotAllowed);
        }

        let provided = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let mut raw = Vec::new();
        body.take(MAX_BODY_BYTES).read_to_end(&mut raw)?;

        let expected = self.compute_signature(&raw);
        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            warn!("webhook signature verification failed");
            return Err(WebhookError::InvalidSignature);
        }

        let event: WebhookEvent =
            serde_json::from_slice(&raw).map_err(WebhookError::MalformedPayload)?;
        debug!(
            user_id = event.user_id,
            event_type = %event.event_type,
            trace_id = %event.trace_id,
            "webhook verified"
        );
        Ok(event)
    }

    /// Computes the base64-standard HMAC-SHA256 signature for a body.
    pub fn compute_signature(&self, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
