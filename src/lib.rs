//! # WHOOP API Client
//!
//! Production-ready Rust client for the WHOOP developer REST API.
//!
//! ## Features
//!
//! - Typed resource services: user profile, cycles, sleep, workouts, recovery
//! - Local token-bucket rate limiting (100 requests per minute)
//! - Automatic retry with full-jitter exponential backoff on HTTP 429
//! - Cancellation-aware at every suspension point
//! - Signed webhook verification (`X-Whoop-Signature`, HMAC-SHA256)
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whoop_client::{WhoopClient, WhoopConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WhoopConfig::builder()
//!         .access_token("an-oauth2-access-token")
//!         .build()?;
//!     let client = WhoopClient::new(config)?;
//!
//!     let cancel = CancellationToken::new();
//!     let profile = client.user().get_basic_profile(&cancel).await?;
//!     println!("hello, {}", profile.first_name);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Request executor and service accessors
//! - `config` - Configuration types and builder
//! - `errors` - Error taxonomy and HTTP status classification
//! - `resilience` - Rate limiter and backoff calculation
//! - `transport` - HTTP transport seam
//! - `services` - Per-resource API wrappers
//! - `pagination` - List options and page cursors
//! - `webhooks` - Inbound webhook verification and decoding

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod errors;
pub mod pagination;
pub mod resilience;
pub mod scopes;
pub mod services;
pub mod transport;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod mocks;

pub use client::{ApiRequest, WhoopClient};
pub use config::{WhoopConfig, WhoopConfigBuilder};
pub use errors::{classify, ApiError, WebhookError, WhoopError, WhoopResult};
pub use pagination::{ListOptions, Page};
pub use resilience::{backoff_delay, RateLimiter};
pub use scopes::Scope;
pub use services::{
    BasicProfile, BodyMeasurement, Cycle, CycleScore, CycleService, Recovery, RecoveryScore,
    RecoveryService, Sleep, SleepNeeded, SleepScore, SleepService, StageSummary, UserService,
    Workout, WorkoutScore, WorkoutService, ZoneDurations,
};
pub use transport::{HttpTransport, ReqwestTransport};
pub use webhooks::{WebhookEvent, WebhookVerifier};

/// The default WHOOP developer API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.prod.whoop.com/developer/v1";

/// The semantic version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The User-Agent header value sent with every request.
pub const USER_AGENT: &str = concat!("whoop-client-rs/", env!("CARGO_PKG_VERSION"));

/// The default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The default maximum number of retries on HTTP 429.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// The default base duration for exponential backoff.
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 1;

/// The default ceiling for exponential backoff.
pub const DEFAULT_BACKOFF_MAX_SECS: u64 = 60;
