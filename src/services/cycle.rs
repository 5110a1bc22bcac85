//! Physiological cycle endpoints.

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::pagination::{paged_path, ListOptions, Page};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// A physiological cycle, typically one awake period to the next.
#[derive(Debug, Clone, Deserialize)]
pub struct Cycle {
    /// Unique identifier of the cycle.
    pub id: i64,
    /// The WHOOP user this cycle belongs to.
    pub user_id: i64,
    /// When the cycle record was created.
    pub created_at: DateTime<Utc>,
    /// When the cycle record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Start of the cycle.
    pub start: DateTime<Utc>,
    /// End of the cycle; absent while the cycle is ongoing.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// The user's timezone offset, e.g. `-05:00`.
    pub timezone_offset: String,
    /// Strain summary; absent until the cycle is scored.
    #[serde(default)]
    pub score: Option<CycleScore>,
}

/// Summary of physiological strain within a cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleScore {
    /// Cardiovascular strain on WHOOP's 0-21 scale.
    pub strain: f64,
    /// Energy expended during the cycle, in kilojoules.
    pub kilojoule: f64,
    /// Average heart rate in beats per minute.
    pub average_heart_rate: i32,
    /// Maximum heart rate in beats per minute.
    pub max_heart_rate: i32,
}

/// Handles communication with the cycle related endpoints.
#[derive(Debug, Clone)]
pub struct CycleService {
    client: WhoopClient,
}

impl CycleService {
    pub(crate) fn new(client: WhoopClient) -> Self {
        Self { client }
    }

    /// Fetches a single cycle by its ID.
    pub async fn get_by_id(&self, cancel: &CancellationToken, id: i64) -> WhoopResult<Cycle> {
        self.client.get_json(cancel, &format!("/cycle/{id}")).await
    }

    /// Fetches a paginated collection of cycles.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: &ListOptions,
    ) -> WhoopResult<Page<Cycle>> {
        self.client.get_json(cancel, &paged_path("/cycle", opts)).await
    }
}
