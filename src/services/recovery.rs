//! Recovery endpoints.

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::pagination::{paged_path, ListOptions, Page};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// The quantified recovery status of the user for a given cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct Recovery {
    /// The cycle this recovery belongs to.
    pub cycle_id: i64,
    /// The sleep event the recovery was calculated from.
    pub sleep_id: i64,
    /// The WHOOP user this recovery belongs to.
    pub user_id: i64,
    /// When the recovery record was created.
    pub created_at: DateTime<Utc>,
    /// When the recovery record was last updated.
    pub updated_at: DateTime<Utc>,
    /// The metrics behind the recovery calculation; absent until scored.
    #[serde(default)]
    pub score: Option<RecoveryScore>,
}

/// Metrics formulating the recovery calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryScore {
    /// Whether WHOOP is still calibrating for this user.
    pub user_calibrating: bool,
    /// Recovery percentage, 0-100.
    pub recovery_score: f64,
    /// Resting heart rate in beats per minute.
    pub resting_heart_rate: f64,
    /// Heart-rate variability (RMSSD) in milliseconds.
    pub hrv_rmssd_milli: f64,
    /// Blood oxygen saturation percentage.
    #[serde(default)]
    pub spo2_percentage: f64,
    /// Skin temperature in Celsius.
    #[serde(default)]
    pub skin_temp_celsius: f64,
}

/// Handles communication with the recovery related endpoints.
#[derive(Debug, Clone)]
pub struct RecoveryService {
    client: WhoopClient,
}

impl RecoveryService {
    pub(crate) fn new(client: WhoopClient) -> Self {
        Self { client }
    }

    /// Fetches the recovery for a given cycle.
    pub async fn get_by_cycle_id(
        &self,
        cancel: &CancellationToken,
        cycle_id: i64,
    ) -> WhoopResult<Recovery> {
        self.client
            .get_json(cancel, &format!("/cycle/{cycle_id}/recovery"))
            .await
    }

    /// Fetches a paginated collection of recovery records.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: &ListOptions,
    ) -> WhoopResult<Page<Recovery>> {
        self.client
            .get_json(cancel, &paged_path("/recovery", opts))
            .await
    }
}
