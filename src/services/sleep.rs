//! Sleep activity endpoints.

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::pagination::{paged_path, ListOptions, Page};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// A single sleep event.
#[derive(Debug, Clone, Deserialize)]
pub struct Sleep {
    /// Unique identifier of the sleep event.
    pub id: i64,
    /// The WHOOP user this sleep belongs to.
    pub user_id: i64,
    /// When the sleep record was created.
    pub created_at: DateTime<Utc>,
    /// When the sleep record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Start of the sleep.
    pub start: DateTime<Utc>,
    /// End of the sleep.
    pub end: DateTime<Utc>,
    /// The user's timezone offset, e.g. `-05:00`.
    pub timezone_offset: String,
    /// Whether this sleep was a nap.
    pub nap: bool,
    /// Calculated sleep metrics; absent until scored.
    #[serde(default)]
    pub score: Option<SleepScore>,
}

/// Calculated metrics for a sleep event.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepScore {
    /// Durations spent in each sleep stage.
    #[serde(default)]
    pub stage_summary: Option<StageSummary>,
    /// The sleep the user needed going into this event.
    #[serde(default)]
    pub sleep_needed: Option<SleepNeeded>,
    /// Breaths per minute during the sleep.
    pub respiratory_rate: f64,
    /// Percentage of needed sleep obtained.
    pub sleep_performance_percentage: f64,
    /// Consistency of sleep/wake times versus previous days.
    pub sleep_consistency_percentage: f64,
    /// Time asleep as a percentage of time in bed.
    pub sleep_efficiency_percentage: f64,
}

/// Durations spent in the different sleep stages, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct StageSummary {
    /// Total time in bed.
    pub total_in_bed_time_milli: i64,
    /// Total time awake.
    pub total_awake_time_milli: i64,
    /// Total time with no data recorded.
    pub total_no_data_time_milli: i64,
    /// Total light sleep.
    pub total_light_sleep_time_milli: i64,
    /// Total slow-wave sleep.
    pub total_slow_wave_sleep_time_milli: i64,
    /// Total REM sleep.
    pub total_rem_sleep_time_milli: i64,
    /// Number of completed sleep cycles.
    pub sleep_cycle_count: i32,
    /// Number of disturbances.
    pub disturbance_count: i32,
}

/// Baseline and calculated sleep needs, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepNeeded {
    /// The user's baseline need.
    pub baseline_milli: i64,
    /// Additional need from accumulated sleep debt.
    pub need_from_sleep_debt_milli: i64,
    /// Additional need from recent strain.
    pub need_from_recent_strain_milli: i64,
    /// Reduction from a recent nap.
    pub need_from_recent_nap_milli: i64,
}

/// Handles communication with the sleep related endpoints.
#[derive(Debug, Clone)]
pub struct SleepService {
    client: WhoopClient,
}

impl SleepService {
    pub(crate) fn new(client: WhoopClient) -> Self {
        Self { client }
    }

    /// Fetches a single sleep event by its ID.
    pub async fn get_by_id(&self, cancel: &CancellationToken, id: i64) -> WhoopResult<Sleep> {
        self.client
            .get_json(cancel, &format!("/activity/sleep/{id}"))
            .await
    }

    /// Fetches a paginated collection of sleep events.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: &ListOptions,
    ) -> WhoopResult<Page<Sleep>> {
        self.client
            .get_json(cancel, &paged_path("/activity/sleep", opts))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WhoopConfig;
    use crate::mocks::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_decodes_records() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(
            200,
            &[],
            r#"{
                "records": [{
                    "id": 42,
                    "user_id": 7,
                    "created_at": "2022-04-24T11:25:44Z",
                    "updated_at": "2022-04-24T14:25:44Z",
                    "start": "2022-04-23T23:25:44Z",
                    "end": "2022-04-24T07:25:44Z",
                    "timezone_offset": "-05:00",
                    "nap": false,
                    "score": {
                        "stage_summary": {
                            "total_in_bed_time_milli": 30272735,
                            "total_awake_time_milli": 1403507,
                            "total_no_data_time_milli": 0,
                            "total_light_sleep_time_milli": 14905851,
                            "total_slow_wave_sleep_time_milli": 6630370,
                            "total_rem_sleep_time_milli": 7333007,
                            "sleep_cycle_count": 4,
                            "disturbance_count": 12
                        },
                        "sleep_needed": {
                            "baseline_milli": 27395716,
                            "need_from_sleep_debt_milli": 352230,
                            "need_from_recent_strain_milli": 208595,
                            "need_from_recent_nap_milli": -12312
                        },
                        "respiratory_rate": 16.11328125,
                        "sleep_performance_percentage": 98.0,
                        "sleep_consistency_percentage": 90.0,
                        "sleep_efficiency_percentage": 91.69533
                    }
                }],
                "next_token": ""
            }"#,
        );
        let config = WhoopConfig::builder()
            .base_url("https://api.test/v1")
            .build()
            .unwrap();
        let client = WhoopClient::with_transport(config, transport.clone()).unwrap();

        let page = client
            .sleep()
            .list(&CancellationToken::new(), &ListOptions::new())
            .await
            .unwrap();

        assert_eq!(page.records.len(), 1);
        assert!(!page.has_next());
        let sleep = &page.records[0];
        assert!(!sleep.nap);
        let score = sleep.score.as_ref().unwrap();
        assert_eq!(score.stage_summary.as_ref().unwrap().sleep_cycle_count, 4);
        assert_eq!(
            score.sleep_needed.as_ref().unwrap().need_from_recent_nap_milli,
            -12312
        );
        assert_eq!(
            transport.calls()[0].url.as_str(),
            "https://api.test/v1/activity/sleep"
        );
    }
}
