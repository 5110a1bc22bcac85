//! Workout activity endpoints.

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::pagination::{paged_path, ListOptions, Page};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// A tracked workout session.
#[derive(Debug, Clone, Deserialize)]
pub struct Workout {
    /// Unique identifier of the workout.
    pub id: i64,
    /// The WHOOP user this workout belongs to.
    pub user_id: i64,
    /// When the workout record was created.
    pub created_at: DateTime<Utc>,
    /// When the workout record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Start of the workout.
    pub start: DateTime<Utc>,
    /// End of the workout.
    pub end: DateTime<Utc>,
    /// The user's timezone offset, e.g. `-05:00`.
    pub timezone_offset: String,
    /// WHOOP sport identifier.
    pub sport_id: i32,
    /// Cardiovascular output summary; absent until scored.
    #[serde(default)]
    pub score: Option<WorkoutScore>,
}

/// Cardiovascular output of a workout.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutScore {
    /// Cardiovascular strain on WHOOP's 0-21 scale.
    pub strain: f64,
    /// Average heart rate in beats per minute.
    pub average_heart_rate: i32,
    /// Maximum heart rate in beats per minute.
    pub max_heart_rate: i32,
    /// Energy expended during the workout, in kilojoules.
    pub kilojoule: f64,
    /// Percentage of the workout with heart-rate data recorded.
    pub percent_recorded: f64,
    /// Distance travelled in meters, when available.
    #[serde(default)]
    pub distance_meter: f64,
    /// Altitude gained in meters, when available.
    #[serde(default)]
    pub altitude_gain_meter: f64,
    /// Net altitude change in meters, when available.
    #[serde(default)]
    pub altitude_change_meter: f64,
    /// Time spent in each heart-rate zone.
    #[serde(default)]
    pub zone_duration: Option<ZoneDurations>,
}

/// Time spent in each heart-rate zone, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneDurations {
    /// Zone 0 (rest).
    pub zone_zero_milli: i64,
    /// Zone 1.
    pub zone_one_milli: i64,
    /// Zone 2.
    pub zone_two_milli: i64,
    /// Zone 3.
    pub zone_three_milli: i64,
    /// Zone 4.
    pub zone_four_milli: i64,
    /// Zone 5 (maximum).
    pub zone_five_milli: i64,
}

/// Handles communication with the workout related endpoints.
#[derive(Debug, Clone)]
pub struct WorkoutService {
    client: WhoopClient,
}

impl WorkoutService {
    pub(crate) fn new(client: WhoopClient) -> Self {
        Self { client }
    }

    /// Fetches a single workout by its ID.
    pub async fn get_by_id(&self, cancel: &CancellationToken, id: i64) -> WhoopResult<Workout> {
        self.client
            .get_json(cancel, &format!("/activity/workout/{id}"))
            .await
    }

    /// Fetches a paginated collection of workouts.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        opts: &ListOptions,
    ) -> WhoopResult<Page<Workout>> {
        self.client
            .get_json(cancel, &paged_path("/activity/workout", opts))
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
    async fn test_get_by_id_decodes_zone_durations() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(
            200,
            &[],
            r#"{
                "id": 1043,
                "user_id": 9012,
                "created_at": "2022-04-24T11:25:44Z",
                "updated_at": "2022-04-24T14:25:44Z",
                "start": "2022-04-24T02:25:44Z",
                "end": "2022-04-24T10:25:44Z",
                "timezone_offset": "-05:00",
                "sport_id": 1,
                "score": {
                    "strain": 8.2463,
                    "average_heart_rate": 123,
                    "max_heart_rate": 146,
                    "kilojoule": 1569.34033,
                    "percent_recorded": 100.0,
                    "distance_meter": 1772.77035,
                    "altitude_gain_meter": 46.64384,
                    "altitude_change_meter": -0.781891,
                    "zone_duration": {
                        "zone_zero_milli": 13458,
                        "zone_one_milli": 389370,
                        "zone_two_milli": 388367,
                        "zone_three_milli": 71137,
                        "zone_four_milli": 0,
                        "zone_five_milli": 0
                    }
                }
            }"#,
        );
        let config = WhoopConfig::builder()
            .base_url("https://api.test/v1")
            .build()
            .unwrap();
        let client = WhoopClient::with_transport(config, transport.clone()).unwrap();

        let workout = client
            .workout()
            .get_by_id(&CancellationToken::new(), 1043)
            .await
            .unwrap();

        assert_eq!(workout.sport_id, 1);
        let score = workout.score.unwrap();
        assert_eq!(score.zone_duration.unwrap().zone_one_milli, 389370);
        assert_eq!(
            transport.calls()[0].url.as_str(),
            "https://api.test/v1/activity/workout/1043"
        );
    }
}
